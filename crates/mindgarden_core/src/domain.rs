//! crates/mindgarden_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or web framework.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The `{id, username, email}` tuple for a known user.
///
/// This is both the minimal user projection returned by the API and the
/// identity resolved from a verified session token. The password hash is
/// deliberately absent so it can never leak into a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

// Only used internally for login - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
}

/// The fixed set of moods a journal entry may record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Angry,
    Calm,
    Neutral,
    Excited,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Angry => "angry",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Excited => "excited",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "happy" => Some(Mood::Happy),
            "sad" => Some(Mood::Sad),
            "anxious" => Some(Mood::Anxious),
            "angry" => Some(Mood::Angry),
            "calm" => Some(Mood::Calm),
            "neutral" => Some(Mood::Neutral),
            "excited" => Some(Mood::Excited),
            _ => None,
        }
    }
}

/// The fixed set of sleep-quality ratings a journal entry may record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Poor,
    Average,
    Good,
    Excellent,
}

impl SleepQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            SleepQuality::Poor => "poor",
            SleepQuality::Average => "average",
            SleepQuality::Good => "good",
            SleepQuality::Excellent => "excellent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "poor" => Some(SleepQuality::Poor),
            "average" => Some(SleepQuality::Average),
            "good" => Some(SleepQuality::Good),
            "excellent" => Some(SleepQuality::Excellent),
            _ => None,
        }
    }
}

/// A persisted journal entry, always owned by exactly one user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub draft: JournalDraft,
}

/// The editable fields of a journal entry, as submitted by the client.
///
/// All fields are optional; validation applies only to fields that are
/// present. The owner and the entry date are never part of the draft - the
/// server assigns both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalDraft {
    pub mood: Option<Mood>,
    pub stress_level: Option<i32>,
    pub energy_level: Option<i32>,
    pub triggers: Option<String>,
    pub gratitude: Option<String>,
    #[serde(default)]
    pub coping_activities: Vec<String>,
    pub sleep_quality: Option<SleepQuality>,
    pub reflection: Option<String>,
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

/// One message inside a stored conversation or a chat-relay history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

/// A persisted chat transcript, owned by exactly one user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}
