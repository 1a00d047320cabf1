//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete
//! implementation of the `DatabaseService` port from the `core` crate. It
//! handles all interactions with the PostgreSQL database using `sqlx`.
//!
//! Ownership scoping is enforced here, in the queries themselves: every
//! single-record journal or conversation operation filters by both the record
//! id and the owner id, so a record belonging to another user is never read
//! into memory at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mindgarden_core::domain::{
    ChatMessage, Conversation, Identity, JournalDraft, JournalEntry, Mood, SleepQuality,
    UserCredentials,
};
use mindgarden_core::ports::{DatabaseService, PortError, PortResult};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    id: Uuid,
    username: String,
    email: String,
}
impl UserRecord {
    fn to_domain(self) -> Identity {
        Identity {
            id: self.id,
            username: self.username,
            email: self.email,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRecord {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
}
impl CredentialsRecord {
    fn to_domain(self) -> UserCredentials {
        UserCredentials {
            id: self.id,
            username: self.username,
            email: self.email,
            hashed_password: self.password_hash,
        }
    }
}

#[derive(FromRow)]
struct JournalEntryRecord {
    id: Uuid,
    user_id: Uuid,
    date: DateTime<Utc>,
    mood: Option<String>,
    stress_level: Option<i32>,
    energy_level: Option<i32>,
    triggers: Option<String>,
    gratitude: Option<String>,
    coping_activities: Vec<String>,
    sleep_quality: Option<String>,
    reflection: Option<String>,
}
impl JournalEntryRecord {
    fn to_domain(self) -> JournalEntry {
        JournalEntry {
            id: self.id,
            user_id: self.user_id,
            date: self.date,
            draft: JournalDraft {
                mood: self.mood.as_deref().and_then(Mood::parse),
                stress_level: self.stress_level,
                energy_level: self.energy_level,
                triggers: self.triggers,
                gratitude: self.gratitude,
                coping_activities: self.coping_activities,
                sleep_quality: self.sleep_quality.as_deref().and_then(SleepQuality::parse),
                reflection: self.reflection,
            },
        }
    }
}

#[derive(FromRow)]
struct ConversationRecord {
    id: Uuid,
    user_id: Uuid,
    messages: Json<Vec<ChatMessage>>,
    created_at: DateTime<Utc>,
}
impl ConversationRecord {
    fn to_domain(self) -> Conversation {
        Conversation {
            id: self.id,
            user_id: self.user_id,
            messages: self.messages.0,
            created_at: self.created_at,
        }
    }
}

const JOURNAL_COLUMNS: &str = "id, user_id, date, mood, stress_level, energy_level, triggers, \
     gratitude, coping_activities, sleep_quality, reflection";

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        hashed_password: &str,
    ) -> PortResult<Identity> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (id, username, email, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING id, username, email",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                PortError::Conflict("username or email already taken".to_string())
            }
            _ => unexpected(e),
        })?;
        Ok(record.to_domain())
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, CredentialsRecord>(
            "SELECT id, username, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| PortError::NotFound(format!("No user with email {}", email)))?;
        Ok(record.to_domain())
    }

    async fn create_journal_entry(
        &self,
        user_id: Uuid,
        draft: &JournalDraft,
    ) -> PortResult<JournalEntry> {
        let sql = format!(
            "INSERT INTO journal_entries \
             (id, user_id, mood, stress_level, energy_level, triggers, gratitude, \
              coping_activities, sleep_quality, reflection) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {JOURNAL_COLUMNS}"
        );
        let record = sqlx::query_as::<_, JournalEntryRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(draft.mood.map(|m| m.as_str()))
            .bind(draft.stress_level)
            .bind(draft.energy_level)
            .bind(&draft.triggers)
            .bind(&draft.gratitude)
            .bind(&draft.coping_activities)
            .bind(draft.sleep_quality.map(|s| s.as_str()))
            .bind(&draft.reflection)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn list_journal_entries(&self, user_id: Uuid) -> PortResult<Vec<JournalEntry>> {
        let sql = format!(
            "SELECT {JOURNAL_COLUMNS} FROM journal_entries \
             WHERE user_id = $1 ORDER BY date DESC"
        );
        let records = sqlx::query_as::<_, JournalEntryRecord>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn get_journal_entry(&self, entry_id: Uuid, user_id: Uuid) -> PortResult<JournalEntry> {
        let sql = format!(
            "SELECT {JOURNAL_COLUMNS} FROM journal_entries \
             WHERE id = $1 AND user_id = $2"
        );
        let record = sqlx::query_as::<_, JournalEntryRecord>(&sql)
            .bind(entry_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or_else(|| PortError::NotFound(format!("Journal entry {} not found", entry_id)))?;
        Ok(record.to_domain())
    }

    async fn update_journal_entry(
        &self,
        entry_id: Uuid,
        user_id: Uuid,
        draft: &JournalDraft,
    ) -> PortResult<JournalEntry> {
        // Whole-record replace of the editable fields; date and owner stay.
        let sql = format!(
            "UPDATE journal_entries SET mood = $3, stress_level = $4, energy_level = $5, \
             triggers = $6, gratitude = $7, coping_activities = $8, sleep_quality = $9, \
             reflection = $10 \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {JOURNAL_COLUMNS}"
        );
        let record = sqlx::query_as::<_, JournalEntryRecord>(&sql)
            .bind(entry_id)
            .bind(user_id)
            .bind(draft.mood.map(|m| m.as_str()))
            .bind(draft.stress_level)
            .bind(draft.energy_level)
            .bind(&draft.triggers)
            .bind(&draft.gratitude)
            .bind(&draft.coping_activities)
            .bind(draft.sleep_quality.map(|s| s.as_str()))
            .bind(&draft.reflection)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or_else(|| PortError::NotFound(format!("Journal entry {} not found", entry_id)))?;
        Ok(record.to_domain())
    }

    async fn delete_journal_entry(&self, entry_id: Uuid, user_id: Uuid) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Journal entry {} not found",
                entry_id
            )));
        }
        Ok(())
    }

    async fn create_conversation(
        &self,
        user_id: Uuid,
        messages: &[ChatMessage],
    ) -> PortResult<Conversation> {
        let record = sqlx::query_as::<_, ConversationRecord>(
            "INSERT INTO conversations (id, user_id, messages) VALUES ($1, $2, $3) \
             RETURNING id, user_id, messages, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Json(messages))
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn list_conversations(&self, user_id: Uuid) -> PortResult<Vec<Conversation>> {
        let records = sqlx::query_as::<_, ConversationRecord>(
            "SELECT id, user_id, messages, created_at FROM conversations \
             WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn get_conversation(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> PortResult<Conversation> {
        let record = sqlx::query_as::<_, ConversationRecord>(
            "SELECT id, user_id, messages, created_at FROM conversations \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| {
            PortError::NotFound(format!("Conversation {} not found", conversation_id))
        })?;
        Ok(record.to_domain())
    }

    async fn delete_conversation(&self, conversation_id: Uuid, user_id: Uuid) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = $1 AND user_id = $2")
            .bind(conversation_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Conversation {} not found",
                conversation_id
            )));
        }
        Ok(())
    }
}
