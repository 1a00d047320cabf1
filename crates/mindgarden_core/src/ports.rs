//! crates/mindgarden_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like databases
//! or generative-text APIs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ChatMessage, Conversation, Identity, JournalDraft, JournalEntry, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Storage operations. Every journal and conversation method that touches a
/// single record takes the caller's user id and scopes the underlying query
/// by BOTH ids, so a record belonging to someone else is never materialized.
#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- User Management ---
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        hashed_password: &str,
    ) -> PortResult<Identity>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    // --- Journal Entries ---
    async fn create_journal_entry(
        &self,
        user_id: Uuid,
        draft: &JournalDraft,
    ) -> PortResult<JournalEntry>;

    async fn list_journal_entries(&self, user_id: Uuid) -> PortResult<Vec<JournalEntry>>;

    async fn get_journal_entry(&self, entry_id: Uuid, user_id: Uuid) -> PortResult<JournalEntry>;

    async fn update_journal_entry(
        &self,
        entry_id: Uuid,
        user_id: Uuid,
        draft: &JournalDraft,
    ) -> PortResult<JournalEntry>;

    async fn delete_journal_entry(&self, entry_id: Uuid, user_id: Uuid) -> PortResult<()>;

    // --- Conversations ---
    async fn create_conversation(
        &self,
        user_id: Uuid,
        messages: &[ChatMessage],
    ) -> PortResult<Conversation>;

    async fn list_conversations(&self, user_id: Uuid) -> PortResult<Vec<Conversation>>;

    async fn get_conversation(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> PortResult<Conversation>;

    async fn delete_conversation(&self, conversation_id: Uuid, user_id: Uuid) -> PortResult<()>;
}

/// The external generative-text provider behind the chat relay.
#[async_trait]
pub trait ChatCompanionService: Send + Sync {
    /// Produces a companion reply to `message`, given a short rolling history.
    async fn reply(&self, message: &str, history: &[ChatMessage]) -> PortResult<String>;
}
