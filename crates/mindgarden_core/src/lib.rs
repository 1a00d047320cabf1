pub mod domain;
pub mod ports;
pub mod validate;

pub use domain::{
    ChatMessage, ChatRole, Conversation, Identity, JournalDraft, JournalEntry, Mood, SleepQuality,
    UserCredentials,
};
pub use ports::{ChatCompanionService, DatabaseService, PortError, PortResult};
