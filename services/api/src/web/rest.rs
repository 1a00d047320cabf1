//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification.

use utoipa::OpenApi;

use crate::web::{auth, chat, conversation, journal, ApiMessage};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup_handler,
        auth::login_handler,
        auth::logout_handler,
        auth::status_handler,
        journal::create_entry_handler,
        journal::list_entries_handler,
        journal::get_entry_handler,
        journal::update_entry_handler,
        journal::delete_entry_handler,
        conversation::save_conversation_handler,
        conversation::list_conversations_handler,
        conversation::get_conversation_handler,
        conversation::delete_conversation_handler,
        chat::chat_handler,
    ),
    components(
        schemas(
            ApiMessage,
            auth::SignupRequest,
            auth::LoginRequest,
            auth::UserResponse,
            auth::LoginResponse,
            auth::StatusResponse,
            journal::JournalRequest,
            journal::EntryResponse,
            conversation::SaveConversationRequest,
            chat::ChatRequest,
            chat::ChatResponse,
        )
    ),
    tags(
        (name = "Mindgarden API", description = "API endpoints for the mental-wellness journaling app.")
    )
)]
pub struct ApiDoc;
