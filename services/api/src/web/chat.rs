//! services/api/src/web/chat.rs
//!
//! The stateless chat relay: forwards a message plus a short rolling history
//! to the generative-text provider and returns its reply verbatim. Nothing
//! is stored here; persistence is the client's call via `/conversation`.

use axum::{extract::State, http::StatusCode, Json};
use mindgarden_core::domain::ChatMessage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::middleware::CurrentUser;
use crate::web::state::AppState;

/// Returned in place of a reply when the provider or the network fails.
const FALLBACK_REPLY: &str = "Something went wrong 💙";

#[derive(Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    /// Short rolling history the client carries between turns.
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /chat - Relay a message to the chat companion
///
/// Provider failure yields a 500 with the fixed fallback reply; the process
/// never crashes over it. No retries, no caching, provider-default timeout.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "The companion's reply", body = ChatResponse),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Provider failure, fallback reply", body = ChatResponse)
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    match state.chat_adapter.reply(&req.message, &req.messages).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { reply })),
        Err(e) => {
            error!("Chat provider failure: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatResponse {
                    reply: FALLBACK_REPLY.to_string(),
                }),
            )
        }
    }
}
