//! services/api/src/web/conversation.rs
//!
//! CRUD endpoints for persisted chat transcripts, owner-scoped like the
//! journal routes. These coexist with the stateless `/chat` relay: the
//! client decides whether a transcript is worth keeping.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mindgarden_core::{
    domain::{ChatMessage, Conversation},
    ports::PortError,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::middleware::CurrentUser;
use crate::web::state::AppState;
use crate::web::{failure, ApiFailure, ApiMessage};

const NOT_FOUND_MESSAGE: &str = "Conversation not found";

#[derive(Deserialize, ToSchema)]
pub struct SaveConversationRequest {
    /// Left untyped here so a malformed list yields a 400 with a clear
    /// message instead of a body-rejection status.
    #[schema(value_type = Object)]
    pub messages: serde_json::Value,
}

fn storage_error(e: PortError) -> ApiFailure {
    match e {
        PortError::NotFound(_) => failure(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        e => {
            error!("Conversation storage failure: {:?}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

/// POST /conversation - Persist a transcript under the caller
#[utoipa::path(
    post,
    path = "/conversation",
    request_body = SaveConversationRequest,
    responses(
        (status = 201, description = "Conversation saved", body = ApiMessage),
        (status = 400, description = "Invalid messages format", body = ApiMessage),
        (status = 401, description = "Not authenticated", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage)
    )
)]
pub async fn save_conversation_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SaveConversationRequest>,
) -> Result<impl IntoResponse, ApiFailure> {
    let messages: Vec<ChatMessage> = serde_json::from_value(req.messages)
        .map_err(|_| failure(StatusCode::BAD_REQUEST, "Invalid messages format"))?;

    state
        .db
        .create_conversation(user.id, &messages)
        .await
        .map_err(|e| {
            error!("Failed to save conversation: {:?}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiMessage {
            message: "Conversation saved".to_string(),
        }),
    ))
}

/// GET /conversation - List the caller's conversations, newest first
#[utoipa::path(
    get,
    path = "/conversation",
    responses(
        (status = 200, description = "The caller's conversations"),
        (status = 401, description = "Not authenticated", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage)
    )
)]
pub async fn list_conversations_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Conversation>>, ApiFailure> {
    let conversations = state.db.list_conversations(user.id).await.map_err(|e| {
        error!("Failed to list conversations: {:?}", e);
        failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;
    Ok(Json(conversations))
}

/// GET /conversation/{id} - Fetch one of the caller's conversations
#[utoipa::path(
    get,
    path = "/conversation/{id}",
    params(("id" = Uuid, Path, description = "The conversation id")),
    responses(
        (status = 200, description = "The conversation"),
        (status = 401, description = "Not authenticated", body = ApiMessage),
        (status = 404, description = "No such conversation for this caller", body = ApiMessage)
    )
)]
pub async fn get_conversation_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<Conversation>, ApiFailure> {
    let conversation = state
        .db
        .get_conversation(conversation_id, user.id)
        .await
        .map_err(storage_error)?;
    Ok(Json(conversation))
}

/// DELETE /conversation/{id} - Delete one of the caller's conversations
#[utoipa::path(
    delete,
    path = "/conversation/{id}",
    params(("id" = Uuid, Path, description = "The conversation id")),
    responses(
        (status = 200, description = "Conversation deleted", body = ApiMessage),
        (status = 401, description = "Not authenticated", body = ApiMessage),
        (status = 404, description = "No such conversation for this caller", body = ApiMessage)
    )
)]
pub async fn delete_conversation_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(conversation_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiFailure> {
    state
        .db
        .delete_conversation(conversation_id, user.id)
        .await
        .map_err(storage_error)?;

    Ok(Json(ApiMessage {
        message: "Conversation deleted".to_string(),
    }))
}
