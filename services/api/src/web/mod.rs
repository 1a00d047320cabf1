pub mod auth;
pub mod chat;
pub mod conversation;
pub mod journal;
pub mod middleware;
pub mod rest;
pub mod state;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::ToSchema;

use crate::web::state::AppState;
pub use middleware::{resolve_identity, CurrentUser};

/// The `{message}` body used by failures and message-only successes alike.
#[derive(Serialize, ToSchema)]
pub struct ApiMessage {
    pub message: String,
}

/// The error side of every handler: a status plus a `{message}` body.
pub type ApiFailure = (StatusCode, Json<ApiMessage>);

pub fn failure(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    (
        status,
        Json(ApiMessage {
            message: message.into(),
        }),
    )
}

/// Builds the full application router.
///
/// The session resolver runs on every route and always proceeds, attaching
/// the resolved identity (or anonymous) to the request. Protected handlers
/// guard themselves by taking [`CurrentUser`] in their signature; there is no
/// route-level reject-all layer, so `/auth/status` can answer for anonymous
/// callers too.
pub fn router(state: Arc<AppState>) -> Router {
    let allowed_origin = state
        .config
        .allowed_origin
        .parse::<HeaderValue>()
        .expect("ALLOWED_ORIGIN must be a valid header value");

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    Router::new()
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/auth/status", get(auth::status_handler))
        .route(
            "/journal",
            get(journal::list_entries_handler).post(journal::create_entry_handler),
        )
        .route(
            "/journal/{id}",
            get(journal::get_entry_handler)
                .put(journal::update_entry_handler)
                .delete(journal::delete_entry_handler),
        )
        .route(
            "/conversation",
            get(conversation::list_conversations_handler)
                .post(conversation::save_conversation_handler),
        )
        .route(
            "/conversation/{id}",
            get(conversation::get_conversation_handler)
                .delete(conversation::delete_conversation_handler),
        )
        .route("/chat", post(chat::chat_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            resolve_identity,
        ))
        .layer(cors)
        .with_state(state)
}
