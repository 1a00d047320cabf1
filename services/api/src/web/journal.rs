//! services/api/src/web/journal.rs
//!
//! CRUD endpoints for journal entries, all scoped to the authenticated
//! caller. Entry-level operations are filtered by BOTH the entry id and the
//! caller's id inside the storage query, so another user's entry is never
//! materialized; "not found" and "someone else's" are the same response.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mindgarden_core::{
    domain::{JournalDraft, JournalEntry, Mood, SleepQuality},
    ports::PortError,
    validate::validate_journal,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::middleware::CurrentUser;
use crate::web::state::AppState;
use crate::web::{failure, ApiFailure, ApiMessage};

const NOT_FOUND_MESSAGE: &str = "Journal entry not found";

#[derive(Serialize, ToSchema)]
pub struct EntryResponse {
    pub message: String,
    #[schema(value_type = Object)]
    pub entry: JournalEntry,
}

/// The wire shape of a submitted entry. Mood and sleep quality arrive as
/// plain strings so an out-of-vocabulary value is reported by the validator
/// alongside every other violated rule, not by the JSON deserializer.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JournalRequest {
    pub mood: Option<String>,
    pub stress_level: Option<i32>,
    pub energy_level: Option<i32>,
    pub triggers: Option<String>,
    pub gratitude: Option<String>,
    #[serde(default)]
    pub coping_activities: Vec<String>,
    pub sleep_quality: Option<String>,
    pub reflection: Option<String>,
}

/// Turns the wire payload into a draft, collecting every violated rule.
///
/// Blank vocabulary strings count as absent, matching the optional fields.
fn checked_draft(req: JournalRequest) -> Result<JournalDraft, Vec<String>> {
    let mut errors = Vec::new();

    let mood = match req.mood.as_deref() {
        None | Some("") => None,
        Some(raw) => {
            let parsed = Mood::parse(raw);
            if parsed.is_none() {
                errors.push("Invalid mood value.".to_string());
            }
            parsed
        }
    };
    let sleep_quality = match req.sleep_quality.as_deref() {
        None | Some("") => None,
        Some(raw) => {
            let parsed = SleepQuality::parse(raw);
            if parsed.is_none() {
                errors.push("Invalid sleep quality value.".to_string());
            }
            parsed
        }
    };

    let draft = JournalDraft {
        mood,
        stress_level: req.stress_level,
        energy_level: req.energy_level,
        triggers: req.triggers,
        gratitude: req.gratitude,
        coping_activities: req.coping_activities,
        sleep_quality,
        reflection: req.reflection,
    };
    errors.extend(validate_journal(&draft));

    if errors.is_empty() {
        Ok(draft)
    } else {
        Err(errors)
    }
}

fn storage_error(e: PortError) -> ApiFailure {
    match e {
        PortError::NotFound(_) => failure(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        e => {
            error!("Journal storage failure: {:?}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

/// POST /journal - Create a journal entry for the caller
///
/// The owner is always the resolved identity; the draft carries no owner
/// field for a client to spoof.
#[utoipa::path(
    post,
    path = "/journal",
    responses(
        (status = 201, description = "Journal entry created", body = EntryResponse),
        (status = 400, description = "Validation failure", body = ApiMessage),
        (status = 401, description = "Not authenticated", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage)
    )
)]
pub async fn create_entry_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<JournalRequest>,
) -> Result<impl IntoResponse, ApiFailure> {
    let draft = checked_draft(payload)
        .map_err(|errors| failure(StatusCode::BAD_REQUEST, errors.join(" ")))?;

    let entry = state
        .db
        .create_journal_entry(user.id, &draft)
        .await
        .map_err(|e| {
            error!("Failed to create journal entry: {:?}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        })?;

    Ok((
        StatusCode::CREATED,
        Json(EntryResponse {
            message: "Journal entry created".to_string(),
            entry,
        }),
    ))
}

/// GET /journal - List the caller's entries, newest first
#[utoipa::path(
    get,
    path = "/journal",
    responses(
        (status = 200, description = "The caller's journal entries"),
        (status = 401, description = "Not authenticated", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage)
    )
)]
pub async fn list_entries_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<JournalEntry>>, ApiFailure> {
    let entries = state.db.list_journal_entries(user.id).await.map_err(|e| {
        error!("Failed to list journal entries: {:?}", e);
        failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;
    Ok(Json(entries))
}

/// GET /journal/{id} - Fetch one of the caller's entries
#[utoipa::path(
    get,
    path = "/journal/{id}",
    params(("id" = Uuid, Path, description = "The entry id")),
    responses(
        (status = 200, description = "The entry"),
        (status = 401, description = "Not authenticated", body = ApiMessage),
        (status = 404, description = "No such entry for this caller", body = ApiMessage)
    )
)]
pub async fn get_entry_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<JournalEntry>, ApiFailure> {
    let entry = state
        .db
        .get_journal_entry(entry_id, user.id)
        .await
        .map_err(storage_error)?;
    Ok(Json(entry))
}

/// PUT /journal/{id} - Replace the editable fields of one entry
///
/// The owner and the original entry date are preserved.
#[utoipa::path(
    put,
    path = "/journal/{id}",
    params(("id" = Uuid, Path, description = "The entry id")),
    responses(
        (status = 200, description = "Journal entry updated", body = EntryResponse),
        (status = 400, description = "Validation failure", body = ApiMessage),
        (status = 401, description = "Not authenticated", body = ApiMessage),
        (status = 404, description = "No such entry for this caller", body = ApiMessage)
    )
)]
pub async fn update_entry_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(entry_id): Path<Uuid>,
    Json(payload): Json<JournalRequest>,
) -> Result<impl IntoResponse, ApiFailure> {
    let draft = checked_draft(payload)
        .map_err(|errors| failure(StatusCode::BAD_REQUEST, errors.join(" ")))?;

    let entry = state
        .db
        .update_journal_entry(entry_id, user.id, &draft)
        .await
        .map_err(storage_error)?;

    Ok(Json(EntryResponse {
        message: "Journal entry updated".to_string(),
        entry,
    }))
}

/// DELETE /journal/{id} - Delete one of the caller's entries
///
/// Deleting an id that is already gone is a clean 404, not a fault.
#[utoipa::path(
    delete,
    path = "/journal/{id}",
    params(("id" = Uuid, Path, description = "The entry id")),
    responses(
        (status = 200, description = "Journal entry deleted", body = ApiMessage),
        (status = 401, description = "Not authenticated", body = ApiMessage),
        (status = 404, description = "No such entry for this caller", body = ApiMessage)
    )
)]
pub async fn delete_entry_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(entry_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiFailure> {
    state
        .db
        .delete_journal_entry(entry_id, user.id)
        .await
        .map_err(storage_error)?;

    Ok(Json(ApiMessage {
        message: "Journal entry deleted".to_string(),
    }))
}
