//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user signup, login, logout, and status.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use mindgarden_core::{domain::Identity, ports::PortError, validate::validate_signup};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::middleware::AuthContext;
use crate::web::state::AppState;
use crate::web::{failure, ApiFailure, ApiMessage};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub id: uuid::Uuid,
    pub username: String,
    pub email: String,
}

impl From<Identity> for UserResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            email: identity.email,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub is_logged_in: bool,
    pub user: Option<UserResponse>,
}

//=========================================================================================
// Cookie Helpers
//=========================================================================================

/// Builds the session cookie carrying the signed token.
///
/// No Max-Age: the token's embedded expiry is the only validity limit.
fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!("token={}; HttpOnly; SameSite=Strict; Path=/", token);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn clear_cookie(secure: bool) -> String {
    let mut cookie = "token=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0".to_string();
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/signup - Create a new user account
///
/// Does not log the user in; the client performs a separate login.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = ApiMessage),
        (status = 400, description = "Validation failure or duplicate user", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage)
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiFailure> {
    // 1. Validate input data, collecting every violated rule.
    let errors = validate_signup(&req.username, &req.email, &req.password);
    if !errors.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, errors.join(" ")));
    }

    // 2. Hash the password.
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user")
        })?
        .to_string();

    // 3. Create user in the database. Email is stored case-folded.
    let username = req.username.trim().to_string();
    let email = req.email.trim().to_lowercase();
    state
        .db
        .create_user(&username, &email, &password_hash)
        .await
        .map_err(|e| match e {
            PortError::Conflict(_) => failure(StatusCode::BAD_REQUEST, "User already exists"),
            e => {
                error!("Failed to create user: {:?}", e);
                failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user")
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiMessage {
            message: "User created successfully".to_string(),
        }),
    ))
}

/// POST /auth/login - Login with existing account
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiFailure> {
    // 1. Get user by email. An unknown email yields the same generic error
    //    as a wrong password.
    let creds = state
        .db
        .get_user_by_email(&req.email.trim().to_lowercase())
        .await
        .map_err(|e| match e {
            PortError::NotFound(_) => {
                failure(StatusCode::BAD_REQUEST, "Invalid email or password")
            }
            e => {
                error!("Failed to get user: {:?}", e);
                failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        })?;

    // 2. Verify password. Argon2's verifier compares in constant time.
    let parsed_hash = PasswordHash::new(&creds.hashed_password).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;

    let valid = Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .is_ok();
    if !valid {
        return Err(failure(StatusCode::BAD_REQUEST, "Invalid email or password"));
    }

    // 3. Issue the signed session token.
    let identity = Identity {
        id: creds.id,
        username: creds.username,
        email: creds.email,
    };
    let token = state.tokens.issue(&identity).map_err(|e| {
        error!("Failed to issue token: {:?}", e);
        failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;

    // 4. Set it as an http-only cookie and return the user projection.
    let cookie = session_cookie(&token, state.config.cookie_secure);
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            message: "Login successful".to_string(),
            user: identity.into(),
        }),
    ))
}

/// POST /auth/logout - Discard the session cookie
///
/// Purely client-side: the token itself stays valid until its natural expiry,
/// since there is no server-side revocation list.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful", body = ApiMessage)
    )
)]
pub async fn logout_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cookie = clear_cookie(state.config.cookie_secure);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiMessage {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// GET /auth/status - Report whether the caller is logged in
///
/// Always 200; this is the route that motivates the always-resolve
/// middleware policy.
#[utoipa::path(
    get,
    path = "/auth/status",
    responses(
        (status = 200, description = "Current session status", body = StatusResponse)
    )
)]
pub async fn status_handler(Extension(ctx): Extension<AuthContext>) -> impl IntoResponse {
    let user = ctx.0.map(UserResponse::from);
    Json(StatusResponse {
        is_logged_in: user.is_some(),
        user,
    })
}
