//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::token::TokenService;
use mindgarden_core::ports::{ChatCompanionService, DatabaseService};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers. Everything in here is a read-only singleton safe for concurrent
/// use: the pool-backed database adapter, the provider client, and the token
/// service with its signing secret.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub config: Arc<Config>,
    pub tokens: TokenService,
    pub chat_adapter: Arc<dyn ChatCompanionService>,
}
