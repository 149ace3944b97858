//! ProfiCo Inventory Management
//!
//! A REST JSON API server for tracking company equipment, software
//! subscriptions, billing and user roles. Equipment moves through a
//! lifecycle state machine whose every transition is recorded in an
//! append-only history ledger.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
