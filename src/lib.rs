//! Books server
//!
//! A small REST JSON API for managing a catalog of book records stored in
//! SQLite.

use std::sync::Arc;

use sqlx::{Pool, Sqlite};

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

impl AppState {
    /// Wire repository and services on top of an open pool, making sure
    /// the schema exists before any handler can run
    pub async fn initialize(config: AppConfig, pool: Pool<Sqlite>) -> AppResult<Self> {
        let repository = repository::Repository::new(pool);
        repository.ensure_schema().await?;

        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
        })
    }
}
