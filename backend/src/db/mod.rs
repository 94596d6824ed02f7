//! Database module for screening and policy request storage.
//!
//! This module provides abstractions for database operations via the Repository pattern,
//! allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - logging, error context   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────────┐
//!     │  LocalRepository │ SqliteRepository │
//!     │   (in-memory)    │  (Diesel, r2d2)  │
//!     └──────────────────────────────────┘
//! ```
//!
//! The module includes:
//! - `services`: High-level functions used by the HTTP layer
//! - `repository`: Trait definitions and error types
//! - `repositories::sqlite`: SQLite implementation with Diesel ORM (`sqlite-repo` feature)
//! - `repositories::local`: In-memory implementation for unit testing and local development
//! - `factory`: Factory and builder for creating repository instances
//! - `config` / `repo_config`: environment and `repository.toml` settings

#[cfg(not(any(feature = "sqlite-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod config;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

pub use config::SqliteConfig;
#[cfg(feature = "sqlite-repo")]
pub use repositories::sqlite::PoolStats;

pub use services::{
    get_policy_request, get_screening, health_check, init_schema, storage_summary,
    store_policy_request, store_screening, StorageSummary,
};

pub use repo_config::RepositoryConfig;

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
#[cfg(feature = "sqlite-repo")]
pub use repositories::SqliteRepository;
pub use repository::{
    ErrorContext, FullRepository, PolicyRequestRepository, RepositoryError, RepositoryResult,
    ScreeningRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

fn create_selected_repository() -> RepositoryResult<Arc<dyn FullRepository>> {
    match RepositoryConfig::from_default_location() {
        Ok(config) => {
            log::info!("Using repository settings from repository.toml");
            RepositoryFactory::from_repository_config(&config)
        }
        Err(_) => RepositoryFactory::from_env(),
    }
}

/// Initialize the global repository for the configured backend.
///
/// `repository.toml` wins over environment variables. Calling this more than
/// once keeps the first repository.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = create_selected_repository().context("Failed to create repository")?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        init_repository()?;
    }

    REPOSITORY
        .get()
        .context("Database not initialized. Call init_repository() first.")
}
