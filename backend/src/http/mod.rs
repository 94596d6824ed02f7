//! HTTP server module for the eye screening service.
//!
//! This module provides an axum-based HTTP server that exposes the vision
//! test and record storage as a REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and required-field checks              │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, compression, error handling                      │
//! └─────────────┬──────────────────────────┬─────────────────┘
//!               │                          │
//! ┌─────────────▼──────────────┐ ┌─────────▼────────────────┐
//! │  vision                    │ │  db::services            │
//! │  - acuity estimator        │ │  - store / fetch records │
//! │  - optotype draws          │ │                          │
//! └────────────────────────────┘ └─────────┬────────────────┘
//!                                          │
//!                               ┌──────────▼───────────────┐
//!                               │  Repository Layer (db/)  │
//!                               │  Local / Sqlite          │
//!                               └──────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
