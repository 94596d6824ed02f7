//! # Eye Screening Backend
//!
//! Vision screening service: serves randomized optotype tests, estimates a
//! rough eyeglass prescription from the matched optotypes, and stores
//! screening results and policy requests.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`vision`]: acuity estimator, evaluation presentation and optotype draws
//! - [`models`]: record types and required-field extraction
//! - [`db`]: repository pattern, storage backends and service layer
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! The estimator is a heuristic for screening only. It is not a clinical
//! measurement.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod db;
pub mod models;
pub mod vision;

#[cfg(feature = "http-server")]
pub mod http;
