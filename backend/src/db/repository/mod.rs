//! Repository traits and error types.
//!
//! Storage is split by record kind:
//! - [`ScreeningRepository`]: schema lifecycle, health, screening results
//! - [`PolicyRequestRepository`]: policy requests
//!
//! [`FullRepository`] combines both and is what the HTTP layer holds.

pub mod error;
pub mod policy;
pub mod screening;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use policy::PolicyRequestRepository;
pub use screening::ScreeningRepository;

/// Every repository capability the service needs.
pub trait FullRepository: ScreeningRepository + PolicyRequestRepository {}

impl<T> FullRepository for T where T: ScreeningRepository + PolicyRequestRepository {}
