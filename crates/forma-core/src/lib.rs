//! # forma-core
//!
//! Core types for the forma form library. This crate has zero workspace
//! dependencies and provides the foundation for the form engine:
//!
//! ## Modules
//!
//! - [`error`] - Validation and contract-violation error types
//! - [`logging`] - Tracing-based logging integration
//! - [`utils`] - Utility types (`MultiValueDict`, text helpers)

pub mod error;
pub mod logging;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{ErrorKind, FormError, FormResult, ValidationError};
