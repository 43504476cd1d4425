//! Core types for permascript
//!
//! This module holds the error type shared by every stage of the pipeline and
//! the helpers that turn those errors into colored, actionable CLI output.
//!
//! - [`PermaError`] - Enumerated failure modes of resolution, key lookup and output
//! - [`ErrorContext`] - User-facing wrapper with details and suggestions
//! - [`user_friendly_error`] - Convert any `anyhow::Error` into an [`ErrorContext`]

pub mod error;
mod error_formatting;

pub use error::{ErrorContext, PermaError};
pub use error_formatting::{create_error_context, user_friendly_error};
