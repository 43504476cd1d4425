//! Error handling for permascript
//!
//! This module provides the error types and user-friendly error reporting for the
//! permascript pipeline. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling inside the resolution engine
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`PermaError`] - Enumerated error types for every failure the pipeline reports
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! # Error Categories
//!
//! - **Resolution**: [`PermaError::AppNotFound`], [`PermaError::MalformedAppInfo`],
//!   [`PermaError::FetchFailed`], [`PermaError::NoDepotsFound`]
//! - **Key store**: [`PermaError::KeyStoreUnavailable`], [`PermaError::NoDecryptionKeys`]
//! - **Environment**: [`PermaError::SteamPathNotFound`], [`PermaError::ConfigError`]
//! - **File system**: [`PermaError::FileSystemError`], [`PermaError::PermissionDenied`]
//!
//! # Propagation policy
//!
//! Failures while expanding a DLC branch never surface as errors: the resolver
//! converts them into placeholder records. Only failures for the root identifier
//! reach the caller. A [`PermaError::KeyStoreUnavailable`] is downgraded by the CLI
//! to a warning; the resulting absence of keys is then reported as
//! [`PermaError::NoDecryptionKeys`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use permascript::core::{PermaError, user_friendly_error};
//!
//! let err = PermaError::AppNotFound {
//!     app_id: 10,
//!     reason: "remote returned an error payload".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(err));
//! ctx.display(); // colored error with suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::vdf::VdfParseError;

/// The main error type for permascript operations
///
/// Each variant carries the identifiers and paths needed to explain the failure
/// to a user without re-deriving context at the display site.
#[derive(Error, Debug)]
pub enum PermaError {
    /// The app-info source returned nothing usable for an identifier
    ///
    /// Raised when the fetch fails, the body is empty, or the body carries the
    /// remote error marker. For DLC identifiers the resolver turns this into a
    /// placeholder record instead of returning it.
    #[error("No app info available for app {app_id}")]
    AppNotFound {
        /// The identifier that could not be resolved
        app_id: u32,
        /// Why the payload was rejected
        reason: String,
    },

    /// The app-info payload was fetched but is not a valid VDF document
    #[error("App info for app {app_id} is malformed")]
    MalformedAppInfo {
        /// The identifier whose payload failed to parse
        app_id: u32,
        /// Position and nature of the parse failure
        #[source]
        source: VdfParseError,
    },

    /// Transport-level failure talking to the app-info source
    #[error("Failed to fetch app info for app {app_id}: {reason}")]
    FetchFailed {
        /// The identifier being fetched
        app_id: u32,
        /// Transport error description
        reason: String,
    },

    /// The local key store could not be read or parsed
    #[error("Key store unavailable at {path}")]
    KeyStoreUnavailable {
        /// Path of the key store file
        path: String,
        /// Why it could not be used
        reason: String,
    },

    /// Resolution succeeded but produced no depot records at all
    #[error("No depot information found for app {app_id}")]
    NoDepotsFound {
        /// The root identifier
        app_id: u32,
    },

    /// None of the resolved depots has a decryption key in the key store
    #[error("No decryption keys found for app {app_id}")]
    NoDecryptionKeys {
        /// The root identifier
        app_id: u32,
    },

    /// The Steam install directory could not be located
    #[error("Steam installation not found")]
    SteamPathNotFound,

    /// User input did not contain a usable app identifier
    #[error("Invalid app id: '{input}'")]
    InvalidAppId {
        /// The raw input
        input: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// File system operation failed
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation that failed (e.g. "copy manifest")
        operation: String,
        /// The path involved
        path: String,
    },

    /// Permission denied
    #[error("Permission denied: {operation} on {path}")]
    PermissionDenied {
        /// The operation that was refused
        operation: String,
        /// The path involved
        path: String,
    },

    /// Standard I/O error
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// TOML parsing error from the global configuration
    #[error(transparent)]
    TomlError(#[from] toml::de::Error),

    /// Anything else
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl Clone for PermaError {
    fn clone(&self) -> Self {
        match self {
            Self::AppNotFound {
                app_id,
                reason,
            } => Self::AppNotFound {
                app_id: *app_id,
                reason: reason.clone(),
            },
            Self::MalformedAppInfo {
                app_id,
                source,
            } => Self::MalformedAppInfo {
                app_id: *app_id,
                source: source.clone(),
            },
            Self::FetchFailed {
                app_id,
                reason,
            } => Self::FetchFailed {
                app_id: *app_id,
                reason: reason.clone(),
            },
            Self::KeyStoreUnavailable {
                path,
                reason,
            } => Self::KeyStoreUnavailable {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::NoDepotsFound {
                app_id,
            } => Self::NoDepotsFound {
                app_id: *app_id,
            },
            Self::NoDecryptionKeys {
                app_id,
            } => Self::NoDecryptionKeys {
                app_id: *app_id,
            },
            Self::SteamPathNotFound => Self::SteamPathNotFound,
            Self::InvalidAppId {
                input,
            } => Self::InvalidAppId {
                input: input.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::PermissionDenied {
                operation,
                path,
            } => Self::PermissionDenied {
                operation: operation.clone(),
                path: path.clone(),
            },
            // io and toml errors are not Clone
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context in yellow (optional)
/// 3. **Suggestion**: Actionable steps in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use permascript::core::{ErrorContext, PermaError};
///
/// let context = ErrorContext::new(PermaError::SteamPathNotFound)
///     .with_suggestion("Pass --steam-path or set steam_path in the config file")
///     .with_details("No Steam install was found in the default locations");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PermaError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: PermaError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
