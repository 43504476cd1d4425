//! Error formatting utilities for permascript
//!
//! Converts internal errors into clear, actionable messages for users.

use super::*;

/// Keywords that indicate network-related errors
const NETWORK_ERROR_KEYWORDS: &[&str] = &["network", "connection", "timed out", "dns"];

/// Keywords that indicate permission-related errors
const PERMISSION_ERROR_KEYWORDS: &[&str] = &["permission", "denied", "access"];

/// Convert any error into a user-friendly format with contextual suggestions
///
/// The error chain is walked looking for a [`PermaError`]; the first one found
/// decides the suggestion. Bare I/O errors and keyword matches on the message
/// are used as fallbacks.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let mut current_error: &dyn std::error::Error = error.as_ref();
    loop {
        if let Some(perma_error) = current_error.downcast_ref::<PermaError>() {
            return create_error_context(perma_error);
        }

        match current_error.source() {
            Some(source) => current_error = source,
            None => break,
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => create_error_context(&PermaError::PermissionDenied {
                operation: "file access".to_string(),
                path: "file path not specified in error context".to_string(),
            }),
            std::io::ErrorKind::NotFound => create_error_context(&PermaError::FileSystemError {
                operation: "file not found".to_string(),
                path: "file path not specified in error context".to_string(),
            }),
            _ => ErrorContext::new(PermaError::FileSystemError {
                operation: "file operation".to_string(),
                path: "unknown path".to_string(),
            })
            .with_suggestion("Check file permissions and disk space")
            .with_details(format!("IO error: {io_error}")),
        };
    }

    let error_msg = format!("{error:#}");
    let lowered = error_msg.to_lowercase();

    if NETWORK_ERROR_KEYWORDS.iter().any(|&keyword| lowered.contains(keyword)) {
        return ErrorContext::new(PermaError::Other {
            message: error_msg,
        })
        .with_suggestion("Check your internet connection, or use --appinfo-dir to work offline");
    }

    if PERMISSION_ERROR_KEYWORDS.iter().any(|&keyword| lowered.contains(keyword)) {
        return ErrorContext::new(PermaError::Other {
            message: error_msg,
        })
        .with_suggestion("Check file permissions and try running with appropriate privileges");
    }

    ErrorContext::new(PermaError::Other {
        message: error_msg,
    })
    .with_suggestion("Re-run with --verbose for more details")
}

/// Create a user-friendly error context from a [`PermaError`]
pub fn create_error_context(error: &PermaError) -> ErrorContext {
    let ctx = ErrorContext::new(error.clone());
    match error {
        PermaError::AppNotFound {
            app_id,
            reason,
        } => ctx
            .with_suggestion("Check that the app id is correct and the app-info source is reachable")
            .with_details(format!("App {app_id}: {reason}")),
        PermaError::MalformedAppInfo {
            app_id,
            source,
        } => ctx
            .with_suggestion("The app-info source returned an unexpected document; try again later")
            .with_details(format!("App {app_id}: {source}")),
        PermaError::FetchFailed {
            ..
        } => ctx.with_suggestion(
            "Check your internet connection, or use --appinfo-dir to work offline",
        ),
        PermaError::KeyStoreUnavailable {
            path,
            reason,
        } => ctx
            .with_suggestion("Make sure Steam has been started at least once with this account")
            .with_details(format!("{path}: {reason}")),
        PermaError::NoDepotsFound {
            ..
        } => ctx.with_suggestion("The app has no public depots; check the app id"),
        PermaError::NoDecryptionKeys {
            ..
        } => ctx
            .with_suggestion(
                "Download the game completely with an owning account and launch it once",
            )
            .with_details("Steam only records depot decryption keys after a successful download"),
        PermaError::SteamPathNotFound => ctx
            .with_suggestion("Pass --steam-path or run 'permascript config set steam_path <DIR>'")
            .with_details("No Steam install was found in the default locations"),
        PermaError::InvalidAppId {
            ..
        } => ctx.with_suggestion("App ids are positive decimal numbers, e.g. 730"),
        PermaError::ConfigError {
            ..
        }
        | PermaError::TomlError(_) => ctx.with_suggestion(
            "Check the configuration file syntax ('permascript config path' shows its location)",
        ),
        PermaError::FileSystemError {
            operation,
            path,
        } => ctx
            .with_suggestion("Check that the path exists and you have the necessary permissions")
            .with_details(format!("Failed to {operation} at path: {path}")),
        PermaError::PermissionDenied {
            ..
        } => ctx.with_suggestion("Check file permissions and try running with appropriate privileges"),
        PermaError::IoError(_)
        | PermaError::Other {
            ..
        } => ctx.with_suggestion("Re-run with --verbose for more details"),
    }
}
