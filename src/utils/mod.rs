//! Utility modules for permascript
//!
//! - [`fs`] - Directory creation, atomic writes, copies and removal
//! - [`platform`] - Home directory, path expansion, Steam install candidates
//! - [`progress`] - Spinner shown while resolving
//! - [`format`] - Human-readable sizes for the report

pub mod format;
pub mod fs;
pub mod platform;
pub mod progress;

pub use format::format_size;
pub use fs::{atomic_write, copy_file, ensure_dir, is_non_empty_file, remove_dir_all};
pub use platform::{get_home_dir, is_windows, resolve_path};
pub use progress::ProgressSpinner;
