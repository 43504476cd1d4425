//! Platform-specific paths.

use anyhow::Result;
use std::path::PathBuf;

/// Returns true when compiled for Windows.
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Home directory of the current user.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Expand `~` and environment variables (`$VAR`, `${VAR}`) in a user-supplied path.
///
/// ```rust,no_run
/// use permascript::utils::platform::resolve_path;
///
/// # fn example() -> anyhow::Result<()> {
/// let steam = resolve_path("~/.steam/steam")?;
/// # Ok(())
/// # }
/// ```
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .map_err(|e| anyhow::anyhow!("Failed to expand path '{path}': {e}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Places a Steam install is commonly found, in the order they are tried.
pub fn steam_path_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".steam").join("steam"));
        candidates.push(home.join(".local").join("share").join("Steam"));
        candidates.push(home.join("Library").join("Application Support").join("Steam"));
    }
    if is_windows() {
        candidates.push(PathBuf::from(r"C:\Program Files (x86)\Steam"));
        candidates.push(PathBuf::from(r"C:\Program Files\Steam"));
    }

    candidates
}
