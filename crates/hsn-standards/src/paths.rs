//! Reference table path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the reference table location.
pub const TABLE_ENV_VAR: &str = "HSN_TABLE_PATH";

/// Relative path used when nothing else is configured.
pub const DEFAULT_TABLE_PATH: &str = "data/hsn_codes.csv";

/// Get the reference table path.
///
/// Resolution order:
/// 1. `explicit` (command-line flag)
/// 2. `HSN_TABLE_PATH` environment variable
/// 3. `configured` (config file)
/// 4. `data/hsn_codes.csv` relative to the working directory
pub fn table_path(explicit: Option<&Path>, configured: Option<&Path>) -> PathBuf {
    let env = std::env::var(TABLE_ENV_VAR).ok();
    resolve_table_path(explicit, env.as_deref(), configured)
}

/// [`table_path`] with the environment value passed in.
pub fn resolve_table_path(
    explicit: Option<&Path>,
    env: Option<&str>,
    configured: Option<&Path>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(path) = env
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }
    configured.map_or_else(|| PathBuf::from(DEFAULT_TABLE_PATH), Path::to_path_buf)
}
