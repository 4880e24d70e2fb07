//! # Config Commands
//!
//! Retrieving and saving the active configuration.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ApiError;
use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - Showing the tax rate next to cart totals
/// - Currency formatting
/// - Checking which database file is in use
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Writes the active configuration as TOML.
///
/// `path` defaults to the platform config file, the same file `load` reads
/// when no `--config` is given.
///
/// ## Returns
/// The path written.
pub fn save_config(config: &ConfigState, path: Option<&Path>) -> Result<PathBuf, ApiError> {
    debug!(?path, "save_config command");

    let path = match path {
        Some(path) => path.to_path_buf(),
        None => ConfigState::default_config_path()
            .ok_or_else(|| ApiError::io("Could not determine config directory"))?,
    };
    config.save(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_returns_copy() {
        let config = ConfigState {
            marketplace_name: "Loft".to_string(),
            ..ConfigState::default()
        };
        assert_eq!(get_config(&config), config);
    }

    #[test]
    fn test_save_config_writes_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("artvault.toml");
        let config = ConfigState {
            tax_rate_bps: 825,
            ..ConfigState::default()
        };

        let written = save_config(&config, Some(&path)).unwrap();

        assert_eq!(written, path);
        assert_eq!(ConfigState::from_file(&path).unwrap(), config);
    }
}
