//! `fnbridge config` — print the effective configuration.

use std::path::Path;

use anyhow::{Context, Result};
use fnbridge_core::BridgeConfig;
use tracing::debug;

/// Load `fnbridge.toml` from `path`, or the defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<BridgeConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            BridgeConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        None => Ok(BridgeConfig::default()),
    }
}

pub fn show(path: Option<&Path>) -> Result<()> {
    let config = load(path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_is_default() {
        assert_eq!(load(None).unwrap(), BridgeConfig::default());
    }

    #[test]
    fn loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fnbridge.toml");
        std::fs::write(&path, "default_scheme = \"http\"\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.default_scheme, "http");
    }

    #[test]
    fn bad_file_names_path_in_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "default_scheme = [").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }
}
