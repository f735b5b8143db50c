pub mod batch;
pub mod config;
pub mod extract;

use std::path::{Path, PathBuf};

use rcpt_core::RcptConfig;

/// Location of the user configuration file (`<config dir>/rcpt/config.json`).
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rcpt")
        .join("config.json")
}

/// Resolve the configuration file path: the explicit one, or the default location.
pub fn config_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration from an explicit path, or from the default location
/// when that file exists, else fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RcptConfig> {
    match config_path {
        Some(path) => Ok(RcptConfig::from_file(Path::new(path))?),
        None => load_or_default(&default_config_path()),
    }
}

/// Read `path` if it exists, otherwise return the default configuration.
pub fn load_or_default(path: &Path) -> anyhow::Result<RcptConfig> {
    if path.exists() {
        Ok(RcptConfig::from_file(path)?)
    } else {
        Ok(RcptConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_prefers_explicit() {
        assert_eq!(config_path(Some("x/c.json")), PathBuf::from("x/c.json"));
        assert_eq!(config_path(None), default_config_path());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(
            config.extraction.summary_keywords,
            RcptConfig::default().extraction.summary_keywords
        );
    }
}
