//! Application configuration
//!
//! Configuration is read from one of two places:
//! - **Explicit**: a TOML file passed on the command line
//! - **Platform**: `dclock` in the platform config dir, managed by `confy`
//!   (created with defaults on first use)
//!
//! Every field is defaulted, so partial files are fine.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dclock_types::ClockAppearance;
use serde::{Deserialize, Serialize};

use crate::sampler::DEFAULT_SAMPLE_INTERVAL;

const APP_NAME: &str = "dclock";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sampling cadence for live mode, in milliseconds
    pub sample_interval_ms: u64,
    /// Where live mode writes its frames when no path is given
    pub output_path: Option<PathBuf>,
    pub appearance: ClockAppearance,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL.as_millis() as u64,
            output_path: None,
            appearance: ClockAppearance::default(),
        }
    }
}

impl AppConfig {
    /// Sampling cadence, never shorter than 1ms
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms.max(1))
    }
}

/// Load configuration from `path`, or from the platform config dir when
/// `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => load_file(path),
        None => confy::load(APP_NAME, None).map_err(|source| ConfigError::Platform { source }),
    }
}

/// Location of the platform config file, if it can be determined
pub fn default_config_path() -> Option<PathBuf> {
    confy::get_configuration_file_path(APP_NAME, None).ok()
}

/// Write `config` as TOML to `path`
pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let contents = to_toml(config).map_err(|source| ConfigError::SerializeError {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, contents).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })
}

/// Render `config` as pretty TOML
pub fn to_toml(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

fn load_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Errors that can occur during config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Serialize error for {path:?}: {source}")]
    SerializeError {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Platform config error: {source}")]
    Platform { source: confy::ConfyError },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
sample_interval_ms = 250

[appearance]
neon_width = 6.0
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.sample_interval(), Duration::from_millis(250));
        assert_eq!(config.appearance.neon_width, 6.0);
        assert_eq!(config.appearance.spacing, dclock_types::DEFAULT_SPACING);
        assert_eq!(config.output_path, None);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = AppConfig {
            sample_interval_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.sample_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dclock.toml");
        let config = AppConfig {
            sample_interval_ms: 500,
            output_path: Some(PathBuf::from("/tmp/clock.png")),
            ..AppConfig::default()
        };

        save_config(&path, &config).unwrap();
        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_config(Some(Path::new("/nonexistent/dclock.toml"))).unwrap_err();
        match err {
            ConfigError::IoError { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/dclock.toml"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "sample_interval_ms = \"fast\"").unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
