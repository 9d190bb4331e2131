//! Optional TOML configuration for the `itax` binary.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! file = "itax.log"
//!
//! [insights]
//! backend = "rules"
//! timeout_secs = 10
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use itax_core::advisory::InsightConfig;
use serde::Deserialize;
use thiserror::Error;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILENAME: &str = "itax.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Append log records to this file as well as stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub insights: InsightConfig,
}

impl AppConfig {
    /// Loads configuration from `path`, or from [`DEFAULT_CONFIG_FILENAME`]
    /// when present. Without either, defaults are used.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::NotFound`] if an explicit `path` does not exist.
    /// * [`ConfigError::Read`] or [`ConfigError::Parse`] if the file cannot
    ///   be read or is not valid TOML for this layout.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::read(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILENAME);
                if fallback.is_file() {
                    Self::read(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.insights.backend, "none");
    }

    #[test]
    fn sections_override_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [logging]
            level = "debug"
            file = "itax.log"

            [insights]
            backend = "rules"
            model_id = "some-model"
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("itax.log")));
        assert_eq!(config.insights.backend, "rules");
        assert_eq!(config.insights.model_id.as_deref(), Some("some-model"));
        assert_eq!(config.insights.timeout_secs, 30);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let path = Path::new("definitely/not/here/itax.toml");

        match AppConfig::load(Some(path)) {
            Err(ConfigError::NotFound(missing)) => assert_eq!(missing, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = std::env::temp_dir().join(format!("itax-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.toml");
        fs::write(&path, "[logging\nlevel = ").unwrap();

        let err = AppConfig::load(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
