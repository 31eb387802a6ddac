use crate::error::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

///
/// DiscoveryConfig
///
/// ```toml
/// cache_dir = "var/cache"
/// debug = true
/// ```
///
/// Annotation discovery only activates when `cache_dir` is set. `debug`
/// turns on mtime freshness checks for compiled artifacts.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    pub cache_dir: Option<PathBuf>,
    pub debug: bool,
}

impl DiscoveryConfig {
    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("can't read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(String),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Read { .. } => Self::config_io(err.to_string()),
            ConfigError::Parse(_) => Self::config_unsupported(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorClass, ErrorOrigin};

    #[test]
    fn parses_full_config() {
        let config = DiscoveryConfig::from_toml_str(
            r#"
            cache_dir = "var/cache"
            debug = true
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            DiscoveryConfig::default()
                .with_cache_dir("var/cache")
                .with_debug(true)
        );
    }

    #[test]
    fn empty_config_disables_everything() {
        let config = DiscoveryConfig::from_toml_str("").unwrap();

        assert_eq!(config.cache_dir, None);
        assert!(!config.debug);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DiscoveryConfig::from_toml_str("cache_directory = \"x\"").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)), "unexpected: {err:?}");
        let err = Error::from(err);
        assert_eq!(err.origin, ErrorOrigin::Config);
        assert_eq!(err.class, ErrorClass::Unsupported);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = DiscoveryConfig::load(Path::new("/nonexistent/colgrid.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(Error::from(err).class, ErrorClass::Io);
    }
}
