//! Runtime configuration for hosts embedding the form core.
//!
//! # Invariants
//! - Every field has a default; an empty TOML document is a valid config.
//! - Unknown keys are rejected so typos surface early.

use crate::logging::default_log_level;
use crate::signature::DEFAULT_SIGNATURE_PATH;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocformConfig {
    /// Relative path of the default signature image.
    pub signature_path: String,
    /// Directory that relative asset paths resolve against.
    pub asset_dir: PathBuf,
    pub log_level: String,
    /// Absolute log directory; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// SQLite file backing the key-value store.
    pub store_path: Option<PathBuf>,
}

impl Default for DocformConfig {
    fn default() -> Self {
        Self {
            signature_path: DEFAULT_SIGNATURE_PATH.to_string(),
            asset_dir: PathBuf::from("."),
            log_level: default_log_level().to_string(),
            log_dir: None,
            store_path: None,
        }
    }
}

impl DocformConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::Parse)
    }

    /// Loads config from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DocformConfig};
    use std::path::PathBuf;

    #[test]
    fn empty_document_yields_defaults() {
        let config = DocformConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, DocformConfig::default());
        assert_eq!(config.signature_path, "./1.png");
    }

    #[test]
    fn overrides_are_applied() {
        let config = DocformConfig::from_toml_str(
            r#"
            signature_path = "./sig.jpg"
            asset_dir = "/srv/forms"
            store_path = "/tmp/forms.sqlite3"
            "#,
        )
        .expect("config parses");
        assert_eq!(config.signature_path, "./sig.jpg");
        assert_eq!(config.asset_dir, PathBuf::from("/srv/forms"));
        assert_eq!(config.store_path, Some(PathBuf::from("/tmp/forms.sqlite3")));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DocformConfig::from_toml_str("signature = 1").expect_err("unknown key");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
