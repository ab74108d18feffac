//! Renderer settings.
//!
//! Settings come from compiled defaults or a TOML file:
//!
//! ```toml
//! # upper bound on nodes entered per render call
//! max_steps = 50000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    /// Nodes a single render may enter before the structure is rejected as
    /// malformed. `None` bounds the walk by the number of nodes in the arena.
    pub max_steps: Option<usize>,
}

impl RenderSettings {
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Self::parse(content, Path::new("<inline>"))
    }

    /// Load settings from a TOML file. Missing keys keep their defaults.
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::parse(&content, path)?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let settings = RenderSettings::from_toml_str("").unwrap();
        assert_eq!(settings, RenderSettings::default());
        assert_eq!(settings.max_steps, None);
    }

    #[test]
    fn test_max_steps_from_toml() {
        let settings = RenderSettings::from_toml_str("max_steps = 12").unwrap();
        assert_eq!(settings.max_steps, Some(12));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let err = RenderSettings::from_toml_str("max_steps = \"many\"").unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }
}
