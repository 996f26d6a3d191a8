use crate::render::RenderConfig;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io,
    path::{Path, PathBuf},
};
use stepwise_core::SolverConfig;
use thiserror::Error;

/// The configuration file looked for in the working directory.
pub const DEFAULT_PATH: &str = "stepwise.toml";

/// An error that occurred while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    #[error("invalid configuration file `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Configuration of the external tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The external solver.
    pub solver: SolverConfig,

    /// The external renderer.
    pub render: RenderConfig,
}

impl Config {
    /// Reads the configuration from the given file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Loads the configuration.
    ///
    /// If a path is given, the file must exist and be valid. Otherwise, [`DEFAULT_PATH`] is read
    /// if it exists; if it cannot be read or parsed, the problem is logged and the defaults are
    /// used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let path = Path::new(DEFAULT_PATH);
        if !path.exists() {
            return Ok(Self::default());
        }

        match Self::from_file(path) {
            Ok(config) => {
                info!("loaded configuration from `{}`", path.display());
                Ok(config)
            },
            Err(err) => {
                warn!("{}; using defaults", err);
                Ok(Self::default())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Quality;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file() {
        let config: Config = toml::from_str(r#"
[solver]
timeout_secs = 30
retry = false

[render]
quality = "h"
"#).unwrap();

        assert_eq!(config.solver.timeout_secs, 30);
        assert!(!config.solver.retry);
        assert_eq!(config.solver.program, "node");
        assert_eq!(config.render.quality, Quality::H);
        assert_eq!(config.render.program, "manim");
    }

    #[test]
    fn empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn explicit_file_must_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[solver]\ntimeout_secs = \"soon\"\n").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Parse { .. })));
    }
}
