//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] over a single JSON document.  Missing fields take
//! their defaults; the result is range-checked before it is returned.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::RigConfig;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "rigio.json";

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<RigConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError(e.to_string()),
        })?;
        let config: RigConfig =
            serde_json::from_str(&text).map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        config.validate()?;
        info!("config: loaded {}", self.path.display());
        Ok(config)
    }
}
