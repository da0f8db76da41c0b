//! Config loading with schema checks and invariant validation.
//!
//! Reads JSON5 sources, validates their shape with field-qualified errors,
//! and produces a final `RegistryConfig`.

mod schema;

#[cfg(test)]
mod tests;

use crate::{ConfigError, MAX_PARALLEL_LIMIT, RegistryConfig};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::Path;

impl RegistryConfig {
    /// Load a config from a JSON5 file.
    ///
    /// Relative `source.dir` entries are resolved against the file's parent
    /// directory.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config from path: {}", path.display());
        let contents = fs::read_to_string(path)?;
        let value: Value = json5::from_str(&contents)?;
        let mut config = config_from_value(value, &path.display().to_string())?;
        if let (Some(source), Some(parent)) = (config.source.as_mut(), path.parent()) {
            if source.dir.is_relative() {
                source.dir = parent.join(&source.dir);
                debug!("resolved blob source dir: {}", source.dir.display());
            }
        }
        Ok(config)
    }

    /// Load a config from JSON5 contents.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        config_from_value(value, "config")
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.marker.trim().is_empty() {
            return Err(ConfigError::Invalid("marker must not be empty".to_string()));
        }
        match self.max_parallel {
            Some(0) => {
                return Err(ConfigError::Invalid(
                    "max_parallel must be at least 1".to_string(),
                ));
            }
            Some(value) if value > MAX_PARALLEL_LIMIT => {
                return Err(ConfigError::Invalid(format!(
                    "max_parallel must be at most {MAX_PARALLEL_LIMIT}"
                )));
            }
            _ => {}
        }
        if let Some(source) = &self.source {
            if source.extension.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "source.extension must not be empty".to_string(),
                ));
            }
            if source.extension.starts_with('.') {
                return Err(ConfigError::Invalid(
                    "source.extension must not start with a dot".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn config_from_value(value: Value, label: &str) -> Result<RegistryConfig, ConfigError> {
    schema::validate_schema(&value, label)?;
    let config: RegistryConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
