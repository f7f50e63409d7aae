mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::{debug, warn};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads `.env`, the optional YAML file and the environment overrides, in that order.
///
/// `config.yaml` is optional; a path given through `CONFIG_PATH` must exist.
pub async fn load() -> Result<Config> {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        warn!("Failed to read .env file: {}", err);
    }

    let (config_path, required) = match env::var("CONFIG_PATH") {
        Ok(path) => (path, true),
        Err(_) => (DEFAULT_CONFIG_PATH.to_string(), false),
    };

    let mut config = load_from_path(Path::new(&config_path), required).await?;
    config.apply_env(|key| env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

pub async fn load_from_path(path: &Path, required: bool) -> Result<Config> {
    if !required && !tokio::fs::try_exists(path).await? {
        debug!("No configuration file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

impl Config {
    /// Applies environment overrides. `lookup` is `std::env::var` outside of tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
        }
        if let Some(api_key) = lookup("TOGETHER_API_KEY") {
            self.llm.api_key = api_key;
        }
        if let Some(base_url) = lookup("TOGETHER_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Some(model) = lookup("OCR_MODEL") {
            self.llm.model = model;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.llm.api_key.trim().is_empty() {
            return Err(Error::config(
                "Missing API key: set TOGETHER_API_KEY or llm.api_key",
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(Error::config("llm.model must not be empty"));
        }
        if self.upload.field_name.is_empty() {
            return Err(Error::config("upload.field_name must not be empty"));
        }
        if self.upload.max_file_size == 0 {
            return Err(Error::config("upload.max_file_size must be greater than 0"));
        }
        Ok(())
    }
}
