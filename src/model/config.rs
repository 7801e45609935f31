use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::model::Location;

const ENV_CONFIG_PATH: &str = "SAFETRANSIT_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_SAFETY_DATA_URL: &str = "SAFETY_DATA_URL";
const ENV_SYSTEMS_DATA_URL: &str = "SYSTEMS_DATA_URL";
const ENV_SAFETY_DATA_API_KEY: &str = "SAFETY_DATA_API_KEY";
const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Timeouts applied to the network tiers
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AcquisitionSettings {
    /// Bounded wait for the live data endpoint
    #[serde(default = "default_remote_timeout_ms")]
    pub remote_timeout_ms: u64,
    /// Bounded wait for a single text generation call
    #[serde(default = "default_generation_timeout_ms")]
    pub generation_timeout_ms: u64,
}

fn default_remote_timeout_ms() -> u64 {
    3_000
}

fn default_generation_timeout_ms() -> u64 {
    20_000
}

impl Default for AcquisitionSettings {
    fn default() -> Self {
        Self {
            remote_timeout_ms: default_remote_timeout_ms(),
            generation_timeout_ms: default_generation_timeout_ms(),
        }
    }
}

impl AcquisitionSettings {
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_millis(self.generation_timeout_ms)
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub acquisition: AcquisitionSettings,
    #[serde(default)]
    pub default_location: Option<Location>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    /// Live safety snapshot endpoint
    pub safety_data_url: Option<Url>,
    /// Live systems map endpoint
    pub systems_data_url: Option<Url>,
    /// Credential for both live endpoints
    pub data_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub acquisition: AcquisitionSettings,
    pub default_location: Location,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            safety_data_url: None,
            systems_data_url: None,
            data_api_key: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            acquisition: AcquisitionSettings::default(),
            default_location: Location::delhi(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// Blank values count as unset.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let port = get("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080);
        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let config_path =
            get(ENV_CONFIG_PATH).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let file = Self::load_config_file(&config_path).unwrap_or_default();

        Self {
            port,
            host,
            safety_data_url: get(ENV_SAFETY_DATA_URL).and_then(|u| parse_url(ENV_SAFETY_DATA_URL, &u)),
            systems_data_url: get(ENV_SYSTEMS_DATA_URL)
                .and_then(|u| parse_url(ENV_SYSTEMS_DATA_URL, &u)),
            data_api_key: get(ENV_SAFETY_DATA_API_KEY),
            gemini_api_key: get(ENV_GEMINI_API_KEY),
            gemini_model: get(ENV_GEMINI_MODEL).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            acquisition: file.acquisition,
            default_location: file.default_location.unwrap_or_else(Location::delhi),
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_url(key: &str, value: &str) -> Option<Url> {
    match Url::parse(value) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(variable = key, error = %e, "Ignoring invalid URL");
            None
        }
    }
}
