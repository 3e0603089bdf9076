use crate::core::probes::{AREA_TYPES, DEFAULT_AREA_TYPE, DEFAULT_AREA_VALUE, DEFAULT_POOL_SIZE};
use crate::core::ConfigProvider;
use crate::utils::error::{AtlasError, Result};
use crate::utils::validation::{validate_one_of, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "https://atlas.ripe.net/api/v2";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub probes: ProbesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbesConfig {
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_area_type")]
    pub area_type: String,
    #[serde(default = "default_area_value")]
    pub area_value: String,
    #[serde(default)]
    pub tags: String,
    pub default_probe: Option<u32>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

fn default_area_type() -> String {
    DEFAULT_AREA_TYPE.to_string()
}

fn default_area_value() -> String {
    DEFAULT_AREA_VALUE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            key: None,
        }
    }
}

impl Default for ProbesConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            area_type: default_area_type(),
            area_value: default_area_value(),
            tags: String::new(),
            default_probe: None,
        }
    }
}

impl AtlasConfig {
    /// `config.toml` in the platform's per-user config directory for this project.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("net", "RIPE", env!("CARGO_PKG_NAME"))
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a TOML document after expanding `${VAR}` from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AtlasError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables expand to the empty string.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AtlasError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for AtlasConfig {
    fn endpoint(&self) -> &str {
        &self.api.endpoint
    }

    fn api_key(&self) -> Option<&str> {
        self.api.key.as_deref().filter(|key| !key.is_empty())
    }

    fn pool_size(&self) -> u32 {
        self.probes.pool_size
    }

    fn area_type(&self) -> &str {
        &self.probes.area_type
    }

    fn area_value(&self) -> &str {
        &self.probes.area_value
    }

    fn tags(&self) -> &str {
        &self.probes.tags
    }

    fn default_probe(&self) -> Option<u32> {
        self.probes.default_probe.filter(|id| *id != 0)
    }
}

impl Validate for AtlasConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.endpoint", &self.api.endpoint)?;

        // empty falls back to the default selection type
        if !self.probes.area_type.is_empty() {
            validate_one_of("probes.area_type", &self.probes.area_type, &AREA_TYPES)?;
        }

        Ok(())
    }
}
