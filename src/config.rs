use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub salesforce: SalesforceConfig,
    #[serde(default)]
    pub erd: ErdConfig,
}

/// Salesforce connection configuration
///
/// Credential acquisition is out of scope: the access token and instance URL
/// are read from the environment (a `.env` file works via dotenv). Only the
/// variable names and the API version live in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesforceConfig {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,
    #[serde(default = "default_instance_url_env")]
    pub instance_url_env: String,
}

/// Default knobs for ERD generation; CLI flags override these.
#[derive(Debug, Clone, Deserialize)]
pub struct ErdConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// None = unbounded
    #[serde(default)]
    pub max_objects: Option<usize>,
    #[serde(default = "default_max_fields_per_object")]
    pub max_fields_per_object: usize,
    #[serde(default)]
    pub compact: bool,
}

fn default_api_version() -> String {
    "59.0".to_string()
}

fn default_access_token_env() -> String {
    "SF_ACCESS_TOKEN".to_string()
}

fn default_instance_url_env() -> String {
    "SF_INSTANCE_URL".to_string()
}

fn default_max_depth() -> u32 {
    2
}

fn default_max_fields_per_object() -> usize {
    8
}

impl Default for SalesforceConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            access_token_env: default_access_token_env(),
            instance_url_env: default_instance_url_env(),
        }
    }
}

impl Default for ErdConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_objects: None,
            max_fields_per_object: default_max_fields_per_object(),
            compact: false,
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) first.
    /// Looks for the config file in this order:
    /// 1. Path specified in ORGVIZ_CONFIG environment variable
    /// 2. ./config.toml in current directory
    ///
    /// A missing config file is not an error: all settings have defaults and
    /// the CLI flags are the primary surface.
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let explicit = std::env::var("ORGVIZ_CONFIG").map(PathBuf::from).ok();
        let config_path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from("config.toml"));

        if !config_path.exists() {
            if explicit.is_some() {
                anyhow::bail!(
                    "Config file not found: {} (set via ORGVIZ_CONFIG)",
                    config_path.display()
                );
            }
            return Ok(Config::default());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.salesforce.api_version.is_empty() {
            anyhow::bail!("salesforce.api_version must not be empty");
        }

        // Depth above 5 is technically valid but produces unreadable diagrams
        if self.erd.max_depth > 5 {
            log::warn!(
                "erd.max_depth = {} exceeds the recommended range 0-5",
                self.erd.max_depth
            );
        }

        if self.erd.max_fields_per_object == 0 {
            anyhow::bail!("erd.max_fields_per_object must be greater than 0");
        }

        if let Some(max) = self.erd.max_objects {
            if max == 0 {
                anyhow::bail!("erd.max_objects must be greater than 0 when set");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.erd.max_depth, 2);
        assert_eq!(config.erd.max_fields_per_object, 8);
        assert_eq!(config.erd.max_objects, None);
        assert!(!config.erd.compact);
        assert_eq!(config.salesforce.access_token_env, "SF_ACCESS_TOKEN");
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [erd]
            max_depth = 3
            max_objects = 25

            [salesforce]
            api_version = "60.0"
            "#,
        )
        .unwrap();
        assert_eq!(config.erd.max_depth, 3);
        assert_eq!(config.erd.max_objects, Some(25));
        // unset keys fall back to defaults
        assert_eq!(config.erd.max_fields_per_object, 8);
        assert_eq!(config.salesforce.api_version, "60.0");
    }

    #[test]
    fn test_validate_rejects_zero_fields() {
        let config: Config = toml::from_str(
            r#"
            [erd]
            max_fields_per_object = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
