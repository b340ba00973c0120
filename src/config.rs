use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub storage_endpoint: String,
    pub storage_bucket: String,
    pub storage_region: String,
    pub storage_access_key: String,
    pub storage_secret_key: String,
    /// Optional at boot: the PxWeb metadata route reports a configuration
    /// error while this is unset instead of preventing startup.
    pub pxweb_base_url: Option<String>,
    pub trade_dataset_path: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let storage_endpoint = env_map
            .get("STORAGE_ENDPOINT")
            .map(|s| s.trim_end_matches('/').to_string())
            .ok_or_else(|| ConfigError::MissingEnv("STORAGE_ENDPOINT".to_string()))?;
        validate_http_url("STORAGE_ENDPOINT", &storage_endpoint)?;

        let storage_bucket = env_map
            .get("STORAGE_BUCKET")
            .cloned()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("STORAGE_BUCKET".to_string()))?;

        let storage_region = env_map
            .get("STORAGE_REGION")
            .cloned()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "us-east-1".to_string());

        let storage_access_key = env_map
            .get("STORAGE_ACCESS_KEY")
            .cloned()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("STORAGE_ACCESS_KEY".to_string()))?;

        let storage_secret_key = env_map
            .get("STORAGE_SECRET_KEY")
            .cloned()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("STORAGE_SECRET_KEY".to_string()))?;

        let pxweb_base_url = env_map
            .get("PXWEB_BASE_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());
        if let Some(base) = &pxweb_base_url {
            validate_http_url("PXWEB_BASE_URL", base)?;
        }

        let trade_dataset_path = env_map
            .get("TRADE_DATASET_PATH")
            .cloned()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "data/trade_datasets.json".to_string());

        Ok(Config {
            port,
            storage_endpoint,
            storage_bucket,
            storage_region,
            storage_access_key,
            storage_secret_key,
            pxweb_base_url,
            trade_dataset_path,
        })
    }
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(value).map_err(|e| {
        ConfigError::InvalidValue(key.to_string(), format!("must be a valid URL: {}", e))
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "must be an http(s) URL".to_string(),
        ));
    }
    Ok(())
}
