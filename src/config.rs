//! Configuration management for contact-desk.
//!
//! This module handles loading and validating configuration from environment variables.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default name of the storage bucket holding avatar images.
pub const DEFAULT_BUCKET: &str = "contact-images";

/// Configuration for the contact-desk backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted backend (project URL)
    pub supabase_url: String,

    /// API key sent as both `apikey` and bearer token
    pub supabase_api_key: String,

    /// Storage bucket for avatar images (default: "contact-images")
    pub storage_bucket: String,

    /// Contact list cache TTL in seconds (default: 60)
    pub list_cache_ttl_secs: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `SUPABASE_URL`: Base URL of the hosted backend
    /// - `SUPABASE_API_KEY`: API key for authentication
    ///
    /// Optional environment variables:
    /// - `CONTACT_IMAGES_BUCKET`: Storage bucket name (default: "contact-images")
    /// - `LIST_CACHE_TTL_SECS`: Contact list cache TTL in seconds (default: 60)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let supabase_url = env::var("SUPABASE_URL")
            .map_err(|_| ConfigError::MissingVar("SUPABASE_URL".to_string()))?;

        let supabase_api_key = env::var("SUPABASE_API_KEY")
            .map_err(|_| ConfigError::MissingVar("SUPABASE_API_KEY".to_string()))?;

        // Validate base URL format
        if !supabase_url.starts_with("http://") && !supabase_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "SUPABASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        // Validate API key is not empty
        if supabase_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "SUPABASE_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let storage_bucket =
            env::var("CONTACT_IMAGES_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string());

        if storage_bucket.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CONTACT_IMAGES_BUCKET".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let list_cache_ttl_secs = Self::parse_env_u64("LIST_CACHE_TTL_SECS", 60)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            supabase_url,
            supabase_api_key,
            storage_bucket,
            list_cache_ttl_secs,
            request_timeout,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            supabase_url: String::new(),
            supabase_api_key: String::new(),
            storage_bucket: DEFAULT_BUCKET.to_string(),
            list_cache_ttl_secs: 60,
            request_timeout: 10,
            log_level: "info".to_string(),
        }
    }
}
