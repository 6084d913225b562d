//! Configuration for the RT client.
//!
//! Connection settings are loaded from environment variables, with
//! validation to ensure all required values are present.

use std::env;

use url::Url;

use crate::error::RtError;

/// Configuration for connecting to an RT server.
///
/// All fields are required and loaded from environment variables.
/// The password is stored but never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the RT instance (e.g. `https://rt.example.com`).
    pub base_url: String,

    /// Username for authentication.
    pub username: String,

    /// Password for authentication.
    /// This value must never be logged or included in error messages.
    pub password: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `RT_BASE_URL`: Base URL of the RT instance
    /// - `RT_USERNAME`: Username for authentication
    /// - `RT_PASSWORD`: Password for authentication
    ///
    /// # Errors
    ///
    /// Returns `RtError::Config` if any required variable is missing or if
    /// values fail validation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// dotenvy::dotenv().ok();
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, RtError> {
        let base_url = Self::get_required_env("RT_BASE_URL")?;
        let username = Self::get_required_env("RT_USERNAME")?;
        let password = Self::get_required_env("RT_PASSWORD")?;

        let base_url = Self::validate_base_url(base_url)?;

        Ok(Config {
            base_url,
            username,
            password,
        })
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, RtError> {
        env::var(name)
            .map_err(|_| RtError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(RtError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates and normalizes the base URL.
    fn validate_base_url(url: String) -> Result<String, RtError> {
        let url = url.trim().trim_end_matches('/').to_string();

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(RtError::invalid_config(
                "RT_BASE_URL must start with http:// or https://",
            ));
        }

        // Reject URLs the HTTP client would choke on later.
        Url::parse(&url)
            .map_err(|e| RtError::invalid_config(format!("RT_BASE_URL is not a valid URL: {}", e)))?;

        Ok(url)
    }
}
