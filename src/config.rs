//! Runtime configuration for the public site and admin panel clients.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two base URLs drive every outbound interaction: the REST backend consumed
//! by the data-fetch controllers and the administrative origin probed by the
//! auth handshake. Both fall back to local-development values.
//!
//! WASM builds have no process environment, so the browser bundle reads the
//! values baked in at compile time (`from_build_env`); SSR and native tests
//! read the live environment (`from_env`).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use url::Url;

pub const API_BASE_URL_VAR: &str = "HALAQA_API_BASE_URL";
pub const ADMIN_BASE_URL_VAR: &str = "HALAQA_ADMIN_BASE_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_ADMIN_BASE_URL: &str = "http://localhost:3001";

/// Configuration values that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must use http or https: {value}")]
    UnsupportedScheme { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend REST API root, without a trailing slash.
    pub api_base_url: String,
    /// Administrative origin root, without a trailing slash.
    pub admin_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            admin_base_url: DEFAULT_ADMIN_BASE_URL.to_owned(),
        }
    }
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `HALAQA_API_BASE_URL`: default `http://localhost:8080/api`
    /// - `HALAQA_ADMIN_BASE_URL`: default `http://localhost:3001`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a value is set but is not an absolute
    /// http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from values captured when the crate was compiled.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match key {
            API_BASE_URL_VAR => option_env!("HALAQA_API_BASE_URL").map(str::to_owned),
            ADMIN_BASE_URL_VAR => option_env!("HALAQA_ADMIN_BASE_URL").map(str::to_owned),
            _ => None,
        })
    }

    /// Build config from an arbitrary key lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &'static str, default: &str| -> Result<String, ConfigError> {
            let raw = lookup(var)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_owned());
            parse_base_url(var, &raw)
        };

        Ok(Self {
            api_base_url: read(API_BASE_URL_VAR, DEFAULT_API_BASE_URL)?,
            admin_base_url: read(ADMIN_BASE_URL_VAR, DEFAULT_ADMIN_BASE_URL)?,
        })
    }

    /// Serialized origin (`scheme://host[:port]`) of the admin base URL.
    pub fn admin_origin(&self) -> Option<String> {
        origin_of(&self.admin_base_url)
    }
}

fn parse_base_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw).map_err(|_| ConfigError::InvalidUrl { var, value: raw.to_owned() })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme { var, value: raw.to_owned() });
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

/// Normalize a URL to its serialized origin, or `None` for opaque origins.
pub fn origin_of(raw: &str) -> Option<String> {
    let origin = Url::parse(raw).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}
