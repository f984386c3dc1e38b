//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_ORIGIN: &str = client::net::api::DEFAULT_API_ORIGIN;

pub const PORT_VAR: &str = "PORT";
pub const API_ORIGIN_VAR: &str = "PORTAL_API_ORIGIN";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {value:?}")]
    InvalidPort { value: String },

    #[error("leptos configuration: {0}")]
    Leptos(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    /// Backend origin published to the browser, without a trailing slash.
    pub api_origin: String,
}

impl HostConfig {
    /// Build host config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PORTAL_API_ORIGIN`: default `http://127.0.0.1:8000`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build host config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw.clone() })?,
            None => DEFAULT_PORT,
        };
        let api_origin = lookup(API_ORIGIN_VAR)
            .map(|raw| raw.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .unwrap_or_else(|| DEFAULT_API_ORIGIN.to_string());

        Ok(Self { port, api_origin })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
