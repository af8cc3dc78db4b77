use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

pub const DEV_JWT_SECRET: &str = "household-lists-dev-secret";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration, read from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_file: PathBuf::from("data.json"),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_secs: 3600,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for
    /// `HOST`, `PORT`, `DATA_FILE`, `JWT_SECRET` and `TOKEN_TTL_SECS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(path) = lookup("DATA_FILE") {
            config.data_file = PathBuf::from(path);
        }
        match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => config.jwt_secret = secret,
            _ => warn!("JWT_SECRET not set, using development secret"),
        }
        if let Some(ttl) = lookup("TOKEN_TTL_SECS") {
            config.token_ttl_secs = ttl
                .parse()
                .ok()
                .filter(|secs: &i64| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "TOKEN_TTL_SECS",
                    value: ttl.clone(),
                })?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
