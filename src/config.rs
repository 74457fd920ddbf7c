use crate::constants::*;
use std::env;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub data_path: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(String),
    #[error("DATABASE_PATH cannot be empty")]
    EmptyDataPath,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("SERVER_PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
        let data_path = env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());

        Self::new(host, port, data_path)
    }

    /// Builds a config from explicit values, applying the same validation as `from_env`.
    pub fn new(host: String, port: String, data_path: String) -> Result<Self, ConfigError> {
        // Validate port is a valid number
        if port.parse::<u16>().is_err() {
            return Err(ConfigError::InvalidPort(port));
        }
        if data_path.trim().is_empty() {
            return Err(ConfigError::EmptyDataPath);
        }

        Ok(Config {
            host,
            port,
            data_path,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
