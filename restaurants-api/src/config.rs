use std::env;
use std::net::SocketAddr;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9090";
pub const DEFAULT_POOL_SIZE: usize = 8;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub pool_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "LISTEN_ADDR",
                value,
            })?,
            None => DEFAULT_LISTEN_ADDR
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    key: "LISTEN_ADDR",
                    value: DEFAULT_LISTEN_ADDR.to_string(),
                })?,
        };

        let pool_size = match lookup("DATABASE_POOL_SIZE") {
            Some(value) => match value.parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DATABASE_POOL_SIZE",
                        value,
                    })
                }
            },
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Config {
            database_url,
            listen_addr,
            pool_size,
        })
    }
}
