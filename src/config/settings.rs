//! Process settings read from the environment (`.env` is loaded by the binary via dotenvy).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    /// Postgres URL of the store. `None` runs against the in-memory store.
    pub store_url: Option<String>,
    /// Privileged store credential; applied as the connection password when set.
    pub store_service_key: Option<String>,
    pub store_max_connections: u32,
    pub store_auto_migrate: bool,
    pub bind_addr: SocketAddr,
    /// Bearer token for admin operations. `None` leaves the admin surface open.
    pub admin_token: Option<String>,
    pub body_limit_bytes: usize,
    /// Alternative resource manifest; the bundled one is used when unset.
    pub manifest_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(get("PORT"), "PORT", 3000)?;
        let bind_addr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| ConfigError::Env {
                key: "HOST",
                message: format!("{}:{} is not a socket address ({})", host, port, e),
            })?;

        Ok(Settings {
            store_url: get("STORE_URL").or_else(|| get("DATABASE_URL")),
            store_service_key: get("STORE_SERVICE_KEY"),
            store_max_connections: parse_or(get("STORE_MAX_CONNECTIONS"), "STORE_MAX_CONNECTIONS", 5)?,
            store_auto_migrate: parse_or(get("STORE_AUTO_MIGRATE"), "STORE_AUTO_MIGRATE", false)?,
            bind_addr,
            admin_token: get("ADMIN_TOKEN"),
            body_limit_bytes: parse_or(get("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT)?,
            manifest_path: get("RESOURCE_MANIFEST").map(PathBuf::from),
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Env {
            key,
            message: format!("invalid value {:?}: {}", v, e),
        }),
    }
}
