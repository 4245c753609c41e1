use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::{env, net::SocketAddr, time::Duration};
use url::Url;

const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_PASSPORT_API_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub passport_api_url: String,
    pub server_addr: SocketAddr,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub passport_api_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup (the process
    /// environment in production).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match non_empty(&lookup, "DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(&lookup),
        };

        let passport_api_url = non_empty(&lookup, "PASSPORT_API_URL")
            .or_else(|| non_empty(&lookup, "API_URL"))
            .ok_or_else(|| anyhow!("PASSPORT_API_URL must be set"))?;
        Url::parse(&passport_api_url)
            .map_err(|e| anyhow!("Invalid PASSPORT_API_URL value {}: {}", passport_api_url, e))?;

        let server_addr_raw =
            non_empty(&lookup, "SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let server_addr: SocketAddr = server_addr_raw
            .parse()
            .map_err(|_| anyhow!("Invalid SERVER_ADDR value: {}", server_addr_raw))?;

        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS);

        let db_acquire_timeout_secs =
            parse_secs(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_DB_ACQUIRE_TIMEOUT_SECS);
        let passport_api_timeout_secs = parse_secs(
            &lookup,
            "PASSPORT_API_TIMEOUT_SECS",
            DEFAULT_PASSPORT_API_TIMEOUT_SECS,
        );
        let request_timeout_secs =
            parse_secs(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Config {
            database_url,
            passport_api_url,
            server_addr,
            db_max_connections,
            db_acquire_timeout_secs,
            passport_api_timeout_secs,
            request_timeout_secs,
        })
    }

    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }

    pub fn passport_api_timeout(&self) -> Duration {
        Duration::from_secs(self.passport_api_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn database_url_from_parts<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let host = non_empty(lookup, "DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = non_empty(lookup, "DB_PORT").unwrap_or_else(|| "5432".to_string());
    let user = non_empty(lookup, "DB_USER").unwrap_or_else(|| "postgres".to_string());
    let name = non_empty(lookup, "DB_NAME").unwrap_or_else(|| "time_tracker".to_string());
    match non_empty(lookup, "DB_PASSWORD") {
        Some(password) => format!("postgres://{user}:{password}@{host}:{port}/{name}"),
        None => format!("postgres://{user}@{host}:{port}/{name}"),
    }
}
