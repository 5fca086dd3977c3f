// src/config.rs
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub db_path: String,
    pub schema_path: String,
    pub max_workers: usize,
    pub graphql_url: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub mapbox_token: String,
    pub mapbox_style: String,
    /// Quiet period before map bounds reach the listing query.
    pub bounds_debounce: Duration,
    /// In-memory explore sessions idle this long are dropped.
    pub explore_idle: Duration,
    /// Persisted view state older than this is purged at startup.
    pub view_state_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            db_path: "househunt.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            max_workers: 8,
            graphql_url: "http://localhost:4000/graphql".to_string(),
            cloudinary_cloud_name: String::new(),
            cloudinary_api_key: String::new(),
            mapbox_token: String::new(),
            mapbox_style: "mapbox://styles/mapbox/streets-v11".to_string(),
            bounds_debounce: Duration::from_millis(200),
            explore_idle: Duration::from_secs(30 * 60),
            view_state_ttl: Duration::from_secs(365 * 24 * 60 * 60),
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults
    /// for anything unset. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(addr) = lookup("HOUSEHUNT_ADDR") {
            cfg.addr = addr
                .parse()
                .map_err(|e| ServerError::Config(format!("HOUSEHUNT_ADDR={addr}: {e}")))?;
        }
        if let Some(path) = lookup("HOUSEHUNT_DB") {
            cfg.db_path = path;
        }
        if let Some(path) = lookup("HOUSEHUNT_SCHEMA") {
            cfg.schema_path = path;
        }
        if let Some(n) = lookup("HOUSEHUNT_WORKERS") {
            cfg.max_workers = n
                .parse()
                .map_err(|e| ServerError::Config(format!("HOUSEHUNT_WORKERS={n}: {e}")))?;
        }
        if let Some(url) = lookup("GRAPHQL_URL") {
            cfg.graphql_url = url;
        }
        if let Some(name) = lookup("CLOUDINARY_CLOUD_NAME") {
            cfg.cloudinary_cloud_name = name;
        }
        if let Some(key) = lookup("CLOUDINARY_KEY") {
            cfg.cloudinary_api_key = key;
        }
        if let Some(token) = lookup("MAPBOX_API_TOKEN") {
            cfg.mapbox_token = token;
        }
        if let Some(style) = lookup("MAPBOX_STYLE") {
            cfg.mapbox_style = style;
        }
        if let Some(ms) = lookup("BOUNDS_DEBOUNCE_MS") {
            let ms: u64 = ms
                .parse()
                .map_err(|e| ServerError::Config(format!("BOUNDS_DEBOUNCE_MS={ms}: {e}")))?;
            cfg.bounds_debounce = Duration::from_millis(ms);
        }

        if let Some(secs) = lookup("EXPLORE_IDLE_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|e| ServerError::Config(format!("EXPLORE_IDLE_SECS={secs}: {e}")))?;
            cfg.explore_idle = Duration::from_secs(secs);
        }
        if let Some(days) = lookup("VIEW_STATE_TTL_DAYS") {
            let days: u64 = days
                .parse()
                .map_err(|e| ServerError::Config(format!("VIEW_STATE_TTL_DAYS={days}: {e}")))?;
            cfg.view_state_ttl = Duration::from_secs(days * 24 * 60 * 60);
        }

        Ok(cfg)
    }
}
