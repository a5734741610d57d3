//! Server configuration assembled from CLI flags and environment variables.

use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const DATABASE_ENV: &str = "TODO_API_DATABASE";
pub const CORS_ORIGINS_ENV: &str = "TODO_API_CORS_ORIGINS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid CORS origin {0:?}")]
    InvalidOrigin(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Where todos are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageLocation {
    File(PathBuf),
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageLocation,
    /// Allowed CORS origins. `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
}

impl Config {
    /// Build a config, letting explicit flags win over the environment.
    ///
    /// With neither a flag nor [`DATABASE_ENV`], todos go to the platform data
    /// directory.
    pub fn resolve(
        host: String,
        port: u16,
        database: Option<PathBuf>,
        in_memory: bool,
    ) -> Result<Self, ConfigError> {
        let storage = if in_memory {
            StorageLocation::Memory
        } else {
            match database.or_else(|| std::env::var(DATABASE_ENV).ok().map(PathBuf::from)) {
                Some(path) => StorageLocation::File(path),
                None => StorageLocation::File(crate::db::default_path()?),
            }
        };

        let cors_origins = std::env::var(CORS_ORIGINS_ENV)
            .ok()
            .map(|s| parse_origins(&s));

        Ok(Self {
            host,
            port,
            storage,
            cors_origins,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cors_layer(&self) -> Result<CorsLayer, ConfigError> {
        let Some(origins) = &self.cors_origins else {
            return Ok(CorsLayer::permissive());
        };

        let origins = origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).map_err(|_| ConfigError::InvalidOrigin(o.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any))
    }
}

fn parse_origins(s: &str) -> Vec<String> {
    s.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
