//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_MAPS_API_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Configuración del entorno
#[derive(Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Orígenes del frontend permitidos por CORS
    pub cors_origins: Vec<String>,
    pub google_maps_key: String,
    pub maps_api_base_url: String,
    pub upstream_timeout_secs: u64,
}

impl std::fmt::Debug for EnvironmentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentConfig")
            .field("environment", &self.environment)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("cors_origins", &self.cors_origins)
            .field("google_maps_key", &"***")
            .field("maps_api_base_url", &self.maps_api_base_url)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .finish()
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Construir la configuración a partir de una función de búsqueda
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let google_maps_key = var("GOOGLE_MAPS_KEY").ok_or_else(|| anyhow!("GOOGLE_MAPS_KEY must be set"))?;

        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow!("PORT must be a valid number: {}", e))?,
            None => 3000,
        };

        let upstream_timeout_secs = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow!("UPSTREAM_TIMEOUT_SECS must be a valid number: {}", e))?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };
        if upstream_timeout_secs == 0 {
            return Err(anyhow!("UPSTREAM_TIMEOUT_SECS must be greater than zero"));
        }

        let cors_origins = var("CLIENT_ORIGIN")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().trim_end_matches('/').to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            cors_origins,
            google_maps_key,
            maps_api_base_url: var("MAPS_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_MAPS_API_BASE_URL.to_string()),
            upstream_timeout_secs,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Origen principal del frontend, para el health check
    pub fn primary_origin(&self) -> Option<&str> {
        self.cors_origins.first().map(String::as_str)
    }
}
