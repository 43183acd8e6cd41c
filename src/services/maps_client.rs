//! Cliente HTTP del proveedor de mapas
//!
//! Ejecuta un `UpstreamRequest` contra Google Maps y devuelve el JSON crudo.
//! Está detrás del trait `MapsProvider` para poder sustituirlo en tests.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::services::waypoint_translator::UpstreamRequest;
use crate::utils::errors::{upstream_error, AppError, AppResult};

/// Colaborador de red: una llamada por request entrante
#[async_trait]
pub trait MapsProvider: Send + Sync {
    async fn fetch(&self, request: &UpstreamRequest) -> AppResult<Value>;
}

pub struct GoogleMapsClient {
    client: Client,
    timeout: Duration,
}

impl GoogleMapsClient {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("CourierRoutePlanner/1.0")
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    fn map_transport_error(&self, error: reqwest::Error) -> AppError {
        // reqwest incluye la URL (con la credencial) en el mensaje
        let error = error.without_url();
        if error.is_timeout() {
            upstream_error(
                "Maps provider did not respond in time",
                json!({ "status": "TIMEOUT", "timeout_secs": self.timeout.as_secs() }),
            )
        } else {
            AppError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl MapsProvider for GoogleMapsClient {
    async fn fetch(&self, request: &UpstreamRequest) -> AppResult<Value> {
        log::info!("🌐 Making request to: {}", request.redacted_url());

        let response = self
            .client
            .get(request.url())
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        log::info!("📡 Response status: {}", status);

        let response_text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        log::debug!("📄 Response body: {}", response_text);

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::MalformedUpstreamResponse(format!("HTTP {} with non-JSON body: {}", status, e))
        })
    }
}
