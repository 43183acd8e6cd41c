//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Entrada inválida o ausente (culpa del cliente)
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(#[from] validator::ValidationErrors),

    /// El proveedor respondió con un status distinto de "OK" (o no respondió a tiempo)
    #[error("Upstream error: {message}")]
    Upstream { message: String, details: Value },

    /// El proveedor respondió "OK" pero con una forma inesperada
    #[error("Malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),

    /// Fallo de transporte hacia el proveedor
    #[error("Network error: {0}")]
    Network(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub code: String,
}

impl AppError {
    /// Código HTTP asociado a cada tipo de error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidCoordinates(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { .. } | AppError::MalformedUpstreamResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::Network(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    /// Código estable que el frontend puede comparar
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidCoordinates(_) => "INVALID_COORDINATES",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::MalformedUpstreamResponse(_) => "MALFORMED_UPSTREAM_RESPONSE",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code().to_string();

        let error_response = match self {
            AppError::Validation(msg) => {
                log::warn!("⚠️ Validation error: {}", msg);
                ErrorResponse { error: msg, details: None, code }
            }

            AppError::InvalidCoordinates(e) => {
                log::warn!("⚠️ Invalid coordinates: {}", e);
                ErrorResponse {
                    error: "Invalid stop coordinates".to_string(),
                    details: Some(json!(e)),
                    code,
                }
            }

            AppError::Upstream { message, details } => {
                log::error!("❌ {}: {}", message, details);
                ErrorResponse { error: message, details: Some(details), code }
            }

            AppError::MalformedUpstreamResponse(msg) => {
                log::error!("❌ Malformed upstream response: {}", msg);
                ErrorResponse {
                    error: "Unexpected response from maps provider".to_string(),
                    details: Some(json!(msg)),
                    code,
                }
            }

            AppError::Network(msg) => {
                log::error!("❌ Network error reaching maps provider: {}", msg);
                ErrorResponse {
                    error: "Could not reach maps provider".to_string(),
                    details: Some(json!(msg)),
                    code,
                }
            }

            AppError::Forbidden(msg) => {
                log::warn!("🚫 Forbidden: {}", msg);
                ErrorResponse { error: msg, details: None, code }
            }

            AppError::Internal(msg) => {
                log::error!("❌ Internal error: {}", msg);
                ErrorResponse {
                    error: "An unexpected error occurred".to_string(),
                    details: Some(json!(msg)),
                    code,
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("invalid JSON body: {}", rejection.body_text()))
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

/// Función helper para errores de status del proveedor
pub fn upstream_error(message: &str, details: Value) -> AppError {
    AppError::Upstream {
        message: message.to_string(),
        details,
    }
}
