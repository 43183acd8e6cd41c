//! Middleware de CORS
//!
//! Política única de lista blanca: se permiten los orígenes configurados y
//! las requests sin `Origin` (curl, apps móviles, Postman). Cualquier otro
//! origen se rechaza con 403 y queda registrado en el log.

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::utils::errors::AppError;

/// Resultado de evaluar el origen de una request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginDecision {
    NoOrigin,
    Allowed,
    Rejected,
}

#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    allowed: Arc<Vec<String>>,
}

impl OriginPolicy {
    pub fn new(origins: Vec<String>) -> Self {
        Self {
            allowed: Arc::new(origins),
        }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed.iter().any(|allowed| allowed == origin)
    }

    pub fn evaluate(&self, origin: Option<&HeaderValue>) -> OriginDecision {
        match origin {
            None => OriginDecision::NoOrigin,
            Some(value) => match value.to_str() {
                Ok(origin) if self.is_allowed(origin) => OriginDecision::Allowed,
                _ => OriginDecision::Rejected,
            },
        }
    }
}

/// Rechazar con 403 los orígenes que no están en la lista blanca
pub async fn enforce_origin(
    State(policy): State<OriginPolicy>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let origin = request.headers().get(header::ORIGIN);

    match policy.evaluate(origin) {
        OriginDecision::Allowed => {
            log::debug!("✅ CORS allowed: {:?}", origin);
        }
        OriginDecision::NoOrigin => {
            log::debug!("📱 Request sin origin (mobile/curl) → allowed");
        }
        OriginDecision::Rejected => {
            log::warn!("🚫 CORS rejected origin {:?} on {} {}", origin, request.method(), request.uri().path());
            return Err(AppError::Forbidden("Origin not allowed by CORS policy".to_string()));
        }
    }

    Ok(next.run(request).await)
}

/// Crear middleware de CORS con los orígenes de la política
pub fn cors_middleware(policy: &OriginPolicy) -> CorsLayer {
    let policy = policy.clone();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin.to_str().map(|o| policy.is_allowed(o)).unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([HeaderName::from_static("content-type")])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
