//! Traductor de paradas a requests de Google Maps
//!
//! Convierte una lista ordenada de paradas en una query de Directions con
//! optimización de waypoints delegada al proveedor (`optimize:true`), y una
//! dirección libre en una query de Geocoding. También interpreta las
//! respuestas del proveedor. No hace I/O: la llamada de red es del cliente.

use serde_json::Value;
use validator::Validate;

use crate::dto::route_dto::{GeoLocation, Stop};
use crate::utils::errors::{upstream_error, validation_error, AppError, AppResult};

/// Valor de `status` que indica éxito en ambas APIs
pub const STATUS_OK: &str = "OK";

/// Directiva que pide al proveedor reordenar los waypoints intermedios
pub const OPTIMIZE_DIRECTIVE: &str = "optimize:true";

/// Tipo de endpoint del proveedor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    Directions,
    Geocode,
}

impl UpstreamKind {
    fn path(&self) -> &'static str {
        match self {
            UpstreamKind::Directions => "directions/json",
            UpstreamKind::Geocode => "geocode/json",
        }
    }
}

/// Request completamente formado hacia el proveedor
#[derive(Clone, PartialEq)]
pub struct UpstreamRequest {
    pub kind: UpstreamKind,
    endpoint: String,
    params: Vec<(&'static str, String)>,
}

impl UpstreamRequest {
    fn new(kind: UpstreamKind, base_url: &str) -> Self {
        Self {
            kind,
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), kind.path()),
            params: Vec::new(),
        }
    }

    fn param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// Valor (sin codificar) de un parámetro de la query
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// URL final con todos los valores codificados
    pub fn url(&self) -> String {
        self.render(false)
    }

    /// URL apta para logs: la credencial se reemplaza por `***`
    pub fn redacted_url(&self) -> String {
        self.render(true)
    }

    fn render(&self, redact_key: bool) -> String {
        let query = self
            .params
            .iter()
            .map(|(key, value)| {
                if redact_key && *key == "key" {
                    format!("{}=***", key)
                } else {
                    format!("{}={}", key, urlencoding::encode(value))
                }
            })
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.endpoint, query)
    }
}

impl std::fmt::Debug for UpstreamRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamRequest")
            .field("kind", &self.kind)
            .field("url", &self.redacted_url())
            .finish()
    }
}

/// Construye requests hacia el proveedor con su URL base y credencial
#[derive(Clone)]
pub struct WaypointTranslator {
    base_url: String,
    api_key: String,
}

impl WaypointTranslator {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Construir la query de Directions para una lista ordenada de paradas.
    ///
    /// La primera parada es el origen, la última el destino y las intermedias
    /// se envían como waypoints precedidos de `optimize:true`. Con exactamente
    /// dos paradas no se envía el parámetro `waypoints`.
    pub fn build_directions_request(&self, stops: &[Stop]) -> AppResult<UpstreamRequest> {
        let (first, last) = match (stops.first(), stops.last()) {
            (Some(first), Some(last)) if stops.len() >= 2 => (first, last),
            _ => return Err(validation_error("at least two stops required")),
        };

        for stop in stops {
            stop.validate()?;
        }

        let mut request = UpstreamRequest::new(UpstreamKind::Directions, &self.base_url)
            .param("origin", first.coordinate_pair())
            .param("destination", last.coordinate_pair());

        let waypoints = &stops[1..stops.len() - 1];
        if !waypoints.is_empty() {
            let joined = waypoints
                .iter()
                .map(Stop::coordinate_pair)
                .collect::<Vec<_>>()
                .join("|");
            request = request.param("waypoints", format!("{}|{}", OPTIMIZE_DIRECTIVE, joined));
        }

        Ok(request.param("key", self.api_key.clone()))
    }

    /// Construir la query de Geocoding para una dirección libre
    pub fn build_geocode_request(&self, address: Option<&str>) -> AppResult<UpstreamRequest> {
        let address = address
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| validation_error("address required"))?;

        Ok(UpstreamRequest::new(UpstreamKind::Geocode, &self.base_url)
            .param("address", address)
            .param("key", self.api_key.clone()))
    }
}

fn upstream_status(raw: &Value) -> Option<&str> {
    raw.get("status").and_then(Value::as_str)
}

/// Validar la respuesta de Directions: si el status es "OK" se devuelve intacta
pub fn interpret_directions_response(raw: Value) -> AppResult<Value> {
    if upstream_status(&raw) == Some(STATUS_OK) {
        Ok(raw)
    } else {
        Err(upstream_error("Google Directions API failed", raw))
    }
}

/// Extraer `results[0].geometry.location` de una respuesta de Geocoding
pub fn interpret_geocode_response(raw: Value) -> AppResult<GeoLocation> {
    if upstream_status(&raw) != Some(STATUS_OK) {
        return Err(upstream_error("Geocoding failed", raw));
    }

    // Solo importa el primer resultado; el resto puede venir con cualquier forma
    let location = raw
        .pointer("/results/0/geometry/location")
        .ok_or_else(|| AppError::MalformedUpstreamResponse("geocoding returned no results".to_string()))?;

    serde_json::from_value(location.clone())
        .map_err(|e| AppError::MalformedUpstreamResponse(format!("unexpected geocoding location: {}", e)))
}
