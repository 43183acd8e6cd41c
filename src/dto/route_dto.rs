//! DTOs de la API del planificador
//!
//! Estructuras que recibe y devuelve el frontend de rutas del repartidor.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Parada geográfica de una ruta
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Stop {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    // Algunos clientes envían `lng` en lugar de `lon`
    #[serde(alias = "lng")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

impl Stop {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Par "lat,lon" tal como lo espera el proveedor
    pub fn coordinate_pair(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// Request de POST /optimize
#[derive(Debug, Default, Deserialize)]
pub struct OptimizeRequest {
    #[serde(default)]
    pub stops: Option<Vec<Stop>>,
}

/// Request de POST /geocode
#[derive(Debug, Default, Deserialize)]
pub struct GeocodeRequest {
    #[serde(default)]
    pub address: Option<String>,
}

/// Coordenadas extraídas del primer resultado de geocoding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Identificador de parada entregada: cualquier escalar JSON que envíe el frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopId {
    Number(i64),
    Float(f64),
    Flag(bool),
    Text(String),
}

impl StopId {
    pub fn is_blank(&self) -> bool {
        matches!(self, StopId::Text(text) if text.trim().is_empty())
    }
}

impl std::fmt::Display for StopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopId::Number(n) => write!(f, "{}", n),
            StopId::Float(n) => write!(f, "{}", n),
            StopId::Flag(b) => write!(f, "{}", b),
            StopId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Request de POST /mark-delivered
#[derive(Debug, Default, Deserialize)]
pub struct MarkDeliveredRequest {
    #[serde(default, rename = "stopId")]
    pub stop_id: Option<StopId>,
}

/// Response con el registro de paradas entregadas
#[derive(Debug, Serialize)]
pub struct DeliveredStopsResponse {
    #[serde(rename = "deliveredStops")]
    pub delivered_stops: Vec<StopId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}
