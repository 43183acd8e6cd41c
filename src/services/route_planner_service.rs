//! Servicio de planificación de rutas
//!
//! Compone el traductor de waypoints con el cliente del proveedor: construye
//! la query, hace una única llamada y valida la respuesta.

use serde_json::Value;
use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::dto::route_dto::{GeoLocation, Stop};
use crate::services::maps_client::{GoogleMapsClient, MapsProvider};
use crate::services::waypoint_translator::{
    interpret_directions_response, interpret_geocode_response, WaypointTranslator,
};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct RoutePlannerService {
    translator: WaypointTranslator,
    provider: Arc<dyn MapsProvider>,
}

impl RoutePlannerService {
    pub fn new(translator: WaypointTranslator, provider: Arc<dyn MapsProvider>) -> Self {
        Self { translator, provider }
    }

    /// Servicio apuntando a Google Maps según la configuración
    pub fn from_config(config: &EnvironmentConfig) -> AppResult<Self> {
        let translator = WaypointTranslator::new(&config.maps_api_base_url, &config.google_maps_key);
        let provider = GoogleMapsClient::new(config.upstream_timeout())?;
        Ok(Self::new(translator, Arc::new(provider)))
    }

    /// Optimizar el orden de las paradas intermedias usando Directions API
    pub async fn optimize(&self, stops: &[Stop]) -> AppResult<Value> {
        log::info!("🎯 Optimizando ruta con {} paradas", stops.len());

        let request = self.translator.build_directions_request(stops)?;
        let raw = self.provider.fetch(&request).await?;
        let directions = interpret_directions_response(raw)?;

        log::info!("✅ Ruta optimizada exitosamente");
        Ok(directions)
    }

    /// Geocodificar una dirección libre
    pub async fn geocode(&self, address: Option<&str>) -> AppResult<GeoLocation> {
        let request = self.translator.build_geocode_request(address)?;
        log::info!("🗺️ Geocoding address: {}", address.unwrap_or_default().trim());

        let raw = self.provider.fetch(&request).await?;
        let location = interpret_geocode_response(raw)?;

        log::info!("✅ Geocoding successful -> ({}, {})", location.lat, location.lng);
        Ok(location)
    }
}
