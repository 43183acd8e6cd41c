//! Controlador del planificador de rutas
//!
//! Handlers de health check, optimización, geocoding y registro de entregas.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::dto::route_dto::*;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppError};

/// Health check con el origen del frontend configurado
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "MM Courier Route Planner API is running 🚀",
        "status": "OK",
        "frontend": state.config.primary_origin(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "courier-route-planner",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Optimizar el orden de las paradas (POST /optimize)
pub async fn optimize_route(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let stops = request.stops.unwrap_or_default();

    log::info!("🎯 Recibida solicitud de optimización para {} paradas", stops.len());

    let directions = state.planner.optimize(&stops).await?;
    Ok(Json(directions))
}

/// Geocodificar una dirección (POST /geocode)
pub async fn geocode_address(
    State(state): State<AppState>,
    payload: Result<Json<GeocodeRequest>, JsonRejection>,
) -> Result<Json<GeoLocation>, AppError> {
    let Json(request) = payload?;

    let location = state.planner.geocode(request.address.as_deref()).await?;
    Ok(Json(location))
}

/// Marcar una parada como entregada (POST /mark-delivered)
pub async fn mark_delivered(
    State(state): State<AppState>,
    payload: Result<Json<MarkDeliveredRequest>, JsonRejection>,
) -> Result<Json<DeliveredStopsResponse>, AppError> {
    let Json(request) = payload?;

    let stop_id = request
        .stop_id
        .filter(|id| !id.is_blank())
        .ok_or_else(|| validation_error("stopId required"))?;

    let delivered_stops = state.delivered.mark_delivered(stop_id).await;
    Ok(Json(DeliveredStopsResponse {
        delivered_stops,
        count: None,
    }))
}

/// Listar las paradas entregadas (GET /delivered)
pub async fn list_delivered(State(state): State<AppState>) -> Json<DeliveredStopsResponse> {
    let delivered_stops = state.delivered.snapshot().await;
    let count = delivered_stops.len();
    Json(DeliveredStopsResponse {
        delivered_stops,
        count: Some(count),
    })
}
