//! Rutas del planificador
//!
//! Este módulo arma el router completo con sus capas de CORS y tracing.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::controllers::route_controller;
use crate::middleware::cors::{cors_middleware, enforce_origin};
use crate::state::AppState;

/// Crear el router de la API
pub fn create_router(state: AppState) -> Router {
    let policy = state.origin_policy.clone();

    Router::new()
        .route("/", get(route_controller::root))
        .route("/health", get(route_controller::health_check))
        .route("/optimize", post(route_controller::optimize_route))
        .route("/geocode", post(route_controller::geocode_address))
        .route("/mark-delivered", post(route_controller::mark_delivered))
        .route("/delivered", get(route_controller::list_delivered))
        .layer(cors_middleware(&policy))
        // La validación de origen va por fuera para que también cubra los preflight
        .layer(from_fn_with_state(policy, enforce_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
