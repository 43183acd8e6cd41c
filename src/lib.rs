//! Courier Route Planner API
//!
//! Servicio HTTP que traduce listas de paradas y direcciones en requests a
//! Google Maps (Directions y Geocoding) para el frontend de los repartidores.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
