//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Los servicios encapsulan la traducción de requests y la integración con
//! el proveedor de mapas.

pub mod delivered_stop_log;
pub mod maps_client;
pub mod route_planner_service;
pub mod waypoint_translator;

pub use delivered_stop_log::DeliveredStopLog;
pub use maps_client::{GoogleMapsClient, MapsProvider};
pub use route_planner_service::RoutePlannerService;
pub use waypoint_translator::*;
