//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::cors::OriginPolicy;
use crate::services::{DeliveredStopLog, RoutePlannerService};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub planner: RoutePlannerService,
    pub origin_policy: OriginPolicy,
    pub delivered: DeliveredStopLog,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, planner: RoutePlannerService) -> Self {
        let origin_policy = OriginPolicy::new(config.cors_origins.clone());
        Self {
            config: Arc::new(config),
            planner,
            origin_policy,
            delivered: DeliveredStopLog::new(),
        }
    }

    /// Estado de producción: cliente real de Google Maps
    pub fn from_config(config: EnvironmentConfig) -> AppResult<Self> {
        let planner = RoutePlannerService::from_config(&config)?;
        Ok(Self::new(config, planner))
    }
}
