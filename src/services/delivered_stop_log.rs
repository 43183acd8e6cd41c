//! Registro en memoria de paradas entregadas
//!
//! Solo vive mientras vive el proceso: no hay persistencia ni deduplicación.
//! Se inyecta a los handlers a través de `AppState`; los clones comparten
//! el mismo registro.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::dto::route_dto::StopId;

#[derive(Clone, Default)]
pub struct DeliveredStopLog {
    entries: Arc<RwLock<Vec<StopId>>>,
}

impl DeliveredStopLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agregar una parada y devolver el registro completo
    pub async fn mark_delivered(&self, stop_id: StopId) -> Vec<StopId> {
        let mut entries = self.entries.write().await;
        log::info!("📦 Parada marcada como entregada: {}", stop_id);
        entries.push(stop_id);
        entries.clone()
    }

    pub async fn snapshot(&self) -> Vec<StopId> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
