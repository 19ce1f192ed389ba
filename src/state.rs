//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Solo contiene handles a colaboradores
//! externos y la configuración; no guarda vehículos en memoria.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::VehicleStore;
use crate::services::notification_service::{DisabledNotifier, Notifier, ResendNotifier};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub vehicles: Arc<dyn VehicleStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        vehicles: Arc<dyn VehicleStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            vehicles,
            notifier,
        }
    }
}

/// Elegir el notifier según la configuración
pub fn build_notifier(config: &EnvironmentConfig) -> Result<Arc<dyn Notifier>> {
    match &config.resend_api_key {
        Some(api_key) if config.notifications_enabled() => {
            info!("📧 Notificaciones por email activadas ({} destinatarios)", config.notify_to.len());
            Ok(Arc::new(ResendNotifier::new(api_key.clone(), config.notify_timeout)?))
        }
        _ => {
            info!("📭 RESEND_API_KEY o NOTIFY_TO sin definir, notificaciones desactivadas");
            Ok(Arc::new(DisabledNotifier))
        }
    }
}
