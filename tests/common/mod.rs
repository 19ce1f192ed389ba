#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum_test::TestServer;
use tokio::sync::mpsc;

use fleet_sync::config::environment::EnvironmentConfig;
use fleet_sync::models::vehicle::{NewVehicle, Vehicle, VehicleStatus};
use fleet_sync::repositories::{MemoryVehicleRepository, VehicleStore};
use fleet_sync::services::notification_service::{EmailMessage, Notifier};
use fleet_sync::utils::errors::{AppError, AppResult};
use fleet_sync::{create_app_router, AppState};

/// Notifier que reenvía cada email a un canal para inspeccionarlo
pub struct RecordingNotifier(pub mpsc::UnboundedSender<EmailMessage>);

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        self.0.send(message).map_err(|e| anyhow!(e.to_string()))
    }
}

pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _message: EmailMessage) -> Result<()> {
        Err(anyhow!("Resend respondió 500"))
    }
}

pub struct HangingNotifier;

#[async_trait]
impl Notifier for HangingNotifier {
    async fn send(&self, _message: EmailMessage) -> Result<()> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

/// Almacén que simula la base de datos caída en todas las operaciones
pub struct UnreachableVehicleStore;

fn store_down() -> AppError {
    AppError::Database(sqlx::Error::Protocol("connection refused by vehicles store".to_string()))
}

#[async_trait]
impl VehicleStore for UnreachableVehicleStore {
    async fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        Err(store_down())
    }

    async fn insert(&self, _vehicle: NewVehicle) -> AppResult<Vehicle> {
        Err(store_down())
    }

    async fn update_status(&self, _id: i64, _status: VehicleStatus) -> AppResult<Option<Vehicle>> {
        Err(store_down())
    }

    async fn delete(&self, _id: i64) -> AppResult<u64> {
        Err(store_down())
    }

    async fn reg_number_exists(&self, _reg_number: &str) -> AppResult<bool> {
        Err(store_down())
    }
}

pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("memory://".to_string()),
        "NOTIFY_TO" => Some("ops@example.com".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub fn create_test_server_with_store(
    vehicles: Arc<dyn VehicleStore>,
    notifier: Arc<dyn Notifier>,
) -> TestServer {
    let state = AppState::new(test_config(), vehicles, notifier);
    TestServer::new(create_app_router(state)).expect("test server")
}

pub fn create_test_server_with(notifier: Arc<dyn Notifier>) -> TestServer {
    create_test_server_with_store(Arc::new(MemoryVehicleRepository::new()), notifier)
}

pub fn create_test_server() -> (TestServer, mpsc::UnboundedReceiver<EmailMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (create_test_server_with(Arc::new(RecordingNotifier(tx))), rx)
}
