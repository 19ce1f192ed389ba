use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::config::environment::EnvironmentConfig;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, DeleteVehicleResponse, FleetDashboardResponse, UpdateVehicleStatusRequest,
};
use crate::models::vehicle::Vehicle;
use crate::repositories::VehicleStore;
use crate::services::fleet_status_service::build_dashboard;
use crate::services::notification_service::{spawn_vehicle_created_notification, Notifier};
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

pub struct VehicleController {
    repository: Arc<dyn VehicleStore>,
    notifier: Arc<dyn Notifier>,
    config: Arc<EnvironmentConfig>,
}

impl VehicleController {
    pub fn new(
        repository: Arc<dyn VehicleStore>,
        notifier: Arc<dyn Notifier>,
        config: Arc<EnvironmentConfig>,
    ) -> Self {
        Self {
            repository,
            notifier,
            config,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.vehicles.clone(), state.notifier.clone(), state.config.clone())
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        self.repository.list_all().await
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        let new_vehicle = request.into_new_vehicle()?;

        // Verificar que la matrícula no exista
        if self.repository.reg_number_exists(&new_vehicle.reg_number).await? {
            return Err(conflict_error("Vehicle", "reg_number", &new_vehicle.reg_number));
        }

        let vehicle = self.repository.insert(new_vehicle).await?;
        info!("🚛 Vehículo {} creado (id {})", vehicle.reg_number, vehicle.id);

        // El alta ya es definitiva: la notificación no puede deshacerla
        spawn_vehicle_created_notification(
            self.notifier.clone(),
            &self.config.notification_settings(),
            &vehicle,
        );

        Ok(vehicle)
    }

    pub async fn update_status(
        &self,
        id: i64,
        request: UpdateVehicleStatusRequest,
    ) -> AppResult<Vehicle> {
        let status = request.parse_status()?;

        let vehicle = self
            .repository
            .update_status(id, status)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        info!("🔄 Vehículo {} ahora está '{}'", vehicle.reg_number, vehicle.status);
        Ok(vehicle)
    }

    /// Borrado idempotente: un id inexistente también responde con éxito
    pub async fn delete(&self, id: i64) -> AppResult<DeleteVehicleResponse> {
        let deleted = self.repository.delete(id).await? > 0;

        if deleted {
            info!("🗑️ Vehículo {} eliminado", id);
        } else {
            info!("🗑️ Vehículo {} no existía, nada que eliminar", id);
        }

        Ok(DeleteVehicleResponse {
            success: true,
            message: "Deleted successfully".to_string(),
            deleted,
        })
    }

    pub async fn dashboard(&self) -> AppResult<FleetDashboardResponse> {
        self.dashboard_on(Local::now().date_naive()).await
    }

    pub async fn dashboard_on(&self, today: NaiveDate) -> AppResult<FleetDashboardResponse> {
        let vehicles = self.repository.list_all().await?;
        Ok(build_dashboard(vehicles, today))
    }
}
