use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::vehicle::{NewVehicle, Vehicle, VehicleStatus, VehicleType};
use crate::services::fleet_status_service::MotBucket;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{
    normalize_make, normalize_reg_number, validate_date, validate_not_empty,
};

// Request para crear un vehículo.
// Un `status` enviado por el cliente se ignora: todo alta nace "On Road".
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(required, custom = "validate_not_empty")]
    pub reg_number: Option<String>,
    pub make: Option<String>,
    #[serde(rename = "type")]
    #[validate(custom = "validate_vehicle_type")]
    pub vehicle_type: Option<String>,
    #[validate(required, custom = "validate_mot_expiry")]
    pub mot_expiry: Option<String>,
}

impl CreateVehicleRequest {
    /// Validar y normalizar el request en un `NewVehicle` con estado "On Road"
    pub fn into_new_vehicle(self) -> AppResult<NewVehicle> {
        self.validate()?;

        let reg_number = self.reg_number.as_deref().unwrap_or_default();
        let mot_expiry = self.mot_expiry.as_deref().unwrap_or_default();

        let mot_expiry: NaiveDate = validate_date(mot_expiry).map_err(|e| {
            let mut errors = validator::ValidationErrors::new();
            errors.add("mot_expiry", e);
            AppError::Validation(errors)
        })?;

        let vehicle_type = match self.vehicle_type.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw
                .parse::<VehicleType>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
            _ => VehicleType::default(),
        };

        Ok(NewVehicle {
            reg_number: normalize_reg_number(reg_number),
            make: normalize_make(self.make.as_deref().unwrap_or_default()),
            vehicle_type,
            mot_expiry,
            status: VehicleStatus::OnRoad,
        })
    }
}

fn validate_mot_expiry(value: &str) -> Result<(), ValidationError> {
    validate_date(value).map(|_| ())
}

fn validate_vehicle_type(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.parse::<VehicleType>().is_ok() {
        return Ok(());
    }
    let mut error = ValidationError::new("vehicle_type");
    error.add_param("value".into(), &value.to_string());
    error.add_param("allowed_values".into(), &"HGV, Van, Trailer".to_string());
    Err(error)
}

// Request para cambiar el estado (toggle On Road / VOR)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleStatusRequest {
    #[validate(required)]
    pub status: Option<String>,
}

impl UpdateVehicleStatusRequest {
    pub fn parse_status(&self) -> AppResult<VehicleStatus> {
        self.validate()?;
        self.status
            .as_deref()
            .unwrap_or_default()
            .parse::<VehicleStatus>()
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

// Confirmación de borrado; `deleted` es false si el id ya no existía
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteVehicleResponse {
    pub success: bool,
    pub message: String,
    pub deleted: bool,
}

// Vehículo con su clasificación de MOT calculada al vuelo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub days_remaining: i64,
    pub bucket: MotBucket,
}

// Response del dashboard agrupado en los tres buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetDashboardResponse {
    pub generated_on: NaiveDate,
    pub critical: Vec<ClassifiedVehicle>,
    pub warning: Vec<ClassifiedVehicle>,
    pub safe: Vec<ClassifiedVehicle>,
}
