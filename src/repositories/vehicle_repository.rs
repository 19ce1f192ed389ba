use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::vehicle::{NewVehicle, Vehicle, VehicleStatus, VehicleType};
use crate::utils::errors::{conflict_error, AppError, AppResult};

/// Acceso a la tabla de vehículos
///
/// Cada operación toca una sola fila (o un SELECT) y no hay transacciones
/// que abarquen varias llamadas.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Todos los vehículos ordenados por `id` ascendente
    async fn list_all(&self) -> AppResult<Vec<Vehicle>>;

    async fn insert(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    /// `None` si el id no existe (cero filas afectadas)
    async fn update_status(&self, id: i64, status: VehicleStatus) -> AppResult<Option<Vehicle>>;

    /// Devuelve las filas borradas (0 o 1)
    async fn delete(&self, id: i64) -> AppResult<u64>;

    async fn reg_number_exists(&self, reg_number: &str) -> AppResult<bool>;
}

// Fila tal cual la devuelve Postgres; status y type se guardan como TEXT
#[derive(Debug, sqlx::FromRow)]
pub struct VehicleRow {
    pub id: i64,
    pub reg_number: String,
    pub make: String,
    #[sqlx(rename = "type")]
    pub vehicle_type: String,
    pub mot_expiry: NaiveDate,
    pub status: String,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<VehicleStatus>()
            .map_err(|e| AppError::Internal(format!("vehicle {}: {}", row.id, e)))?;
        let vehicle_type = row
            .vehicle_type
            .parse::<VehicleType>()
            .map_err(|e| AppError::Internal(format!("vehicle {}: {}", row.id, e)))?;

        Ok(Vehicle {
            id: row.id,
            reg_number: row.reg_number,
            make: row.make,
            vehicle_type,
            mot_expiry: row.mot_expiry,
            status,
        })
    }
}

const VEHICLE_COLUMNS: &str = "id, reg_number, make, type, mot_expiry, status";

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleRepository {
    async fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles ORDER BY id ASC",
            VEHICLE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn insert(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            INSERT INTO vehicles (reg_number, make, type, mot_expiry, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(&vehicle.reg_number)
        .bind(&vehicle.make)
        .bind(vehicle.vehicle_type.as_str())
        .bind(vehicle.mot_expiry)
        .bind(vehicle.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                conflict_error("Vehicle", "reg_number", &vehicle.reg_number)
            }
            other => AppError::Database(other),
        })?;

        Vehicle::try_from(row)
    }

    async fn update_status(&self, id: i64, status: VehicleStatus) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "UPDATE vehicles SET status = $2 WHERE id = $1 RETURNING {}",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn reg_number_exists(&self, reg_number: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE reg_number = $1)")
                .bind(reg_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }
}
