//! Implementación en memoria de `VehicleStore`
//!
//! Mismo contrato que la tabla de Postgres (ids crecientes, matrícula única,
//! borrado físico). Se usa en los tests y en local con `DATABASE_URL=memory://`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::vehicle_repository::VehicleStore;
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleStatus};
use crate::utils::errors::{conflict_error, AppResult};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Vehicle>,
}

#[derive(Default)]
pub struct MemoryVehicleRepository {
    table: RwLock<Table>,
}

impl MemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for MemoryVehicleRepository {
    async fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn insert(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let mut table = self.table.write().await;

        if table.rows.values().any(|v| v.reg_number == vehicle.reg_number) {
            return Err(conflict_error("Vehicle", "reg_number", &vehicle.reg_number));
        }

        table.next_id += 1;
        let id = table.next_id;
        let vehicle = vehicle.into_vehicle(id);
        table.rows.insert(id, vehicle.clone());

        Ok(vehicle)
    }

    async fn update_status(&self, id: i64, status: VehicleStatus) -> AppResult<Option<Vehicle>> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|vehicle| {
            vehicle.status = status;
            vehicle.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<u64> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn reg_number_exists(&self, reg_number: &str) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table.rows.values().any(|v| v.reg_number == reg_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleType;
    use crate::utils::errors::AppError;
    use chrono::NaiveDate;

    fn new_vehicle(reg_number: &str) -> NewVehicle {
        NewVehicle {
            reg_number: reg_number.to_string(),
            make: "SCANIA".to_string(),
            vehicle_type: VehicleType::Hgv,
            mot_expiry: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
            status: VehicleStatus::OnRoad,
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_order_and_never_reused() {
        let repo = MemoryVehicleRepository::new();
        let first = repo.insert(new_vehicle("AAA111")).await.unwrap();
        let second = repo.insert(new_vehicle("BBB222")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        assert_eq!(repo.delete(second.id).await.unwrap(), 1);
        let third = repo.insert(new_vehicle("CCC333")).await.unwrap();
        assert_eq!(third.id, 3);

        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_duplicate_reg_number_conflicts() {
        let repo = MemoryVehicleRepository::new();
        repo.insert(new_vehicle("AAA111")).await.unwrap();
        assert!(repo.reg_number_exists("AAA111").await.unwrap());
        assert!(matches!(
            repo.insert(new_vehicle("AAA111")).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id() {
        let repo = MemoryVehicleRepository::new();
        assert!(repo.update_status(42, VehicleStatus::Vor).await.unwrap().is_none());
        assert_eq!(repo.delete(42).await.unwrap(), 0);
    }
}
