//! Clasificación de la flota por vencimiento de MOT
//!
//! Un vehículo VOR es siempre crítico. Si está en ruta, se clasifica por los
//! días que faltan para que caduque su MOT: 14 días o menos (incluido un MOT
//! ya caducado, que da días negativos) es aviso; el resto está en regla.
//! Nada de esto se persiste: se recalcula en cada lectura.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dto::vehicle_dto::{ClassifiedVehicle, FleetDashboardResponse};
use crate::models::vehicle::{Vehicle, VehicleStatus};

/// Días de antelación con los que un MOT pasa a aviso
pub const MOT_WARNING_WINDOW_DAYS: i64 = 14;

/// Bucket del dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MotBucket {
    Critical,
    Warning,
    Safe,
}

/// Días naturales entre `today` y la fecha de caducidad (negativo si ya caducó)
pub fn days_remaining(mot_expiry: NaiveDate, today: NaiveDate) -> i64 {
    (mot_expiry - today).num_days()
}

pub fn classify(status: VehicleStatus, mot_expiry: NaiveDate, today: NaiveDate) -> MotBucket {
    if status == VehicleStatus::Vor {
        MotBucket::Critical
    } else if days_remaining(mot_expiry, today) <= MOT_WARNING_WINDOW_DAYS {
        MotBucket::Warning
    } else {
        MotBucket::Safe
    }
}

pub fn classify_vehicle(vehicle: Vehicle, today: NaiveDate) -> ClassifiedVehicle {
    ClassifiedVehicle {
        days_remaining: days_remaining(vehicle.mot_expiry, today),
        bucket: classify(vehicle.status, vehicle.mot_expiry, today),
        vehicle,
    }
}

/// Agrupar la flota en los tres buckets conservando el orden de entrada
pub fn build_dashboard(vehicles: Vec<Vehicle>, today: NaiveDate) -> FleetDashboardResponse {
    let mut dashboard = FleetDashboardResponse {
        generated_on: today,
        critical: Vec::new(),
        warning: Vec::new(),
        safe: Vec::new(),
    };

    for vehicle in vehicles {
        let classified = classify_vehicle(vehicle, today);
        match classified.bucket {
            MotBucket::Critical => dashboard.critical.push(classified),
            MotBucket::Warning => dashboard.warning.push(classified),
            MotBucket::Safe => dashboard.safe.push(classified),
        }
    }

    dashboard
}
