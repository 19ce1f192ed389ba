//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus enums de estado y tipo.
//! Los valores serializados coinciden con los que guarda la tabla `vehicles`
//! y con los que envía el dashboard ("On Road", "VOR", "HGV", ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Estado operativo del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum VehicleStatus {
    #[default]
    #[serde(rename = "On Road")]
    OnRoad,
    /// Vehicle off road: inmovilizado por avería
    #[serde(rename = "VOR")]
    Vor,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::OnRoad => "On Road",
            VehicleStatus::Vor => "VOR",
        }
    }

    /// Transición del botón de toggle del dashboard: On Road <-> VOR.
    ///
    /// El servidor nunca la aplica por su cuenta; el cliente calcula el
    /// siguiente estado y lo envía explícitamente en el `PUT`.
    pub fn toggled(self) -> Self {
        match self {
            VehicleStatus::OnRoad => VehicleStatus::Vor,
            VehicleStatus::Vor => VehicleStatus::OnRoad,
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error al interpretar un valor enumerado recibido como texto
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}', expected one of: {expected}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl FromStr for VehicleStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ON ROAD" => Ok(VehicleStatus::OnRoad),
            "VOR" => Ok(VehicleStatus::Vor),
            _ => Err(ParseEnumError {
                kind: "status",
                value: s.to_string(),
                expected: "On Road, VOR".to_string(),
            }),
        }
    }
}

/// Categoría del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum VehicleType {
    #[default]
    #[serde(rename = "HGV")]
    Hgv,
    Van,
    Trailer,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Hgv => "HGV",
            VehicleType::Van => "Van",
            VehicleType::Trailer => "Trailer",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HGV" => Ok(VehicleType::Hgv),
            "VAN" => Ok(VehicleType::Van),
            "TRAILER" => Ok(VehicleType::Trailer),
            _ => Err(ParseEnumError {
                kind: "type",
                value: s.to_string(),
                expected: "HGV, Van, Trailer".to_string(),
            }),
        }
    }
}

/// Vehicle principal - la forma JSON que expone la API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub id: i64,
    pub reg_number: String,
    pub make: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub mot_expiry: NaiveDate,
    pub status: VehicleStatus,
}

/// Datos ya normalizados para insertar un vehículo nuevo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub reg_number: String,
    pub make: String,
    pub vehicle_type: VehicleType,
    pub mot_expiry: NaiveDate,
    pub status: VehicleStatus,
}

impl NewVehicle {
    pub fn into_vehicle(self, id: i64) -> Vehicle {
        Vehicle {
            id,
            reg_number: self.reg_number,
            make: self.make,
            vehicle_type: self.vehicle_type,
            mot_expiry: self.mot_expiry,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("On Road".parse::<VehicleStatus>().unwrap(), VehicleStatus::OnRoad);
        assert_eq!("vor".parse::<VehicleStatus>().unwrap(), VehicleStatus::Vor);
        assert_eq!(VehicleStatus::Vor.to_string(), "VOR");

        let err = "Maintenance".parse::<VehicleStatus>().unwrap_err();
        assert_eq!(err.kind, "status");
        assert_eq!(err.value, "Maintenance");
    }

    #[test]
    fn test_status_toggle_is_an_involution() {
        for status in [VehicleStatus::OnRoad, VehicleStatus::Vor] {
            assert_ne!(status.toggled(), status);
            assert_eq!(status.toggled().toggled(), status);
        }
    }

    #[test]
    fn test_type_defaults_to_hgv() {
        assert_eq!(VehicleType::default(), VehicleType::Hgv);
        assert_eq!("trailer".parse::<VehicleType>().unwrap(), VehicleType::Trailer);
        assert!("Bus".parse::<VehicleType>().is_err());
    }

    #[test]
    fn test_vehicle_json_shape() {
        let vehicle = Vehicle {
            id: 1,
            reg_number: "AB12CDE".to_string(),
            make: "DAF".to_string(),
            vehicle_type: VehicleType::Hgv,
            mot_expiry: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            status: VehicleStatus::OnRoad,
        };

        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "reg_number": "AB12CDE",
                "make": "DAF",
                "type": "HGV",
                "mot_expiry": "2025-01-01",
                "status": "On Road"
            })
        );
    }
}
