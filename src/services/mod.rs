//! Services module
//!
//! Este módulo contiene la lógica de negocio y las integraciones externas:
//! la clasificación de la flota por MOT y las notificaciones por email.

pub mod fleet_status_service;
pub mod notification_service;

pub use fleet_status_service::*;
pub use notification_service::*;
