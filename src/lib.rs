//! FleetSync - API de gestión de flota
//!
//! Alta, listado, cambio de estado y baja de vehículos, con clasificación
//! por vencimiento de MOT y notificación por email en cada alta.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
