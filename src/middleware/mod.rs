//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS y las cabeceras de seguridad.

pub mod cors;
pub mod security_headers;

pub use cors::*;
pub use security_headers::*;
