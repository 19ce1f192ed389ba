//! Utilidades de validación
//!
//! Funciones helper para validar y normalizar los campos que llegan
//! desde el formulario del dashboard.

use chrono::NaiveDate;
use validator::ValidationError;

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Normalizar matrícula: sin espacios y en mayúsculas ("ab12 cde" -> "AB12CDE")
pub fn normalize_reg_number(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Normalizar marca/modelo: recortado y en mayúsculas, espacios internos intactos
pub fn normalize_make(value: &str) -> String {
    value.trim().to_uppercase()
}
