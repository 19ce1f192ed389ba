//! Configuración de variables de entorno
//!
//! `EnvironmentConfig` se construye una sola vez en `main` y viaja dentro
//! de `AppState`; ningún otro módulo lee el entorno del proceso.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use super::database::DatabaseConfig;
use crate::services::notification_service::NotificationSettings;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database: DatabaseConfig,
    /// `["*"]` acepta cualquier origen
    pub cors_origins: Vec<String>,
    pub resend_api_key: Option<String>,
    pub notify_from: String,
    pub notify_to: Vec<String>,
    pub notify_timeout: Duration,
    pub log_level: tracing::Level,
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} must be a valid value ('{}'): {}", key, raw, e)),
        _ => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración a partir de cualquier fuente clave/valor
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .context("DATABASE_URL must be set")?;

        let database = DatabaseConfig {
            url: database_url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            ..DatabaseConfig::default()
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| split_list(&raw))
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec!["*".to_string()]);

        let notify_to = lookup("NOTIFY_TO")
            .map(|raw| split_list(&raw))
            .unwrap_or_default();

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            database,
            cors_origins,
            resend_api_key: lookup("RESEND_API_KEY").filter(|key| !key.trim().is_empty()),
            notify_from: lookup("NOTIFY_FROM")
                .unwrap_or_else(|| "FleetSync <onboarding@resend.dev>".to_string()),
            notify_to,
            notify_timeout: Duration::from_secs(parse_or(&lookup, "NOTIFY_TIMEOUT_SECS", 10)?),
            log_level: parse_or(&lookup, "LOG_LEVEL", tracing::Level::INFO)?,
        })
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Las notificaciones solo se envían con API key y al menos un destinatario
    pub fn notifications_enabled(&self) -> bool {
        self.resend_api_key.is_some() && !self.notify_to.is_empty()
    }

    pub fn notification_settings(&self) -> NotificationSettings {
        NotificationSettings {
            from: self.notify_from.clone(),
            to: self.notify_to.clone(),
            timeout: self.notify_timeout,
        }
    }
}
