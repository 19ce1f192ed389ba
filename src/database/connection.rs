//! Configuración de conexión a PostgreSQL
//!
//! Abre el pool, aplica las migraciones de `migrations/` y entrega el
//! `VehicleStore` que usará la API.

use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::repositories::{MemoryVehicleRepository, PgVehicleRepository, VehicleStore};

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Conectar el almacén de vehículos indicado por `DATABASE_URL`
pub async fn connect_vehicle_store(config: &DatabaseConfig) -> Result<Arc<dyn VehicleStore>> {
    if config.is_memory() {
        warn!("⚠️ DATABASE_URL=memory:// - los vehículos se pierden al reiniciar");
        return Ok(Arc::new(MemoryVehicleRepository::new()));
    }

    info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&config.url));
    let pool = config.create_pool().await?;

    run_migrations(&pool).await?;
    info!("✅ Migraciones aplicadas");

    Ok(Arc::new(PgVehicleRepository::new(pool)))
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if url[..at_pos].rfind(':').is_some() {
            let protocol = &url[..url.find("://").map_or(0, |pos| pos + 3)];
            let host = &url[at_pos + 1..];
            format!("{}***:***@{}", protocol, host)
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
