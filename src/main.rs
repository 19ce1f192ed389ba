use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use fleet_sync::config::environment::EnvironmentConfig;
use fleet_sync::database::connect_vehicle_store;
use fleet_sync::state::{build_notifier, AppState};
use fleet_sync::create_app_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚛 FleetSync - API de gestión de flota");
    info!("======================================");
    info!("🌍 Entorno: {}", config.environment);

    // Inicializar base de datos
    let vehicles = match connect_vehicle_store(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let notifier = build_notifier(&config)?;
    let addr: SocketAddr = config.server_url().parse()?;

    let app_state = AppState::new(config, vehicles, notifier);
    let app = create_app_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /                        - Banner");
    info!("   GET    /health                  - Health check");
    info!("   GET    /api/vehicles            - Listar vehículos");
    info!("   POST   /api/vehicles            - Crear vehículo");
    info!("   GET    /api/vehicles/dashboard  - Flota por buckets de MOT");
    info!("   PUT    /api/vehicles/:id        - Cambiar estado (On Road / VOR)");
    info!("   DELETE /api/vehicles/:id        - Eliminar vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
