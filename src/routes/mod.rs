pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware_with_origins;
use crate::middleware::security_headers::with_security_headers;
use crate::state::AppState;

/// Router completo de la API con cabeceras de seguridad, CORS y logging de requests
pub fn create_app_router(state: AppState) -> Router {
    let cors = cors_middleware_with_origins(&state.config.cors_origins);

    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router());

    with_security_headers(router)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn root() -> &'static str {
    "🚛 FleetSync API is running..."
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-sync",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
