use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, put},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, DeleteVehicleResponse, FleetDashboardResponse, UpdateVehicleStatusRequest,
};
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/dashboard", get(get_dashboard))
        .route("/:id", put(update_vehicle_status).delete(delete_vehicle))
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::from_state(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<Json<Vehicle>, AppError> {
    let Json(request) = payload?;
    let controller = VehicleController::from_state(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_vehicle_status(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateVehicleStatusRequest>, JsonRejection>,
) -> Result<Json<Vehicle>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let controller = VehicleController::from_state(&state);
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteVehicleResponse>, AppError> {
    let Path(id) = id?;
    let controller = VehicleController::from_state(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<FleetDashboardResponse>, AppError> {
    let controller = VehicleController::from_state(&state);
    let response = controller.dashboard().await?;
    Ok(Json(response))
}
