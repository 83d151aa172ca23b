//! HTTP handlers for employee roster endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared::Employee;

use crate::error::AppResult;
use crate::services::employee::{CreateEmployeeInput, EmployeeService, UpdateEmployeeInput};
use crate::AppState;

/// List the employee roster
pub async fn list_employees(State(state): State<AppState>) -> Json<Vec<Employee>> {
    let service = EmployeeService::new(state.store);
    Json(service.list().await)
}

/// Add an employee
pub async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<CreateEmployeeInput>,
) -> AppResult<Json<Employee>> {
    let service = EmployeeService::new(state.store);
    let employee = service.create(input).await?;
    Ok(Json(employee))
}

/// Edit an employee
pub async fn update_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
    Json(input): Json<UpdateEmployeeInput>,
) -> AppResult<Json<Employee>> {
    let service = EmployeeService::new(state.store);
    let employee = service.update(employee_id, input).await?;
    Ok(Json(employee))
}

/// Remove an employee
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = EmployeeService::new(state.store);
    service.delete(employee_id).await?;
    Ok(Json(()))
}

/// Flip an employee between active and inactive
pub async fn toggle_employee_active(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> AppResult<Json<Employee>> {
    let service = EmployeeService::new(state.store);
    let employee = service.toggle_active(employee_id).await?;
    Ok(Json(employee))
}
