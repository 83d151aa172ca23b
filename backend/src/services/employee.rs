//! Employee roster service

use serde::Deserialize;
use uuid::Uuid;

use shared::{validate_employee_name, Employee, Role};

use crate::error::{AppError, AppResult};
use crate::store::{keys, Store};

/// Employee service for managing the store roster
#[derive(Clone)]
pub struct EmployeeService {
    store: Store,
}

/// Input for adding an employee
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeInput {
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

/// Input for editing an employee
#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeInput {
    pub name: Option<String>,
    pub role: Option<Role>,
}

impl EmployeeService {
    /// Create a new EmployeeService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List the full roster, active and inactive
    pub async fn list(&self) -> Vec<Employee> {
        self.store.load(keys::EMPLOYEES).await
    }

    /// Add an employee to the roster
    pub async fn create(&self, input: CreateEmployeeInput) -> AppResult<Employee> {
        validate_employee_name(&input.name).map_err(|e| AppError::Validation {
            field: "name".to_string(),
            message: e.to_string(),
        })?;

        let employee = Employee::new(input.name.trim(), input.role);
        let created = employee.clone();

        self.store
            .update::<Vec<Employee>, _, _>(keys::EMPLOYEES, move |employees| {
                employees.push(employee);
                Ok(())
            })
            .await?;

        Ok(created)
    }

    /// Edit an employee's name or role
    pub async fn update(&self, id: Uuid, input: UpdateEmployeeInput) -> AppResult<Employee> {
        if let Some(name) = &input.name {
            validate_employee_name(name).map_err(|e| AppError::Validation {
                field: "name".to_string(),
                message: e.to_string(),
            })?;
        }

        self.store
            .update::<Vec<Employee>, _, _>(keys::EMPLOYEES, move |employees| {
                let employee = employees
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or_else(|| AppError::NotFound("Employee".to_string()))?;

                if let Some(name) = input.name {
                    employee.name = name.trim().to_string();
                }
                if let Some(role) = input.role {
                    employee.role = role;
                }

                Ok(employee.clone())
            })
            .await
    }

    /// Remove an employee from the roster
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store
            .update::<Vec<Employee>, _, _>(keys::EMPLOYEES, move |employees| {
                let before = employees.len();
                employees.retain(|e| e.id != id);
                if employees.len() == before {
                    return Err(AppError::NotFound("Employee".to_string()));
                }
                Ok(())
            })
            .await
    }

    /// Flip an employee between active and inactive
    pub async fn toggle_active(&self, id: Uuid) -> AppResult<Employee> {
        self.store
            .update::<Vec<Employee>, _, _>(keys::EMPLOYEES, move |employees| {
                let employee = employees
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or_else(|| AppError::NotFound("Employee".to_string()))?;

                employee.active = !employee.active;
                Ok(employee.clone())
            })
            .await
    }
}
