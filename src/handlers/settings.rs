// src/handlers/settings.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use validator::Validate;

use crate::{error::AppError, models::teacher::Teacher, state::AppState};

/// DTO for creating a teacher account from the settings panel.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeacherRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub user: String,
    #[validate(length(min = 1, max = 128))]
    pub pass: String,
}

/// Creates a teacher account if the username is free.
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let mut catalog = state.catalog.write().await;
    if catalog.find_teacher(&payload.user).is_some() {
        return Err(AppError::Conflict(format!(
            "Teacher '{}' already exists",
            payload.user
        )));
    }

    tracing::info!("Teacher '{}' created", payload.user);
    catalog.teachers.push(Teacher {
        name: payload.name,
        user: payload.user.clone(),
        pass: payload.pass,
        tests: vec![],
    });

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "user": payload.user })),
    ))
}

/// DTO for linking a test to a teacher.
#[derive(Debug, Deserialize)]
pub struct LinkTestRequest {
    pub user: String,
    pub code: String,
}

/// Adds a test code to a teacher's linked list, idempotently.
/// Both the test and the teacher must exist.
pub async fn link_test(
    State(state): State<AppState>,
    Json(payload): Json<LinkTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut catalog = state.catalog.write().await;

    if catalog.find_test(&payload.code).is_none() {
        return Err(AppError::NotFound("Test not found".to_string()));
    }

    let teacher = catalog
        .teachers
        .iter_mut()
        .find(|t| t.user == payload.user)
        .ok_or(AppError::NotFound("Teacher not found".to_string()))?;

    let linked = if teacher.tests.contains(&payload.code) {
        false
    } else {
        teacher.tests.push(payload.code.clone());
        true
    };

    Ok(Json(serde_json::json!({
        "user": payload.user,
        "code": payload.code,
        "linked": linked,
    })))
}
