// src/handlers/status.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{error::AppError, state::AppState};

/// Reports catalog entity counts plus the load error message, if startup
/// loading failed. Backs the status message region of the client pages.
pub async fn status(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let catalog = state.catalog.read().await;
    let error = state.load_status.read().await.clone();

    Ok(Json(serde_json::json!({
        "tests": catalog.tests.len(),
        "grades": catalog.grades.len(),
        "teachers": catalog.teachers.len(),
        "error": error,
    })))
}
