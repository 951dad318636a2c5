// src/handlers/auth.rs

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::teacher::{LoginRequest, TeacherIdentity},
    state::AppState,
};

/// Authenticates a teacher against the loaded catalog.
///
/// A single-shot exact (username, password) pair match: a hit returns the
/// teacher identity, a miss is an auth failure. Credentials are compared
/// in plaintext by design of the data source; there is no token, lockout
/// or session expiry.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = payload.user.trim();
    let pass = payload.pass.trim();

    let catalog = state.catalog.read().await;
    let teacher = catalog
        .teachers
        .iter()
        .find(|t| t.user == user && t.pass == pass)
        .ok_or(AppError::AuthError(
            "Incorrect username or password".to_string(),
        ))?;

    tracing::info!("Teacher '{}' logged in", teacher.user);

    Ok(Json(TeacherIdentity::from(teacher)))
}
