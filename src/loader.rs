// src/loader.rs

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::catalog::{Catalog, GradesDocument, TeachersDocument, TestsDocument};
use crate::state::AppState;

async fn read_doc<T: DeserializeOwned>(path: PathBuf) -> Result<T, AppError> {
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        AppError::InternalServerError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        AppError::InternalServerError(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Reads the three catalog documents from `dir` concurrently.
/// Fails as a unit: any unreadable or unparsable document fails the whole
/// load and no partial catalog is produced.
pub async fn load_catalog(dir: &str) -> Result<Catalog, AppError> {
    let dir = Path::new(dir);
    let (tests, grades, teachers) = tokio::try_join!(
        read_doc::<TestsDocument>(dir.join("tests.json")),
        read_doc::<GradesDocument>(dir.join("grades.json")),
        read_doc::<TeachersDocument>(dir.join("teachers.json")),
    )?;
    Ok(Catalog {
        tests: tests.tests,
        grades: grades.grades,
        teachers: teachers.teachers,
    })
}

/// Loads the catalog into the application state. On success the catalog is
/// replaced wholesale; on failure the empty catalog stays in place and the
/// error is reported once through the status message. No retry.
pub async fn load_into(state: &AppState) {
    match load_catalog(&state.config.catalog_dir).await {
        Ok(catalog) => {
            tracing::info!(
                "Catalog loaded: {} tests, {} grades, {} teachers",
                catalog.tests.len(),
                catalog.grades.len(),
                catalog.teachers.len()
            );
            *state.catalog.write().await = catalog;
        }
        Err(e) => {
            tracing::error!("Failed to load catalog: {}", e);
            *state.load_status.write().await =
                Some(format!("Error loading initial data: {}", e));
        }
    }
}
