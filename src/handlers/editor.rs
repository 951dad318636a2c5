// src/handlers/editor.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::test::{Points, Question, TestDef, TestSummary},
    state::AppState,
    utils::{code::generate_test_code, forms},
};

/// Lists all tests as cards for the panel.
pub async fn list_tests(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let catalog = state.catalog.read().await;
    let tests: Vec<TestSummary> = catalog.tests.iter().map(TestSummary::from).collect();
    Ok(Json(tests))
}

/// The editor's working copy: one test's fields flattened into the shape
/// the authoring form edits, with defaults substituted for absent source
/// fields. Discarded drafts carry no server state; only save commits.
#[derive(Debug, Serialize)]
pub struct WorkingCopy {
    pub code: Option<String>,
    pub name: String,
    pub time: u64,
    pub pts_ok: i64,
    pub pts_bad: i64,
    pub from: String,
    pub to: String,
    pub show_results: bool,
    pub show_correct: bool,
    /// Comma-joined, the way the form's group field edits it.
    pub groups: String,
    pub questions: Vec<Question>,
}

impl WorkingCopy {
    fn fresh() -> Self {
        WorkingCopy {
            code: None,
            name: String::new(),
            time: 0,
            pts_ok: 1,
            pts_bad: 0,
            from: String::new(),
            to: String::new(),
            show_results: true,
            show_correct: false,
            groups: String::new(),
            questions: vec![],
        }
    }

    fn of(test: &TestDef) -> Self {
        WorkingCopy {
            code: Some(test.code.clone()),
            name: test.name.clone(),
            time: test.time,
            pts_ok: test.points.ok,
            pts_bad: test.points.bad,
            from: test.from.clone().unwrap_or_default(),
            to: test.to.clone().unwrap_or_default(),
            show_results: test.show_results.unwrap_or(true),
            show_correct: test.show_correct.unwrap_or(false),
            groups: test.groups.join(","),
            questions: test.questions.clone(),
        }
    }
}

/// Loads the working copy for a test code.
/// An unknown code yields the fresh default draft rather than an error,
/// so "new test" and "edit test" share one path.
pub async fn load_test(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = state.catalog.read().await;
    let copy = match catalog.find_test(&code) {
        Some(test) => WorkingCopy::of(test),
        None => WorkingCopy::fresh(),
    };
    Ok(Json(copy))
}

fn default_show_results() -> bool {
    true
}

/// DTO for saving a draft. Numeric fields arrive as the raw form strings
/// and are parsed with a fallback, never rejected.
#[derive(Debug, Deserialize)]
pub struct SaveTestRequest {
    pub code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub pts_ok: String,
    #[serde(default)]
    pub pts_bad: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default = "default_show_results")]
    pub show_results: bool,
    #[serde(default)]
    pub show_correct: bool,
    #[serde(default)]
    pub groups: String,
    /// Absent means "keep the stored questions" when saving in place.
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
}

/// Saves a draft into the catalog.
///
/// * A code already in the catalog mutates that test in place.
/// * Any other draft is appended under a freshly generated unique code,
///   so duplicate codes can never result.
pub async fn save_test(
    State(state): State<AppState>,
    Json(payload): Json<SaveTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    let time = forms::parse_or(&payload.time, 0u64);
    let points = Points {
        ok: forms::parse_or(&payload.pts_ok, 1i64),
        bad: forms::parse_or(&payload.pts_bad, 0i64),
    };
    let from = Some(payload.from).filter(|s| !s.is_empty());
    let to = Some(payload.to).filter(|s| !s.is_empty());
    let groups = forms::parse_groups(&payload.groups);

    let mut catalog = state.catalog.write().await;

    let existing = payload
        .code
        .as_deref()
        .and_then(|code| catalog.tests.iter().position(|t| t.code == code));

    match existing {
        Some(i) => {
            let test = &mut catalog.tests[i];
            test.name = name;
            test.time = time;
            test.points = points;
            test.from = from;
            test.to = to;
            test.show_results = Some(payload.show_results);
            test.show_correct = Some(payload.show_correct);
            test.groups = groups;
            if let Some(questions) = payload.questions {
                test.questions = questions;
            }
            let code = test.code.clone();
            tracing::info!("Test '{}' updated", code);
            Ok((StatusCode::OK, Json(serde_json::json!({ "code": code }))))
        }
        None => {
            let code = generate_test_code(&catalog);
            tracing::info!("Test '{}' created", code);
            catalog.tests.push(TestDef {
                code: code.clone(),
                name,
                time,
                questions: payload.questions.unwrap_or_default(),
                points,
                from,
                to,
                show_results: Some(payload.show_results),
                show_correct: Some(payload.show_correct),
                groups,
            });
            Ok((StatusCode::CREATED, Json(serde_json::json!({ "code": code }))))
        }
    }
}
