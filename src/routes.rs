// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, editor, exam, settings, status},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the sub-routers for the two pages (exam, panel).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (catalog, session, countdown).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let exam_routes = Router::new()
        .route("/grades", get(exam::list_grades))
        .route("/start", post(exam::start))
        .route("/question", get(exam::current_question))
        .route("/prev", post(exam::prev_question))
        .route("/next", post(exam::next_question))
        .route("/answer", post(exam::select_answer))
        .route("/finish", post(exam::finish))
        .route("/result", get(exam::result))
        .route("/export", get(exam::export));

    let panel_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/tests", get(editor::list_tests).post(editor::save_test))
        .route("/tests/{code}", get(editor::load_test))
        .route("/settings/teachers", post(settings::create_teacher))
        .route("/settings/links", post(settings::link_test));

    Router::new()
        .nest("/api/exam", exam_routes)
        .nest("/api/panel", panel_routes)
        .route("/api/status", get(status::status))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
