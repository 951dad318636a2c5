// src/handlers/exam.rs

use std::collections::HashMap;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::AppError,
    models::test::PublicQuestion,
    score,
    session::{ExamSession, Phase},
    state::AppState,
    timer,
};

/// Lists the grades for the start form's selection control.
pub async fn list_grades(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let catalog = state.catalog.read().await;
    Ok(Json(catalog.grades.clone()))
}

/// DTO for the start form. All three fields must be non-empty.
#[derive(Debug, Deserialize, Validate)]
pub struct StartExamRequest {
    #[validate(length(min = 1, max = 100, message = "Student name must not be empty."))]
    pub student: String,
    #[validate(length(min = 1, max = 50, message = "A grade must be selected."))]
    pub grade_id: String,
    #[validate(length(min = 1, max = 50, message = "Access code must not be empty."))]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct StartExamResponse {
    pub test: String,
    pub time: u64,
    pub questions: usize,
    pub remaining: String,
}

/// Starts a fresh exam session.
///
/// * Validates the form fields and resolves the grade label.
/// * Matches the access code exactly (case-sensitive) against the catalog.
/// * Resets index and answer map and restarts the countdown, cancelling
///   any countdown left over from a previous session.
pub async fn start(
    State(state): State<AppState>,
    Json(payload): Json<StartExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let (grade_label, test) = {
        let catalog = state.catalog.read().await;
        let grade = catalog
            .find_grade(payload.grade_id.trim())
            .ok_or(AppError::NotFound("Grade not found".to_string()))?;
        let test = catalog
            .find_test(payload.code.trim())
            .ok_or(AppError::NotFound(
                "Invalid code or test not found".to_string(),
            ))?;
        (grade.name.clone(), test.clone())
    };

    tracing::info!("Starting exam '{}' for {}", test.name, payload.student);

    let session = ExamSession::start(payload.student.trim().to_string(), grade_label, test);
    let response = StartExamResponse {
        test: session.test().name.clone(),
        time: session.test().time,
        questions: session.test().questions.len(),
        remaining: timer::format_mmss(session.remaining_secs()),
    };

    *state.session.lock().await = Some(session);
    timer::restart(&state).await;

    Ok(Json(response))
}

/// The projection of the session the exam screen renders: the current
/// question (answer key withheld), the stored selection, and the gating
/// flags for the navigation and finish controls.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub question: PublicQuestion,
    pub selected: Option<usize>,
    pub at_start: bool,
    pub at_end: bool,
    pub can_finish: bool,
    pub remaining_secs: u64,
    pub remaining: String,
}

fn question_view(session: &ExamSession) -> Result<QuestionView, AppError> {
    let question = session
        .current_question()
        .ok_or(AppError::NotFound("Test has no questions".to_string()))?;
    Ok(QuestionView {
        index: session.index(),
        total: session.test().questions.len(),
        question: PublicQuestion::from(question),
        selected: session.answers().get(&question.id).copied(),
        at_start: session.at_start(),
        at_end: session.at_end(),
        can_finish: session.can_finish(),
        remaining_secs: session.remaining_secs(),
        remaining: timer::format_mmss(session.remaining_secs()),
    })
}

/// Shared guard: an in-progress session must exist for every exam-screen
/// operation.
fn require_in_progress(guard: &mut Option<ExamSession>) -> Result<&mut ExamSession, AppError> {
    let session = guard
        .as_mut()
        .ok_or(AppError::NotFound("No active exam session".to_string()))?;
    if session.phase() == Phase::Finished {
        return Err(AppError::BadRequest("Exam already finished".to_string()));
    }
    Ok(session)
}

/// Returns the view of the current question.
pub async fn current_question(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut guard = state.session.lock().await;
    let session = require_in_progress(&mut guard)?;
    Ok(Json(question_view(session)?))
}

/// Moves back one question, clamped at the first.
pub async fn prev_question(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut guard = state.session.lock().await;
    let session = require_in_progress(&mut guard)?;
    session.prev();
    Ok(Json(question_view(session)?))
}

/// Moves forward one question, clamped at the last.
pub async fn next_question(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut guard = state.session.lock().await;
    let session = require_in_progress(&mut guard)?;
    session.next();
    Ok(Json(question_view(session)?))
}

/// DTO for selecting an option on the current question.
#[derive(Debug, Deserialize)]
pub struct SelectAnswerRequest {
    pub option: usize,
}

/// Upserts the answer for the current question.
pub async fn select_answer(
    State(state): State<AppState>,
    Json(payload): Json<SelectAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut guard = state.session.lock().await;
    let session = require_in_progress(&mut guard)?;
    session
        .select_option(payload.option)
        .map_err(AppError::BadRequest)?;
    Ok(Json(question_view(session)?))
}

#[derive(Debug, Serialize)]
pub struct ExamResult {
    pub score: i64,
    pub show_results: bool,
    pub show_correct: bool,
    pub report: Vec<score::ReportRow>,
}

fn build_result(session: &ExamSession, score: i64) -> ExamResult {
    let test = session.test();
    ExamResult {
        score,
        show_results: test.show_results.unwrap_or(true),
        show_correct: test.show_correct.unwrap_or(false),
        report: score::report(&test.questions, session.answers()),
    }
}

/// Explicit finish.
///
/// * Rejected while questions remain unanswered and time is left.
/// * Goes through the same guarded transition as countdown expiry, so a
///   double trigger (rapid clicks, or a click racing the timer) settles
///   on one result.
/// * Once finished, returns the stored result instead of failing.
pub async fn finish(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut guard = state.session.lock().await;
    let session = guard
        .as_mut()
        .ok_or(AppError::NotFound("No active exam session".to_string()))?;

    if session.phase() == Phase::Finished {
        let score = session.final_score().unwrap_or_default();
        return Ok(Json(build_result(session, score)));
    }

    if !session.can_finish() {
        return Err(AppError::BadRequest(
            "All questions must be answered before finishing".to_string(),
        ));
    }

    let score = match session.finish() {
        Some(score) => score,
        None => session.final_score().unwrap_or_default(),
    };
    let result = build_result(session, score);
    drop(guard);

    timer::stop(&state).await;
    tracing::info!("Exam finished with score {}", score);

    Ok(Json(result))
}

/// Returns the finished session's result and detailed report.
pub async fn result(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let guard = state.session.lock().await;
    let session = guard
        .as_ref()
        .ok_or(AppError::NotFound("No active exam session".to_string()))?;
    let score = session
        .final_score()
        .ok_or(AppError::BadRequest("Exam not finished yet".to_string()))?;
    Ok(Json(build_result(session, score)))
}

/// The downloadable result document. A pure projection of the finished
/// session: the answers are exactly the map the scorer consumed.
#[derive(Debug, Serialize)]
pub struct ExportDocument {
    pub student: String,
    pub grade: String,
    pub test: String,
    pub answers: HashMap<i64, usize>,
}

/// Serves the result document as a JSON attachment.
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let guard = state.session.lock().await;
    let session = guard
        .as_ref()
        .ok_or(AppError::NotFound("No active exam session".to_string()))?;
    if session.phase() != Phase::Finished {
        return Err(AppError::BadRequest("Exam not finished yet".to_string()));
    }

    let document = ExportDocument {
        student: session.student().to_string(),
        grade: session.grade().to_string(),
        test: session.test().name.clone(),
        answers: session.answers().clone(),
    };

    Ok((
        StatusCode::OK,
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"result.json\"",
        )],
        Json(document),
    ))
}
