// src/score.rs

use std::collections::HashMap;

use serde::Serialize;

use crate::models::test::{Points, Question};

/// Computes the point total for an answer map against a question sequence.
///
/// A question whose map entry equals its correct-option index adds
/// `points.ok`; anything else, unanswered included, subtracts `points.bad`.
/// There is no floor at zero, so totals can go negative.
pub fn total(questions: &[Question], answers: &HashMap<i64, usize>, points: &Points) -> i64 {
    questions.iter().fold(0, |acc, q| {
        if answers.get(&q.id) == Some(&q.correct) {
            acc + points.ok
        } else {
            acc - points.bad
        }
    })
}

/// One row of the detailed result report.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub title: String,
    /// The text of the chosen option; `None` marks an unanswered question.
    pub chosen: Option<String>,
    pub correct: String,
}

/// Re-derives the per-question report from a finished session's answer map.
/// Purely a projection: no scoring logic lives here.
pub fn report(questions: &[Question], answers: &HashMap<i64, usize>) -> Vec<ReportRow> {
    questions
        .iter()
        .map(|q| ReportRow {
            title: q.title.clone(),
            chosen: answers
                .get(&q.id)
                .and_then(|&i| q.options.get(i))
                .cloned(),
            correct: q.options.get(q.correct).cloned().unwrap_or_default(),
        })
        .collect()
}
