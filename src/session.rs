// src/session.rs

use std::collections::HashMap;

use crate::models::test::{Question, TestDef};
use crate::score;

/// Lifecycle of one exam attempt. The NotStarted state of the flow is
/// represented by the absence of a session; once constructed, a session is
/// InProgress and moves to Finished exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Finished,
}

/// Outcome of a one-second countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Seconds remain; carries the new remaining count.
    Running(u64),
    /// This tick hit zero: the finish transition fired, carrying the score.
    Expired(i64),
    /// The session was already finished; the countdown should stop.
    Stopped,
}

/// The mutable in-memory record of one student's attempt at a test.
///
/// Owns a working clone of the test definition so the catalog can be
/// edited concurrently without affecting an exam already underway.
#[derive(Debug)]
pub struct ExamSession {
    student: String,
    grade: String,
    test: TestDef,
    index: usize,
    answers: HashMap<i64, usize>,
    remaining_secs: u64,
    phase: Phase,
    final_score: Option<i64>,
}

impl ExamSession {
    /// Enters InProgress: index 0, empty answer map, full countdown.
    pub fn start(student: String, grade: String, test: TestDef) -> Self {
        let remaining_secs = test.time * 60;
        ExamSession {
            student,
            grade,
            test,
            index: 0,
            answers: HashMap::new(),
            remaining_secs,
            phase: Phase::InProgress,
            final_score: None,
        }
    }

    pub fn student(&self) -> &str {
        &self.student
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn test(&self) -> &TestDef {
        &self.test
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn answers(&self) -> &HashMap<i64, usize> {
        &self.answers
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// The stored total, present once the session is Finished.
    pub fn final_score(&self) -> Option<i64> {
        self.final_score
    }

    /// The question at the current index. The index is kept inside
    /// [0, question count) by the clamped navigation, so this always
    /// resolves as long as the test has at least one question.
    pub fn current_question(&self) -> Option<&Question> {
        self.test.questions.get(self.index)
    }

    pub fn at_start(&self) -> bool {
        self.index == 0
    }

    pub fn at_end(&self) -> bool {
        self.index + 1 >= self.test.questions.len()
    }

    /// Moves back one question, clamped at the first (no wraparound).
    pub fn prev(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    /// Moves forward one question, clamped at the last (no wraparound).
    pub fn next(&mut self) {
        if self.index + 1 < self.test.questions.len() {
            self.index += 1;
        }
    }

    /// Upserts the current question's entry in the answer map.
    /// Fails when the option index is outside the question's options.
    pub fn select_option(&mut self, option: usize) -> Result<(), String> {
        let question = self
            .current_question()
            .ok_or_else(|| "Test has no questions".to_string())?;
        if option >= question.options.len() {
            return Err(format!(
                "Option {} is out of range for question {}",
                option, question.id
            ));
        }
        let id = question.id;
        self.answers.insert(id, option);
        Ok(())
    }

    pub fn all_answered(&self) -> bool {
        self.answers.len() == self.test.questions.len()
    }

    /// The finish affordance: every question answered, or time ran out.
    pub fn can_finish(&self) -> bool {
        self.all_answered() || self.remaining_secs == 0
    }

    /// The single guarded InProgress -> Finished transition. Both the
    /// explicit finish and the countdown expiry come through here, so
    /// whichever fires first wins and the second trigger is a no-op.
    /// Returns the score only on the call that performed the transition.
    pub fn finish(&mut self) -> Option<i64> {
        if self.phase == Phase::Finished {
            return None;
        }
        let score = score::total(&self.test.questions, &self.answers, &self.test.points);
        self.phase = Phase::Finished;
        self.final_score = Some(score);
        Some(score)
    }

    /// Advances the countdown by one second. At the tick where the
    /// remaining count reaches zero the finish transition fires, once.
    pub fn tick(&mut self) -> Tick {
        if self.phase == Phase::Finished {
            return Tick::Stopped;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            match self.finish() {
                Some(score) => Tick::Expired(score),
                None => Tick::Stopped,
            }
        } else {
            Tick::Running(self.remaining_secs)
        }
    }
}
