// src/timer.rs

use std::time::Duration;

use crate::session::Tick;
use crate::state::AppState;

/// Formats remaining whole seconds as zero-padded MM:SS.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Starts the countdown for the current session, cancelling any previous
/// one first so two timers can never double-drive the finish transition.
pub async fn restart(state: &AppState) {
    let mut guard = state.countdown.lock().await;
    if let Some(previous) = guard.take() {
        previous.abort();
    }
    *guard = Some(tokio::spawn(run(state.clone())));
}

/// Stops the countdown, if one is running. Called on explicit finish.
pub async fn stop(state: &AppState) {
    if let Some(handle) = state.countdown.lock().await.take() {
        handle.abort();
    }
}

/// The countdown task: one tick per second against the active session,
/// stopping as soon as the session finishes or goes away.
async fn run(state: AppState) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first tick of a tokio interval completes immediately.
    interval.tick().await;
    loop {
        interval.tick().await;
        let mut guard = state.session.lock().await;
        match guard.as_mut().map(|session| session.tick()) {
            Some(Tick::Running(_)) => {}
            Some(Tick::Expired(score)) => {
                tracing::info!("Countdown expired, session finished with score {}", score);
                break;
            }
            Some(Tick::Stopped) | None => break,
        }
    }
}
