// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::models::catalog::Catalog;
use crate::session::ExamSession;

/// Process-wide application state, constructed once in `main` and injected
/// into the router. Owns the catalog, the single active exam session, the
/// handle of the running countdown task and the catalog load status.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<RwLock<Catalog>>,
    pub session: Arc<Mutex<Option<ExamSession>>>,
    pub countdown: Arc<Mutex<Option<JoinHandle<()>>>>,
    /// Human-readable message set when startup loading failed; surfaced
    /// by the status endpoint.
    pub load_status: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            catalog: Arc::new(RwLock::new(Catalog::default())),
            session: Arc::new(Mutex::new(None)),
            countdown: Arc::new(Mutex::new(None)),
            load_status: Arc::new(RwLock::new(None)),
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
