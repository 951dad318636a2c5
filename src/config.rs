// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding tests.json, grades.json and teachers.json.
    pub catalog_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        // Every setting has a default: the service must come up even when
        // nothing is configured (a missing catalog is reported, not fatal).
        let catalog_dir = env::var("CATALOG_DIR").unwrap_or_else(|_| "data".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            catalog_dir,
            port,
            rust_log,
        }
    }
}
