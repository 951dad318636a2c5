// src/handlers/mod.rs

pub mod auth;
pub mod editor;
pub mod exam;
pub mod settings;
pub mod status;
