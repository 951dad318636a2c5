// src/utils/mod.rs

pub mod code;
pub mod forms;
