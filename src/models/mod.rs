// src/models/mod.rs

pub mod catalog;
pub mod grade;
pub mod teacher;
