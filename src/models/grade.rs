// src/models/grade.rs

use serde::{Deserialize, Serialize};

/// One entry of the 'grades' catalog document.
/// Used only to populate the student start form's grade selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: String,
    pub name: String,
}
