// src/models/teacher.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One entry of the 'teachers' catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub name: String,

    /// Login username, unique within the catalog.
    pub user: String,

    /// Plaintext password. Compared verbatim at login and never
    /// serialized back out.
    #[serde(skip_serializing)]
    pub pass: String,

    /// Codes of the tests linked to this teacher.
    #[serde(default)]
    pub tests: Vec<String>,
}

/// DTO for the teacher login form.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub user: String,
    #[validate(length(min = 1, max = 128))]
    pub pass: String,
}

/// The authenticated identity returned on a successful login.
#[derive(Debug, Serialize)]
pub struct TeacherIdentity {
    pub name: String,
    pub user: String,
    pub tests: Vec<String>,
}

impl From<&Teacher> for TeacherIdentity {
    fn from(t: &Teacher) -> Self {
        TeacherIdentity {
            name: t.name.clone(),
            user: t.user.clone(),
            tests: t.tests.clone(),
        }
    }
}
