// src/models/catalog.rs

use serde::Deserialize;

use crate::models::{grade::Grade, teacher::Teacher, test::TestDef};

/// The read-only-at-startup data set the loader populates: every test,
/// grade and teacher known to the service. Replaced wholesale on a
/// successful load; the editor and settings handlers mutate it afterwards.
#[derive(Debug, Default)]
pub struct Catalog {
    pub tests: Vec<TestDef>,
    pub grades: Vec<Grade>,
    pub teachers: Vec<Teacher>,
}

impl Catalog {
    /// Exact, case-sensitive lookup by access code.
    pub fn find_test(&self, code: &str) -> Option<&TestDef> {
        self.tests.iter().find(|t| t.code == code)
    }

    pub fn find_grade(&self, id: &str) -> Option<&Grade> {
        self.grades.iter().find(|g| g.id == id)
    }

    pub fn find_teacher(&self, user: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.user == user)
    }
}

/// Wire shape of the 'tests' document: `{ "tests": [...] }`.
#[derive(Debug, Deserialize)]
pub struct TestsDocument {
    pub tests: Vec<TestDef>,
}

/// Wire shape of the 'grades' document: `{ "grades": [...] }`.
#[derive(Debug, Deserialize)]
pub struct GradesDocument {
    pub grades: Vec<Grade>,
}

/// Wire shape of the 'teachers' document: `{ "teachers": [...] }`.
#[derive(Debug, Deserialize)]
pub struct TeachersDocument {
    pub teachers: Vec<Teacher>,
}
