// src/utils/code.rs

use chrono::Utc;

use crate::models::catalog::Catalog;

/// Generates a fresh test code not present in the catalog.
///
/// Codes are timestamp-based ("T-<millis>"); a numeric suffix resolves the
/// rare collision so appending can never produce a duplicate code.
pub fn generate_test_code(catalog: &Catalog) -> String {
    let base = format!("T-{}", Utc::now().timestamp_millis());
    if catalog.find_test(&base).is_none() {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}", base, n);
        if catalog.find_test(&candidate).is_none() {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test::{Points, TestDef};

    #[test]
    fn generated_code_is_unique_even_on_collision() {
        let mut catalog = Catalog::default();
        let first = generate_test_code(&catalog);
        assert!(first.starts_with("T-"));

        catalog.tests.push(TestDef {
            code: first.clone(),
            name: "Taken".to_string(),
            time: 0,
            questions: vec![],
            points: Points::default(),
            from: None,
            to: None,
            show_results: None,
            show_correct: None,
            groups: vec![],
        });
        let second = generate_test_code(&catalog);
        assert_ne!(first, second);
    }
}
