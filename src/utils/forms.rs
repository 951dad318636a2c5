// src/utils/forms.rs

use std::str::FromStr;

/// Parses a numeric form field, silently falling back to `default` when
/// the input is empty or not a number. Bad editor input is substituted,
/// never rejected.
pub fn parse_or<T: FromStr>(input: &str, default: T) -> T {
    input.trim().parse().unwrap_or(default)
}

/// Splits a comma-separated group string into trimmed group names.
/// An empty string yields an empty set, not a single empty entry.
pub fn parse_groups(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .map(|g| g.to_string())
        .collect()
}
