//! Free-text answer normalization for quiz questions.

/// Trim, lowercase, and collapse internal whitespace runs to a single space.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Exact comparison after normalizing both sides.
#[must_use]
pub fn answers_match(submitted: &str, expected: &str) -> bool {
    normalize_answer(submitted) == normalize_answer(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surrounding_whitespace_and_case_are_ignored() {
        assert!(answers_match(" Velocity  ", "velocity"));
    }

    #[test]
    fn punctuation_is_significant() {
        assert!(!answers_match("Velocity!", "velocity"));
    }

    #[test]
    fn internal_whitespace_runs_collapse() {
        assert_eq!(normalize_answer("Change \t in\n  Velocity"), "change in velocity");
        assert!(answers_match("change   in velocity", "Change in velocity"));
    }

    #[test]
    fn blank_input_normalizes_to_empty() {
        assert_eq!(normalize_answer("   \t "), "");
    }
}
