//! Tolerance-based numeric checking for the static practice cards.

use std::fmt;

/// Smallest tolerance ever applied, for targets near zero.
pub const MIN_TOLERANCE: f64 = 0.01;

/// Relative tolerance applied to the expected value.
pub const RELATIVE_TOLERANCE: f64 = 0.02;

const NOT_NUMERIC_MESSAGE: &str = "Enter a numeric answer to get feedback.";

/// Outcome of checking one practice answer.
#[derive(Debug, Clone, PartialEq)]
pub enum PracticeFeedback {
    /// The input could not be read as a number; nothing was graded.
    NotNumeric,
    Correct { submitted: f64, unit: String },
    Incorrect { expected: f64, unit: String },
}

impl PracticeFeedback {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, PracticeFeedback::Correct { .. })
    }

    /// User-facing feedback line.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PracticeFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PracticeFeedback::NotNumeric => f.write_str(NOT_NUMERIC_MESSAGE),
            PracticeFeedback::Correct { submitted, unit } => {
                write!(f, "Nice work. {submitted} {unit} is correct.")
            }
            PracticeFeedback::Incorrect { expected, unit } => write!(
                f,
                "Not quite. Review the model and try again (target: {expected} {unit})."
            ),
        }
    }
}

/// Accepted distance from `expected`: 2% of its magnitude, never below 0.01.
#[must_use]
pub fn tolerance_for(expected: f64) -> f64 {
    MIN_TOLERANCE.max(expected.abs() * RELATIVE_TOLERANCE)
}

/// Grade a submitted practice answer against the expected value.
#[must_use]
pub fn check(submitted_text: &str, expected: f64, unit: &str) -> PracticeFeedback {
    let Some(submitted) = parse_numeric(submitted_text) else {
        return PracticeFeedback::NotNumeric;
    };

    if (submitted - expected).abs() <= tolerance_for(expected) {
        PracticeFeedback::Correct {
            submitted,
            unit: unit.to_string(),
        }
    } else {
        PracticeFeedback::Incorrect {
            expected,
            unit: unit.to_string(),
        }
    }
}

fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

//
// ─── PRACTICE PROBLEMS ─────────────────────────────────────────────────────────
//

/// A worked-problem card: prompt text plus the numeric target and its unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeProblem {
    pub id: &'static str,
    pub title: &'static str,
    pub prompt: &'static str,
    pub expected: f64,
    pub unit: &'static str,
}

impl PracticeProblem {
    #[must_use]
    pub fn check(&self, submitted_text: &str) -> PracticeFeedback {
        check(submitted_text, self.expected, self.unit)
    }
}

/// The practice cards shown on the lessons page.
#[must_use]
pub fn practice_problems() -> Vec<PracticeProblem> {
    vec![
        PracticeProblem {
            id: "free-fall-g",
            title: "Free fall",
            prompt: "A stone is dropped near Earth's surface. What is the magnitude of its acceleration?",
            expected: 9.8,
            unit: "m/s²",
        },
        PracticeProblem {
            id: "average-speed",
            title: "Average speed",
            prompt: "A cyclist covers 150 m in 12 s. What is the average speed?",
            expected: 12.5,
            unit: "m/s",
        },
        PracticeProblem {
            id: "stopping-distance",
            title: "Braking distance",
            prompt: "A car moving at 20 m/s brakes at a constant 5 m/s². How far does it travel before stopping?",
            expected: 40.0,
            unit: "m",
        },
        PracticeProblem {
            id: "projectile-range",
            title: "Projectile range",
            prompt: "A ball is launched at 20 m/s and 45° on level ground (g = 9.8 m/s²). What is its range?",
            expected: 40.8,
            unit: "m",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_within_relative_tolerance_is_accepted() {
        let feedback = check("9.81", 9.8, "m/s²");
        assert!(feedback.is_correct());
        assert_eq!(feedback.message(), "Nice work. 9.81 m/s² is correct.");
    }

    #[test]
    fn answer_outside_tolerance_is_rejected_with_target() {
        let feedback = check("10.5", 9.8, "m/s²");
        assert!(!feedback.is_correct());
        assert_eq!(
            feedback.message(),
            "Not quite. Review the model and try again (target: 9.8 m/s²)."
        );
    }

    #[test]
    fn tolerance_has_an_absolute_floor() {
        assert!((tolerance_for(9.8) - 0.196).abs() < 1e-9);
        assert!((tolerance_for(0.0) - 0.01).abs() < f64::EPSILON);
        assert!(check("0.009", 0.0, "m").is_correct());
        assert!(!check("0.02", 0.0, "m").is_correct());
    }

    #[test]
    fn negative_targets_use_their_magnitude() {
        assert!(check("-9.7", -9.8, "m/s²").is_correct());
    }

    #[test]
    fn non_numeric_input_is_not_graded() {
        assert_eq!(check("fast", 9.8, "m/s"), PracticeFeedback::NotNumeric);
        assert_eq!(check("   ", 9.8, "m/s"), PracticeFeedback::NotNumeric);
        assert_eq!(check("NaN", 9.8, "m/s"), PracticeFeedback::NotNumeric);
        assert_eq!(
            PracticeFeedback::NotNumeric.message(),
            "Enter a numeric answer to get feedback."
        );
    }

    #[test]
    fn whole_numbers_render_without_decimals() {
        assert_eq!(
            check("40", 40.0, "m").message(),
            "Nice work. 40 m is correct."
        );
    }

    #[test]
    fn every_practice_problem_accepts_its_own_target() {
        for problem in practice_problems() {
            assert!(problem.check(&problem.expected.to_string()).is_correct(), "{}", problem.id);
        }
    }
}
