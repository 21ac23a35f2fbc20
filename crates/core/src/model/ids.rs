use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a lesson or bank identifier is not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown identifier: {0}")]
pub struct UnknownIdError(pub String);

/// One of the lesson topics that carries its own quiz.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LessonId {
    #[serde(rename = "vectors-motion")]
    VectorsMotion,
    #[serde(rename = "kinematics-1d")]
    Kinematics1d,
    #[serde(rename = "projectile-2d")]
    Projectile2d,
}

impl LessonId {
    /// All lessons, in course order.
    pub const ALL: [LessonId; 3] = [
        LessonId::VectorsMotion,
        LessonId::Kinematics1d,
        LessonId::Projectile2d,
    ];

    /// Stable string id used in storage and routes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LessonId::VectorsMotion => "vectors-motion",
            LessonId::Kinematics1d => "kinematics-1d",
            LessonId::Projectile2d => "projectile-2d",
        }
    }

    /// Human readable lesson title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            LessonId::VectorsMotion => "Vectors & Motion",
            LessonId::Kinematics1d => "1D Kinematics",
            LessonId::Projectile2d => "2D Projectile Motion",
        }
    }
}

/// Identifies a question bank: one per lesson plus the final exam.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BankId {
    Lesson(LessonId),
    FinalExam,
}

impl BankId {
    pub const FINAL_EXAM: &'static str = "final-exam";

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BankId::Lesson(lesson) => lesson.as_str(),
            BankId::FinalExam => Self::FINAL_EXAM,
        }
    }

    #[must_use]
    pub fn is_final_exam(self) -> bool {
        matches!(self, BankId::FinalExam)
    }
}

impl From<LessonId> for BankId {
    fn from(lesson: LessonId) -> Self {
        BankId::Lesson(lesson)
    }
}

impl FromStr for LessonId {
    type Err = UnknownIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LessonId::ALL
            .into_iter()
            .find(|lesson| lesson.as_str() == s)
            .ok_or_else(|| UnknownIdError(s.to_string()))
    }
}

impl FromStr for BankId {
    type Err = UnknownIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::FINAL_EXAM {
            return Ok(BankId::FinalExam);
        }
        s.parse::<LessonId>().map(BankId::Lesson)
    }
}

impl fmt::Debug for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonId({})", self.as_str())
    }
}

impl fmt::Debug for BankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BankId({})", self.as_str())
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_ids_parse_from_their_string_form() {
        for lesson in LessonId::ALL {
            assert_eq!(lesson.as_str().parse::<LessonId>().unwrap(), lesson);
        }
    }

    #[test]
    fn bank_id_parses_final_exam_and_lessons() {
        assert_eq!("final-exam".parse::<BankId>().unwrap(), BankId::FinalExam);
        assert_eq!(
            "kinematics-1d".parse::<BankId>().unwrap(),
            BankId::Lesson(LessonId::Kinematics1d)
        );
    }

    #[test]
    fn unknown_bank_id_is_rejected() {
        let err = "thermodynamics".parse::<BankId>().unwrap_err();
        assert_eq!(err, UnknownIdError("thermodynamics".into()));
    }
}
