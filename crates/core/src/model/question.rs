use std::collections::BTreeMap;

use crate::model::ids::{BankId, LessonId};

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single quiz prompt with its expected free-text answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    answer: String,
}

impl Question {
    #[must_use]
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// Immutable, named set of questions for one lesson or the final exam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    id: BankId,
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(id: BankId, questions: Vec<Question>) -> Self {
        Self { id, questions }
    }

    #[must_use]
    pub fn id(&self) -> BankId {
        self.id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Every question bank known to the site, keyed by bank id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionCatalog {
    banks: BTreeMap<BankId, QuestionBank>,
}

impl QuestionCatalog {
    /// Build a catalog from explicit banks. Later banks replace earlier ones with the same id.
    #[must_use]
    pub fn from_banks(banks: impl IntoIterator<Item = QuestionBank>) -> Self {
        Self {
            banks: banks.into_iter().map(|bank| (bank.id(), bank)).collect(),
        }
    }

    /// The lesson and final-exam banks shipped with the site.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_banks([
            QuestionBank::new(
                LessonId::VectorsMotion.into(),
                vec![
                    Question::new(
                        "Is velocity a scalar or a vector quantity?",
                        "vector",
                    ),
                    Question::new("Is speed a scalar or a vector quantity?", "scalar"),
                    Question::new(
                        "What is the magnitude of the vector (3, 4)?",
                        "5",
                    ),
                    Question::new(
                        "What quantity describes the change in position of an object?",
                        "displacement",
                    ),
                    Question::new(
                        "What is the rate of change of velocity called?",
                        "acceleration",
                    ),
                    Question::new(
                        "Two perpendicular vectors have a dot product of what value?",
                        "0",
                    ),
                ],
            ),
            QuestionBank::new(
                LessonId::Kinematics1d.into(),
                vec![
                    Question::new(
                        "A car starts from rest and accelerates at 2 m/s^2 for 5 s. What is its final speed in m/s?",
                        "10",
                    ),
                    Question::new(
                        "What is the slope of a position-time graph called?",
                        "velocity",
                    ),
                    Question::new(
                        "What is the slope of a velocity-time graph called?",
                        "acceleration",
                    ),
                    Question::new(
                        "An object moves at a constant 3 m/s for 4 s. How far does it travel in meters?",
                        "12",
                    ),
                    Question::new(
                        "What does the area under a velocity-time graph represent?",
                        "displacement",
                    ),
                    Question::new(
                        "What is the acceleration of an object moving at constant velocity?",
                        "0",
                    ),
                ],
            ),
            QuestionBank::new(
                LessonId::Projectile2d.into(),
                vec![
                    Question::new(
                        "Ignoring air resistance, what is the horizontal acceleration of a projectile?",
                        "0",
                    ),
                    Question::new(
                        "At the top of its flight, what is the vertical velocity of a projectile?",
                        "0",
                    ),
                    Question::new(
                        "Which launch angle in degrees gives the maximum range on level ground?",
                        "45",
                    ),
                    Question::new(
                        "Which force acts on a projectile in flight if air resistance is ignored?",
                        "gravity",
                    ),
                    Question::new(
                        "What is the shape of a projectile's trajectory?",
                        "parabola",
                    ),
                    Question::new(
                        "Horizontal and vertical motion of a projectile are treated as what?",
                        "independent",
                    ),
                ],
            ),
            QuestionBank::new(
                BankId::FinalExam,
                vec![
                    Question::new("Is acceleration a scalar or a vector quantity?", "vector"),
                    Question::new(
                        "A ball is dropped from rest. Ignoring air resistance, what is its speed in m/s after 2 s (use g = 10 m/s^2)?",
                        "20",
                    ),
                    Question::new(
                        "What is the area under an acceleration-time graph equal to?",
                        "change in velocity",
                    ),
                    Question::new(
                        "A projectile is launched horizontally. What is its initial vertical velocity?",
                        "0",
                    ),
                    Question::new(
                        "Complementary launch angles on level ground produce the same what?",
                        "range",
                    ),
                ],
            ),
        ])
    }

    #[must_use]
    pub fn bank(&self, id: BankId) -> Option<&QuestionBank> {
        self.banks.get(&id)
    }

    /// Look up a bank by its string id. Unknown ids yield `None`.
    #[must_use]
    pub fn bank_by_name(&self, name: &str) -> Option<&QuestionBank> {
        name.parse::<BankId>().ok().and_then(|id| self.bank(id))
    }

    pub fn banks(&self) -> impl Iterator<Item = &QuestionBank> {
        self.banks.values()
    }
}
