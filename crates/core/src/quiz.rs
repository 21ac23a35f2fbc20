//! Quiz session state machine for lesson quizzes and the final exam.
//!
//! A lesson quiz cycles through its shuffled bank forever and passes once the
//! learner answers [`STREAK_TARGET`] questions correctly in a row. The final
//! exam presents every question exactly once and passes only with a perfect
//! score. The session is pure: ordering is decided by the caller and the
//! resulting transitions are applied to `MasteryState` by the services layer.

use thiserror::Error;

use crate::answer::{answers_match, normalize_answer};
use crate::model::{BankId, LessonId, MasteryState, Question};

/// Consecutive correct answers required to pass a lesson quiz.
pub const STREAK_TARGET: u32 = 5;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question bank is empty")]
    EmptyBank,
    #[error("Type an answer before submitting.")]
    EmptyAnswer,
    #[error("the final exam is already finished")]
    Concluded,
    #[error("no quiz is open")]
    NoActiveQuiz,
}

//
// ─── OUTCOMES ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    Lesson(LessonId),
    FinalExam,
}

impl From<BankId> for QuizMode {
    fn from(id: BankId) -> Self {
        match id {
            BankId::Lesson(lesson) => QuizMode::Lesson(lesson),
            BankId::FinalExam => QuizMode::FinalExam,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerVerdict {
    Correct,
    Incorrect { expected: String },
    Skipped { expected: String },
}

/// Final score of a completed exam attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamResult {
    pub correct: usize,
    pub total: usize,
    pub score: u8,
    pub passed: bool,
}

impl ExamResult {
    #[must_use]
    pub fn new(correct: usize, total: usize) -> Self {
        let passed = total > 0 && correct >= total;
        Self {
            correct,
            total,
            score: exam_score(correct, total),
            passed,
        }
    }
}

/// Rounded percentage. Only a perfect attempt may show 100.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn exam_score(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    if correct >= total {
        return 100;
    }
    let correct = f64::from(u32::try_from(correct).unwrap_or(u32::MAX));
    let total = f64::from(u32::try_from(total).unwrap_or(u32::MAX));
    (correct / total * 100.0).round().clamp(0.0, 99.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizTransition {
    /// The session moved on to the next question.
    Advanced,
    /// The lesson streak just reached the target.
    LessonPassed(LessonId),
    /// The last exam slot was consumed.
    ExamConcluded(ExamResult),
}

/// Result of one submission or skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub mode: QuizMode,
    pub verdict: AnswerVerdict,
    pub streak: u32,
    pub transition: QuizTransition,
}

impl QuizOutcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self.verdict, AnswerVerdict::Correct)
    }

    /// Apply this outcome to the durable mastery record.
    ///
    /// Returns `true` when the caller must persist and re-render.
    pub fn apply_to(&self, mastery: &mut MasteryState) -> bool {
        match self.transition {
            QuizTransition::Advanced => false,
            QuizTransition::LessonPassed(lesson) => {
                mastery.mark_lesson_passed(lesson);
                true
            }
            QuizTransition::ExamConcluded(result) => {
                mastery.record_final_exam(result.passed);
                true
            }
        }
    }

    /// Inline feedback shown under the answer field.
    #[must_use]
    pub fn message(&self) -> String {
        let mut message = match (&self.verdict, self.mode) {
            (AnswerVerdict::Correct, QuizMode::Lesson(_)) => {
                format!("Correct! Streak: {}/{STREAK_TARGET}.", self.streak)
            }
            (AnswerVerdict::Correct, QuizMode::FinalExam) => "Correct.".to_string(),
            (AnswerVerdict::Incorrect { expected }, _) => {
                format!("Not quite. The expected answer is: {expected}.")
            }
            (AnswerVerdict::Skipped { expected }, _) => {
                format!("Skipped. The expected answer is: {expected}.")
            }
        };

        match self.transition {
            QuizTransition::Advanced => {}
            QuizTransition::LessonPassed(lesson) => {
                message.push_str(&format!(" {} passed!", lesson.title()));
            }
            QuizTransition::ExamConcluded(result) if result.passed => {
                message.push_str(&format!(
                    " Final exam complete: {}%. You passed!",
                    result.score
                ));
            }
            QuizTransition::ExamConcluded(result) => {
                message.push_str(&format!(
                    " Final exam complete: {}%. A perfect score is required to pass.",
                    result.score
                ));
            }
        }
        message
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz over one question bank. Lives only while the quiz is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    bank_id: BankId,
    order: Vec<Question>,
    pointer: usize,
    correct_count: usize,
    streak: u32,
    result: Option<ExamResult>,
}

impl QuizSession {
    /// Start a session over `order`, which the caller has already shuffled.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyBank` if there are no questions.
    pub fn start(bank_id: BankId, order: Vec<Question>) -> Result<Self, QuizError> {
        if order.is_empty() {
            return Err(QuizError::EmptyBank);
        }
        Ok(Self {
            bank_id,
            order,
            pointer: 0,
            correct_count: 0,
            streak: 0,
            result: None,
        })
    }

    #[must_use]
    pub fn bank_id(&self) -> BankId {
        self.bank_id
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.bank_id.into()
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn order(&self) -> &[Question] {
        &self.order
    }

    #[must_use]
    pub fn is_concluded(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn exam_result(&self) -> Option<ExamResult> {
        self.result
    }

    /// The question awaiting an answer, or `None` once the exam has concluded.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_concluded() {
            return None;
        }
        self.order.get(self.pointer)
    }

    /// Grade a free-text answer for the current question and advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Concluded` after the exam has finished and
    /// `QuizError::EmptyAnswer` for blank input; neither changes the session.
    pub fn submit(&mut self, raw: &str) -> Result<QuizOutcome, QuizError> {
        let question = self.current_question().ok_or(QuizError::Concluded)?;
        if normalize_answer(raw).is_empty() {
            return Err(QuizError::EmptyAnswer);
        }

        let verdict = if answers_match(raw, question.answer()) {
            AnswerVerdict::Correct
        } else {
            AnswerVerdict::Incorrect {
                expected: question.answer().to_string(),
            }
        };
        Ok(self.advance(verdict))
    }

    /// Give up on the current question without credit.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Concluded` after the exam has finished.
    pub fn skip(&mut self) -> Result<QuizOutcome, QuizError> {
        let question = self.current_question().ok_or(QuizError::Concluded)?;
        let verdict = AnswerVerdict::Skipped {
            expected: question.answer().to_string(),
        };
        Ok(self.advance(verdict))
    }

    fn advance(&mut self, verdict: AnswerVerdict) -> QuizOutcome {
        let correct = matches!(verdict, AnswerVerdict::Correct);
        let transition = match self.mode() {
            QuizMode::Lesson(lesson) => {
                self.streak = if correct { self.streak + 1 } else { 0 };
                self.pointer = (self.pointer + 1) % self.order.len();
                if correct && self.streak == STREAK_TARGET {
                    QuizTransition::LessonPassed(lesson)
                } else {
                    QuizTransition::Advanced
                }
            }
            QuizMode::FinalExam => {
                if correct {
                    self.correct_count += 1;
                }
                self.pointer += 1;
                if self.pointer >= self.order.len() {
                    let result = ExamResult::new(self.correct_count, self.order.len());
                    self.result = Some(result);
                    QuizTransition::ExamConcluded(result)
                } else {
                    QuizTransition::Advanced
                }
            }
        };

        QuizOutcome {
            mode: self.mode(),
            verdict,
            streak: self.streak,
            transition,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
