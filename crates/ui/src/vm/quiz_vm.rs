use mentor_core::quiz::{QuizError, QuizMode, QuizOutcome, QuizSession, STREAK_TARGET};
use services::QuizServiceError;

/// Quiz modal contents for the open session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub title: String,
    pub prompt: Option<String>,
    pub position_label: String,
    pub concluded: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizFeedbackVm {
    pub text: String,
    pub correct: bool,
}

impl QuizFeedbackVm {
    #[must_use]
    pub fn from_outcome(outcome: &QuizOutcome) -> Self {
        Self {
            text: outcome.message(),
            correct: outcome.is_correct(),
        }
    }

    #[must_use]
    pub fn from_error(err: &QuizServiceError) -> Self {
        let text = match err {
            QuizServiceError::Quiz(QuizError::EmptyAnswer) => "Enter an answer first.",
            QuizServiceError::Quiz(QuizError::Concluded) => {
                "This exam is finished. Close it or start again."
            }
            QuizServiceError::Quiz(QuizError::NoActiveQuiz) => "Start a quiz first.",
            _ => "Your progress could not be saved.",
        };
        Self {
            text: text.to_string(),
            correct: false,
        }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.correct { "feedback correct" } else { "feedback incorrect" }
    }
}

#[must_use]
pub fn map_quiz(session: &QuizSession) -> QuizVm {
    let (title, position_label) = match session.mode() {
        QuizMode::Lesson(lesson) => (
            format!("{} quiz", lesson.title()),
            format!("Streak: {} / {STREAK_TARGET}", session.streak()),
        ),
        QuizMode::FinalExam => {
            let total = session.total();
            let position = (session.pointer() + 1).min(total);
            (
                "Final exam".to_string(),
                format!("Question {position} of {total}"),
            )
        }
    };

    QuizVm {
        title,
        prompt: session.current_question().map(|q| q.prompt().to_string()),
        position_label,
        concluded: session.is_concluded(),
    }
}
