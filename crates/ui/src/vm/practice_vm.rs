use mentor_core::practice::{PracticeFeedback, PracticeProblem};

#[derive(Clone, Debug, PartialEq)]
pub struct PracticeCardVm {
    pub id: &'static str,
    pub title: &'static str,
    pub prompt: &'static str,
    pub unit: &'static str,
    pub expected: f64,
}

#[must_use]
pub fn map_practice_card(problem: &PracticeProblem) -> PracticeCardVm {
    PracticeCardVm {
        id: problem.id,
        title: problem.title,
        prompt: problem.prompt,
        unit: problem.unit,
        expected: problem.expected,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeFeedbackVm {
    pub text: String,
    pub class: &'static str,
}

#[must_use]
pub fn map_practice_feedback(feedback: &PracticeFeedback) -> PracticeFeedbackVm {
    let class = match feedback {
        PracticeFeedback::Correct { .. } => "feedback correct",
        PracticeFeedback::Incorrect { .. } => "feedback incorrect",
        PracticeFeedback::NotNumeric => "feedback",
    };
    PracticeFeedbackVm {
        text: feedback.message(),
        class,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::practice::{check, practice_problems};

    #[test]
    fn cards_cover_catalog() {
        let cards: Vec<_> = practice_problems().iter().map(map_practice_card).collect();
        assert_eq!(cards.len(), practice_problems().len());
        assert!(cards.iter().all(|card| !card.unit.is_empty()));
    }

    #[test]
    fn feedback_classes_follow_verdict() {
        let ok = map_practice_feedback(&check("9.81", 9.8, "m/s²"));
        assert_eq!(ok.class, "feedback correct");
        assert_eq!(ok.text, "Nice work. 9.81 m/s² is correct.");

        let wrong = map_practice_feedback(&check("10.5", 9.8, "m/s²"));
        assert_eq!(wrong.class, "feedback incorrect");

        let blank = map_practice_feedback(&check("", 9.8, "m/s²"));
        assert_eq!(blank.text, "Enter a numeric answer to get feedback.");
    }
}
