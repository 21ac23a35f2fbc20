use rand::Rng;
use rand::seq::SliceRandom;

use mentor_core::model::{Question, QuestionBank};

/// Copy of the bank's questions in uniformly random order.
#[must_use]
pub fn shuffled_order<R: Rng + ?Sized>(bank: &QuestionBank, rng: &mut R) -> Vec<Question> {
    let mut order = bank.questions().to_vec();
    order.as_mut_slice().shuffle(rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::model::{BankId, LessonId, QuestionCatalog};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn prompts(order: &[Question]) -> Vec<String> {
        let mut prompts: Vec<String> = order.iter().map(|q| q.prompt().to_string()).collect();
        prompts.sort();
        prompts
    }

    #[test]
    fn shuffle_keeps_every_question_once() {
        let catalog = QuestionCatalog::builtin();
        let bank = catalog
            .bank(BankId::Lesson(LessonId::Kinematics1d))
            .unwrap();
        let order = shuffled_order(bank, &mut StdRng::seed_from_u64(7));

        assert_eq!(order.len(), bank.len());
        assert_eq!(prompts(&order), prompts(bank.questions()));
    }

    #[test]
    fn same_seed_gives_same_order() {
        let catalog = QuestionCatalog::builtin();
        let bank = catalog.bank(BankId::FinalExam).unwrap();
        let first = shuffled_order(bank, &mut StdRng::seed_from_u64(42));
        let second = shuffled_order(bank, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
