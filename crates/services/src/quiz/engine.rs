use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use mentor_core::model::{MasteryState, ProgressSnapshot, QuestionCatalog};
use mentor_core::quiz::{QuizError, QuizOutcome, QuizSession, QuizTransition};
use storage::repository::MasteryRepository;

use super::plan::shuffled_order;
use super::sink::ProgressSink;
use crate::error::QuizServiceError;

/// Owns the learner's mastery record and the single open quiz, if any.
///
/// Every mastery change is persisted and pushed to the progress sink
/// before the call that caused it returns.
pub struct QuizEngine {
    catalog: Arc<QuestionCatalog>,
    repo: Arc<dyn MasteryRepository>,
    sink: Arc<dyn ProgressSink>,
    mastery: MasteryState,
    session: Option<QuizSession>,
    rng: StdRng,
}

impl QuizEngine {
    #[must_use]
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        repo: Arc<dyn MasteryRepository>,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            catalog,
            repo,
            sink,
            mastery: MasteryState::default(),
            session: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a fixed seed for question order.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Read the stored mastery record and publish it.
    ///
    /// A backend failure leaves the engine on defaults.
    pub async fn load(&mut self) {
        self.mastery = match self.repo.load_mastery().await {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "could not load quiz progress; starting fresh");
                MasteryState::default()
            }
        };
        self.sink.render(&self.mastery.snapshot());
    }

    #[must_use]
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn mastery(&self) -> &MasteryState {
        &self.mastery
    }

    #[must_use]
    pub fn progress(&self) -> ProgressSnapshot {
        self.mastery.snapshot()
    }

    /// The open quiz, if any.
    #[must_use]
    pub fn active(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Open a freshly shuffled quiz over the named bank, replacing any open one.
    ///
    /// Unknown bank names change nothing and return `None`.
    pub fn launch_quiz(&mut self, bank_name: &str) -> Option<&QuizSession> {
        let Some(bank) = self.catalog.bank_by_name(bank_name) else {
            debug!(bank = bank_name, "ignoring launch for unknown bank");
            return None;
        };
        let order = shuffled_order(bank, &mut self.rng);
        match QuizSession::start(bank.id(), order) {
            Ok(session) => {
                debug!(bank = %bank.id(), questions = session.total(), "quiz launched");
                self.session = Some(session);
                self.session.as_ref()
            }
            Err(err) => {
                warn!(bank = %bank.id(), error = %err, "could not launch quiz");
                None
            }
        }
    }

    /// Grade an answer for the open quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoActiveQuiz`, `QuizError::Concluded` or
    /// `QuizError::EmptyAnswer` without changing anything, or
    /// `QuizServiceError::Storage` if a pass or exam result cannot be saved.
    pub async fn submit_answer(&mut self, raw: &str) -> Result<QuizOutcome, QuizServiceError> {
        let session = self.session.as_mut().ok_or(QuizError::NoActiveQuiz)?;
        let outcome = session.submit(raw)?;
        self.commit(&outcome).await?;
        Ok(outcome)
    }

    /// Skip the current question without credit.
    ///
    /// # Errors
    ///
    /// Same as [`QuizEngine::submit_answer`], minus the empty-answer case.
    pub async fn skip(&mut self) -> Result<QuizOutcome, QuizServiceError> {
        let session = self.session.as_mut().ok_or(QuizError::NoActiveQuiz)?;
        let outcome = session.skip()?;
        self.commit(&outcome).await?;
        Ok(outcome)
    }

    /// Abandon the open quiz. Nothing is saved.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(bank = %session.bank_id(), "quiz closed");
        }
    }

    /// Forget every pass and store the empty record.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the record cannot be saved.
    pub async fn reset_progress(&mut self) -> Result<(), QuizServiceError> {
        self.mastery = MasteryState::default();
        self.sink.render(&self.mastery.snapshot());
        self.repo.save_mastery(&self.mastery).await?;
        info!("quiz progress reset");
        Ok(())
    }

    async fn commit(&mut self, outcome: &QuizOutcome) -> Result<(), QuizServiceError> {
        if !outcome.apply_to(&mut self.mastery) {
            return Ok(());
        }
        match outcome.transition {
            QuizTransition::LessonPassed(lesson) => {
                info!(%lesson, streak = outcome.streak, "lesson passed");
            }
            QuizTransition::ExamConcluded(result) => {
                info!(
                    score = result.score,
                    passed = result.passed,
                    "final exam concluded"
                );
            }
            QuizTransition::Advanced => {}
        }
        self.sink.render(&self.mastery.snapshot());
        self.repo.save_mastery(&self.mastery).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::model::{BankId, LessonId, Question, QuestionBank};
    use mentor_core::quiz::{AnswerVerdict, QuizMode};
    use std::sync::Mutex;
    use storage::Storage;

    #[derive(Default)]
    struct RecordingSink {
        rendered: Mutex<Vec<ProgressSnapshot>>,
    }

    impl RecordingSink {
        fn percents(&self) -> Vec<u8> {
            self.rendered
                .lock()
                .unwrap()
                .iter()
                .map(|snapshot| snapshot.percent)
                .collect()
        }
    }

    impl ProgressSink for RecordingSink {
        fn render(&self, snapshot: &ProgressSnapshot) {
            self.rendered.lock().unwrap().push(snapshot.clone());
        }
    }

    fn engine(storage: &Storage, sink: &Arc<RecordingSink>) -> QuizEngine {
        QuizEngine::new(
            Arc::new(QuestionCatalog::builtin()),
            Arc::clone(&storage.mastery),
            Arc::clone(sink) as Arc<dyn ProgressSink>,
        )
        .with_seed(11)
    }

    fn expected_answer(engine: &QuizEngine) -> String {
        engine
            .active()
            .and_then(QuizSession::current_question)
            .map(|q| q.answer().to_string())
            .unwrap()
    }

    async fn answer_correctly(engine: &mut QuizEngine) -> QuizOutcome {
        let answer = expected_answer(engine);
        engine.submit_answer(&answer).await.unwrap()
    }

    #[tokio::test]
    async fn five_correct_answers_pass_the_lesson() {
        let storage = Storage::in_memory();
        let sink = Arc::new(RecordingSink::default());
        let mut engine = engine(&storage, &sink);
        engine.load().await;

        engine.launch_quiz("vectors-motion").unwrap();
        for streak in 1..5 {
            let outcome = answer_correctly(&mut engine).await;
            assert_eq!(outcome.streak, streak);
            assert_eq!(outcome.transition, QuizTransition::Advanced);
        }
        let outcome = answer_correctly(&mut engine).await;
        assert_eq!(
            outcome.transition,
            QuizTransition::LessonPassed(LessonId::VectorsMotion)
        );
        assert!(outcome.message().ends_with("passed!"));

        assert_eq!(engine.progress().percent, 30);
        assert_eq!(sink.percents(), vec![0, 30]);
        let stored = storage.mastery.load_mastery().await.unwrap();
        assert!(stored.is_lesson_passed(LessonId::VectorsMotion));
    }

    #[tokio::test]
    async fn wrong_answer_resets_streak_and_keeps_going() {
        let storage = Storage::in_memory();
        let sink = Arc::new(RecordingSink::default());
        let mut engine = engine(&storage, &sink);

        engine.launch_quiz("kinematics-1d").unwrap();
        answer_correctly(&mut engine).await;
        answer_correctly(&mut engine).await;
        let expected = expected_answer(&engine);

        let outcome = engine.submit_answer("definitely wrong").await.unwrap();
        assert_eq!(outcome.streak, 0);
        assert_eq!(outcome.verdict, AnswerVerdict::Incorrect { expected });
        assert_eq!(engine.active().unwrap().pointer(), 3);
        assert!(sink.percents().is_empty());
        assert!(
            !storage
                .mastery
                .load_mastery()
                .await
                .unwrap()
                .is_lesson_passed(LessonId::Kinematics1d)
        );
    }

    #[tokio::test]
    async fn lesson_pointer_wraps_around() {
        let storage = Storage::in_memory();
        let sink = Arc::new(RecordingSink::default());
        let mut engine = engine(&storage, &sink);

        let total = engine.launch_quiz("projectile-2d").unwrap().total();
        for _ in 0..total {
            engine.skip().await.unwrap();
        }
        assert_eq!(engine.active().unwrap().pointer(), 0);
        assert_eq!(engine.active().unwrap().streak(), 0);
    }

    #[tokio::test]
    async fn perfect_final_exam_passes() {
        let storage = Storage::in_memory();
        let sink = Arc::new(RecordingSink::default());
        let mut engine = engine(&storage, &sink);

        let total = engine.launch_quiz("final-exam").unwrap().total();
        let mut last = None;
        for _ in 0..total {
            last = Some(answer_correctly(&mut engine).await);
        }
        let QuizTransition::ExamConcluded(result) = last.unwrap().transition else {
            panic!("exam should conclude on the last question");
        };
        assert_eq!(result.score, 100);
        assert!(result.passed);
        assert_eq!(engine.progress().percent, 100);
        assert!(storage.mastery.load_mastery().await.unwrap().final_exam_passed());
    }

    #[tokio::test]
    async fn failed_retake_revokes_pass() {
        let storage = Storage::in_memory();
        let sink = Arc::new(RecordingSink::default());
        let mut engine = engine(&storage, &sink);

        let total = engine.launch_quiz("final-exam").unwrap().total();
        for _ in 0..total {
            answer_correctly(&mut engine).await;
        }
        assert!(engine.mastery().final_exam_passed());

        engine.launch_quiz("final-exam").unwrap();
        engine.submit_answer("wrong").await.unwrap();
        let mut last = None;
        for _ in 1..total {
            last = Some(answer_correctly(&mut engine).await);
        }
        let QuizTransition::ExamConcluded(result) = last.unwrap().transition else {
            panic!("exam should conclude on the last question");
        };
        assert!(!result.passed);
        assert!(result.score < 100);
        assert!(!engine.mastery().final_exam_passed());
        assert!(!storage.mastery.load_mastery().await.unwrap().final_exam_passed());
        assert_eq!(sink.percents(), vec![100, 0]);
    }

    #[tokio::test]
    async fn concluded_exam_rejects_more_answers() {
        let storage = Storage::in_memory();
        let sink = Arc::new(RecordingSink::default());
        let mut engine = engine(&storage, &sink);

        let total = engine.launch_quiz("final-exam").unwrap().total();
        for _ in 0..total {
            engine.skip().await.unwrap();
        }
        let session = engine.active().unwrap();
        assert!(session.is_concluded());
        assert_eq!(session.exam_result().unwrap().score, 0);
        assert!(matches!(
            engine.submit_answer("anything").await,
            Err(QuizServiceError::Quiz(QuizError::Concluded))
        ));
    }

    #[tokio::test]
    async fn unknown_bank_keeps_current_session() {
        let storage = Storage::in_memory();
        let sink = Arc::new(RecordingSink::default());
        let mut engine = engine(&storage, &sink);

        engine.launch_quiz("vectors-motion").unwrap();
        answer_correctly(&mut engine).await;

        assert!(engine.launch_quiz("thermodynamics").is_none());
        let session = engine.active().unwrap();
        assert_eq!(session.mode(), QuizMode::Lesson(LessonId::VectorsMotion));
        assert_eq!(session.streak(), 1);
    }

    #[tokio::test]
    async fn blank_answer_and_missing_quiz_change_nothing() {
        let storage = Storage::in_memory();
        let sink = Arc::new(RecordingSink::default());
        let mut engine = engine(&storage, &sink);

        assert!(matches!(
            engine.submit_answer("velocity").await,
            Err(QuizServiceError::Quiz(QuizError::NoActiveQuiz))
        ));

        engine.launch_quiz("vectors-motion").unwrap();
        let before = engine.active().unwrap().clone();
        assert!(matches!(
            engine.submit_answer("   ").await,
            Err(QuizServiceError::Quiz(QuizError::EmptyAnswer))
        ));
        assert_eq!(engine.active(), Some(&before));
    }

    #[tokio::test]
    async fn relaunch_starts_over_and_close_discards() {
        let storage = Storage::in_memory();
        let sink = Arc::new(RecordingSink::default());
        let mut engine = engine(&storage, &sink);

        engine.launch_quiz("vectors-motion").unwrap();
        answer_correctly(&mut engine).await;
        let session = engine.launch_quiz("vectors-motion").unwrap();
        assert_eq!(session.streak(), 0);
        assert_eq!(session.pointer(), 0);

        engine.close();
        assert!(engine.active().is_none());
        let stored = storage
            .store
            .get_item(storage::records::QUIZ_PROGRESS_KEY)
            .await
            .unwrap();
        assert_eq!(stored, None);
    }

    #[tokio::test]
    async fn reset_progress_clears_passes() {
        let storage = Storage::in_memory();
        let sink = Arc::new(RecordingSink::default());
        let mut passed = MasteryState::default();
        passed.mark_lesson_passed(LessonId::Projectile2d);
        storage.mastery.save_mastery(&passed).await.unwrap();

        let mut engine = engine(&storage, &sink);
        engine.load().await;
        assert_eq!(engine.progress().percent, 30);

        engine.reset_progress().await.unwrap();
        assert_eq!(engine.progress().percent, 0);
        assert_eq!(
            storage.mastery.load_mastery().await.unwrap(),
            MasteryState::default()
        );
        assert_eq!(sink.percents(), vec![30, 0]);
    }

    #[tokio::test]
    async fn empty_bank_cannot_launch() {
        let storage = Storage::in_memory();
        let catalog = QuestionCatalog::from_banks([
            QuestionBank::new(BankId::Lesson(LessonId::VectorsMotion), Vec::new()),
            QuestionBank::new(
                BankId::FinalExam,
                vec![Question::new("What is speed?", "distance over time")],
            ),
        ]);
        let mut engine = QuizEngine::new(
            Arc::new(catalog),
            Arc::clone(&storage.mastery),
            Arc::new(RecordingSink::default()),
        );
        assert!(engine.launch_quiz("vectors-motion").is_none());
        assert!(engine.launch_quiz("final-exam").is_some());
    }
}
