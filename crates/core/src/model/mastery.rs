use std::collections::BTreeMap;

use crate::model::ids::LessonId;

/// Points granted for each passed lesson quiz.
pub const POINTS_PER_LESSON: u8 = 30;

/// Progress once the final exam is passed.
pub const FULL_PROGRESS: u8 = 100;

//
// ─── MASTERY STATE ─────────────────────────────────────────────────────────────
//

/// Durable pass/fail record for every lesson and for the final exam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasteryState {
    passed_ideas: BTreeMap<LessonId, bool>,
    final_exam_passed: bool,
}

impl Default for MasteryState {
    fn default() -> Self {
        Self {
            passed_ideas: LessonId::ALL.into_iter().map(|id| (id, false)).collect(),
            final_exam_passed: false,
        }
    }
}

impl MasteryState {
    /// Rehydrate from persisted flags. Lessons missing from `passed` default to not passed.
    #[must_use]
    pub fn from_persisted(
        passed: impl IntoIterator<Item = (LessonId, bool)>,
        final_exam_passed: bool,
    ) -> Self {
        let mut state = Self::default();
        for (lesson, flag) in passed {
            state.passed_ideas.insert(lesson, flag);
        }
        state.final_exam_passed = final_exam_passed;
        state
    }

    #[must_use]
    pub fn is_lesson_passed(&self, lesson: LessonId) -> bool {
        self.passed_ideas.get(&lesson).copied().unwrap_or(false)
    }

    /// Per-lesson flags in course order.
    pub fn lessons(&self) -> impl Iterator<Item = (LessonId, bool)> + '_ {
        self.passed_ideas.iter().map(|(id, passed)| (*id, *passed))
    }

    #[must_use]
    pub fn passed_lesson_count(&self) -> usize {
        self.passed_ideas.values().filter(|passed| **passed).count()
    }

    #[must_use]
    pub fn final_exam_passed(&self) -> bool {
        self.final_exam_passed
    }

    /// Mark a lesson as passed. Returns `true` if the flag changed.
    pub fn mark_lesson_passed(&mut self, lesson: LessonId) -> bool {
        let previous = self.passed_ideas.insert(lesson, true);
        previous != Some(true)
    }

    /// Record the outcome of a final exam attempt. A failed attempt clears an earlier pass.
    pub fn record_final_exam(&mut self, passed: bool) {
        self.final_exam_passed = passed;
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        compute_progress(self)
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            percent: self.progress(),
            lessons: self.lessons().collect(),
            final_exam_passed: self.final_exam_passed,
        }
    }
}

/// Overall course progress in percent.
///
/// `100` once the final exam is passed, otherwise `30` points per passed lesson.
#[must_use]
pub fn compute_progress(state: &MasteryState) -> u8 {
    if state.final_exam_passed() {
        return FULL_PROGRESS;
    }
    let passed = u8::try_from(state.passed_lesson_count()).unwrap_or(u8::MAX);
    passed.saturating_mul(POINTS_PER_LESSON).min(FULL_PROGRESS)
}

//
// ─── PROGRESS SNAPSHOT ─────────────────────────────────────────────────────────
//

/// Everything a progress display needs after a mastery change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub percent: u8,
    pub lessons: Vec<(LessonId, bool)>,
    pub final_exam_passed: bool,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        MasteryState::default().snapshot()
    }
}
