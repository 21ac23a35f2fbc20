mod practice_vm;
mod profile_vm;
mod progress_vm;
mod quiz_vm;

pub use practice_vm::{
    PracticeCardVm, PracticeFeedbackVm, map_practice_card, map_practice_feedback,
};
pub use profile_vm::{
    ProfileFormVm, footer_text, map_profile_form, nav_label, profile_error_message,
};
pub use progress_vm::{LessonStatusVm, ProgressVm, map_progress};
pub use quiz_vm::{QuizFeedbackVm, QuizVm, map_quiz};
