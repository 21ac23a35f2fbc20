mod account;
mod ids;
mod mastery;
mod profile;
mod question;

pub use account::{AuthSession, MIN_PASSWORD_LEN, is_plausible_email, normalize_email};
pub use ids::{BankId, LessonId, UnknownIdError};
pub use mastery::{
    FULL_PROGRESS, MasteryState, POINTS_PER_LESSON, ProgressSnapshot, compute_progress,
};
pub use profile::{MAX_MASTERY, MAX_WEEKLY_HOURS, Profile, ProfileDraft, ProfileError};
pub use question::{Question, QuestionBank, QuestionCatalog};
