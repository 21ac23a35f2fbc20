use chrono::{DateTime, Utc};
use thiserror::Error;

pub const MAX_WEEKLY_HOURS: f64 = 168.0;
pub const MAX_MASTERY: u8 = 100;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// User-entered study profile shown on the account dashboard.
///
/// These mastery numbers are self-reported and independent of the quiz
/// engine's `MasteryState`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    display_name: String,
    study_goal: String,
    weekly_target_hours: f64,
    physics1_mastery: u8,
    physics2_mastery: u8,
    current_streak: u32,
    notes: String,
    updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Rehydrate a profile from storage, re-checking numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::OutOfRange` if a stored number is outside its range.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        display_name: String,
        study_goal: String,
        weekly_target_hours: f64,
        physics1_mastery: u8,
        physics2_mastery: u8,
        current_streak: u32,
        notes: String,
        updated_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ProfileError> {
        check_hours(weekly_target_hours)?;
        check_mastery("physics1Mastery", physics1_mastery)?;
        check_mastery("physics2Mastery", physics2_mastery)?;

        Ok(Self {
            display_name,
            study_goal,
            weekly_target_hours,
            physics1_mastery,
            physics2_mastery,
            current_streak,
            notes,
            updated_at,
        })
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn study_goal(&self) -> &str {
        &self.study_goal
    }

    #[must_use]
    pub fn weekly_target_hours(&self) -> f64 {
        self.weekly_target_hours
    }

    #[must_use]
    pub fn physics1_mastery(&self) -> u8 {
        self.physics1_mastery
    }

    #[must_use]
    pub fn physics2_mastery(&self) -> u8 {
        self.physics2_mastery
    }

    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Profile pre-filled with a display name derived from the account email.
    #[must_use]
    pub fn for_new_account(email: &str) -> Self {
        let display_name = email.split('@').next().unwrap_or_default().to_string();
        Self {
            display_name,
            ..Self::default()
        }
    }

    /// Editable copy of this profile as raw form values.
    #[must_use]
    pub fn to_draft(&self) -> ProfileDraft {
        ProfileDraft {
            display_name: self.display_name.clone(),
            study_goal: self.study_goal.clone(),
            weekly_target_hours: self.weekly_target_hours.to_string(),
            physics1_mastery: self.physics1_mastery.to_string(),
            physics2_mastery: self.physics2_mastery.to_string(),
            current_streak: self.current_streak.to_string(),
            notes: self.notes.clone(),
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Raw profile form values as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileDraft {
    pub display_name: String,
    pub study_goal: String,
    pub weekly_target_hours: String,
    pub physics1_mastery: String,
    pub physics2_mastery: String,
    pub current_streak: String,
    pub notes: String,
}

impl ProfileDraft {
    /// Validate the form and stamp it with `now`. Blank numeric fields count as zero.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` when a numeric field does not parse or is out of range.
    pub fn validate(self, now: DateTime<Utc>) -> Result<Profile, ProfileError> {
        let weekly_target_hours = parse_field::<f64>("weeklyTargetHours", &self.weekly_target_hours)?;
        let physics1_mastery = parse_field::<u8>("physics1Mastery", &self.physics1_mastery)?;
        let physics2_mastery = parse_field::<u8>("physics2Mastery", &self.physics2_mastery)?;
        let current_streak = parse_field::<u32>("currentStreak", &self.current_streak)?;

        Profile::from_persisted(
            self.display_name.trim().to_string(),
            self.study_goal.trim().to_string(),
            weekly_target_hours,
            physics1_mastery,
            physics2_mastery,
            current_streak,
            self.notes.trim().to_string(),
            Some(now),
        )
    }
}

fn parse_field<T>(field: &'static str, raw: &str) -> Result<T, ProfileError>
where
    T: std::str::FromStr + Default,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed
        .parse::<T>()
        .map_err(|_| ProfileError::NotANumber { field })
}

fn check_hours(hours: f64) -> Result<(), ProfileError> {
    if hours.is_finite() && (0.0..=MAX_WEEKLY_HOURS).contains(&hours) {
        Ok(())
    } else {
        Err(ProfileError::OutOfRange {
            field: "weeklyTargetHours",
            min: 0.0,
            max: MAX_WEEKLY_HOURS,
        })
    }
}

fn check_mastery(field: &'static str, value: u8) -> Result<(), ProfileError> {
    if value <= MAX_MASTERY {
        Ok(())
    } else {
        Err(ProfileError::OutOfRange {
            field,
            min: 0.0,
            max: f64::from(MAX_MASTERY),
        })
    }
}
