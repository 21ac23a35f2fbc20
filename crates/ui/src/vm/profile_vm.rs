use mentor_core::model::{Profile, ProfileDraft, ProfileError};
use services::ProfileServiceError;

/// Account dashboard form, pre-filled from the stored profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileFormVm {
    pub draft: ProfileDraft,
    pub updated_label: String,
}

#[must_use]
pub fn map_profile_form(profile: &Profile) -> ProfileFormVm {
    let updated_label = profile.updated_at().map_or_else(
        || "Not saved yet".to_string(),
        |at| format!("Last updated {}", at.format("%Y-%m-%d %H:%M UTC")),
    );
    ProfileFormVm {
        draft: profile.to_draft(),
        updated_label,
    }
}

#[must_use]
pub fn profile_error_message(err: &ProfileServiceError) -> String {
    match err {
        ProfileServiceError::Profile(ProfileError::NotANumber { field }) => {
            format!("{} must be a number.", field_label(field))
        }
        ProfileServiceError::Profile(ProfileError::OutOfRange { field, min, max }) => {
            format!("{} must be between {min} and {max}.", field_label(field))
        }
        _ => "Your profile could not be saved. Please try again.".to_string(),
    }
}

fn field_label(field: &str) -> &str {
    match field {
        "weeklyTargetHours" => "Weekly target hours",
        "physics1Mastery" => "Physics 1 mastery",
        "physics2Mastery" => "Physics 2 mastery",
        "currentStreak" => "Current streak",
        other => other,
    }
}

/// Label for the account button in the header.
#[must_use]
pub fn nav_label(email: Option<&str>) -> String {
    email.map_or_else(|| "Sign in".to_string(), str::to_string)
}

#[must_use]
pub fn footer_text(year: i32) -> String {
    format!("Physics Mentor © {year}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::time::fixed_now;

    #[test]
    fn unsaved_profile_has_placeholder_label() {
        let vm = map_profile_form(&Profile::default());
        assert_eq!(vm.updated_label, "Not saved yet");
    }

    #[test]
    fn saved_profile_shows_timestamp() {
        let profile = ProfileDraft {
            display_name: "Ada".into(),
            ..ProfileDraft::default()
        }
        .validate(fixed_now())
        .unwrap();
        let vm = map_profile_form(&profile);
        assert_eq!(vm.updated_label, "Last updated 2023-11-14 22:13 UTC");
        assert_eq!(vm.draft.display_name, "Ada");
    }

    #[test]
    fn range_errors_name_the_field() {
        let err = ProfileServiceError::Profile(ProfileError::OutOfRange {
            field: "physics1Mastery",
            min: 0.0,
            max: 100.0,
        });
        assert_eq!(
            profile_error_message(&err),
            "Physics 1 mastery must be between 0 and 100."
        );
    }

    #[test]
    fn nav_and_footer_labels() {
        assert_eq!(nav_label(None), "Sign in");
        assert_eq!(nav_label(Some("ada@example.com")), "ada@example.com");
        assert_eq!(footer_text(2023), "Physics Mentor © 2023");
    }
}
