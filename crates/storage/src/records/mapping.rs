use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mentor_core::model::{AuthSession, LessonId, MasteryState, Profile};
use serde::{Deserialize, Serialize};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionRecord {
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

impl SessionRecord {
    pub(crate) fn from_session(session: &AuthSession) -> Self {
        Self {
            email: session.email().to_string(),
            id_token: session.id_token().to_string(),
            refresh_token: session.refresh_token().to_string(),
            expires_at: session.expires_at_ms(),
        }
    }

    /// Returns `None` when a required field is blank.
    pub(crate) fn into_session(self) -> Option<AuthSession> {
        if self.email.trim().is_empty() || self.id_token.is_empty() {
            return None;
        }
        Some(AuthSession::new(
            self.email,
            self.id_token,
            self.refresh_token,
            self.expires_at,
        ))
    }
}

//
// ─── PROFILES ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ProfileRecord {
    pub display_name: String,
    pub study_goal: String,
    pub weekly_target_hours: f64,
    pub physics1_mastery: u8,
    pub physics2_mastery: u8,
    pub current_streak: u32,
    pub notes: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileRecord {
    pub(crate) fn from_profile(profile: &Profile) -> Self {
        Self {
            display_name: profile.display_name().to_string(),
            study_goal: profile.study_goal().to_string(),
            weekly_target_hours: profile.weekly_target_hours(),
            physics1_mastery: profile.physics1_mastery(),
            physics2_mastery: profile.physics2_mastery(),
            current_streak: profile.current_streak(),
            notes: profile.notes().to_string(),
            updated_at: profile.updated_at(),
        }
    }

    pub(crate) fn into_profile(self) -> Option<Profile> {
        Profile::from_persisted(
            self.display_name,
            self.study_goal,
            self.weekly_target_hours,
            self.physics1_mastery,
            self.physics2_mastery,
            self.current_streak,
            self.notes,
            self.updated_at,
        )
        .ok()
    }
}

pub(crate) type ProfileMapRecord = BTreeMap<String, ProfileRecord>;

//
// ─── QUIZ PROGRESS ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizProgressRecord {
    pub passed_ideas: BTreeMap<String, bool>,
    pub final_exam_passed: bool,
}

impl QuizProgressRecord {
    pub(crate) fn from_state(state: &MasteryState) -> Self {
        Self {
            passed_ideas: state
                .lessons()
                .map(|(lesson, passed)| (lesson.as_str().to_string(), passed))
                .collect(),
            final_exam_passed: state.final_exam_passed(),
        }
    }

    /// Unknown lesson keys are ignored; missing ones default to not passed.
    pub(crate) fn into_state(self) -> MasteryState {
        let passed = self
            .passed_ideas
            .into_iter()
            .filter_map(|(key, flag)| key.parse::<LessonId>().ok().map(|id| (id, flag)));
        MasteryState::from_persisted(passed, self.final_exam_passed)
    }
}
