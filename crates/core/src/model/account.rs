use chrono::{DateTime, Duration, Utc};

/// Minimum password length accepted on sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Signed-in identity with the tokens issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    email: String,
    id_token: String,
    refresh_token: String,
    expires_at_ms: i64,
}

impl AuthSession {
    #[must_use]
    pub fn new(email: String, id_token: String, refresh_token: String, expires_at_ms: i64) -> Self {
        Self {
            email,
            id_token,
            refresh_token,
            expires_at_ms,
        }
    }

    /// Build a session whose absolute expiry is `now + expires_in_secs`.
    ///
    /// Returns `None` when the lifetime cannot be represented as a timestamp.
    #[must_use]
    pub fn issued(
        email: String,
        id_token: String,
        refresh_token: String,
        expires_in_secs: i64,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let expires_at = expiry_after(expires_in_secs, now)?;
        Some(Self::new(
            email,
            id_token,
            refresh_token,
            expires_at.timestamp_millis(),
        ))
    }

    /// Whether a provider-reported lifetime fits a chrono duration.
    #[must_use]
    pub fn is_representable_lifetime(expires_in_secs: i64) -> bool {
        Duration::try_seconds(expires_in_secs.max(0)).is_some()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Expiry as epoch milliseconds.
    #[must_use]
    pub fn expires_at_ms(&self) -> i64 {
        self.expires_at_ms
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at_ms <= now.timestamp_millis()
    }
}

fn expiry_after(expires_in_secs: i64, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    now.checked_add_signed(Duration::try_seconds(expires_in_secs.max(0))?)
}

/// Canonical form used to key per-user records.
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Cheap shape check before contacting the identity provider.
#[must_use]
pub fn is_plausible_email(raw: &str) -> bool {
    let email = raw.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && domain.contains('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn issued_session_expires_after_the_given_seconds() {
        let now = fixed_now();
        let session =
            AuthSession::issued("a@b.co".into(), "id".into(), "rt".into(), 3600, now).unwrap();
        assert_eq!(
            session.expires_at_ms(),
            now.timestamp_millis() + 3_600_000
        );
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::seconds(3600)));
    }

    #[test]
    fn negative_lifetime_expires_immediately() {
        let now = fixed_now();
        let session =
            AuthSession::issued("a@b.co".into(), "id".into(), "rt".into(), -5, now).unwrap();
        assert_eq!(session.expires_at_ms(), now.timestamp_millis());
        assert!(session.is_expired(now));
    }

    #[test]
    fn oversized_lifetime_is_rejected_instead_of_overflowing() {
        let now = fixed_now();
        assert!(!AuthSession::is_representable_lifetime(i64::MAX));
        assert!(AuthSession::issued("a@b.co".into(), "id".into(), "rt".into(), i64::MAX, now).is_none());

        // Fits a duration but not a timestamp once added to `now`.
        let secs = 400_000 * 365 * 86_400;
        assert!(AuthSession::is_representable_lifetime(secs));
        assert!(AuthSession::issued("a@b.co".into(), "id".into(), "rt".into(), secs, now).is_none());
    }

    #[test]
    fn emails_are_keyed_case_insensitively() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn plausible_email_check() {
        assert!(is_plausible_email("ada@example.com"));
        assert!(!is_plausible_email("ada"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("ada@localhost"));
        assert!(!is_plausible_email("a da@example.com"));
    }
}
