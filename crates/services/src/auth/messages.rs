//! Human-readable text for identity provider failure codes.

pub const GENERIC_MESSAGE: &str = "Authentication failed. Please try again.";
pub const NETWORK_MESSAGE: &str =
    "Could not reach the sign-in service. Check your connection and try again.";

/// Reduce `CODE : detail` to `CODE`.
#[must_use]
pub fn error_code(raw: &str) -> &str {
    raw.split(':').next().unwrap_or(raw).trim()
}

/// Translate a provider error code into the message shown to the user.
#[must_use]
pub fn provider_message(code: &str) -> &'static str {
    match error_code(code) {
        "EMAIL_EXISTS" => "An account with this email already exists.",
        "EMAIL_NOT_FOUND" => "No account found with this email.",
        "INVALID_PASSWORD" => "Incorrect password.",
        "INVALID_LOGIN_CREDENTIALS" => "Incorrect email or password.",
        "INVALID_EMAIL" => "Please enter a valid email address.",
        "MISSING_PASSWORD" => "Please enter a password.",
        "WEAK_PASSWORD" => "Password should be at least 6 characters.",
        "USER_DISABLED" => "This account has been disabled.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Please try again later.",
        "OPERATION_NOT_ALLOWED" => "Email/password sign-in is not enabled.",
        _ => GENERIC_MESSAGE,
    }
}
