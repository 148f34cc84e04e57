use lazy_static::lazy_static;
use regex::Regex;

/// Minimum number of characters accepted for a new password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

lazy_static! {
    /// `local@domain.tld` shape: no whitespace or `@` in any segment and at
    /// least one dot after the `@`.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Returns true when `email` has the `local@domain.tld` shape the admin
/// console accepts. The value is matched as given, surrounding whitespace
/// included.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Returns true when `password` is long enough to be accepted as a new
/// password. Length is counted in Unicode scalar values, not bytes or UTF-16
/// code units, so a character outside the Basic Multilingual Plane (an emoji,
/// say) counts once where a browser's `String.length` would count it twice.
pub fn meets_password_length(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}
