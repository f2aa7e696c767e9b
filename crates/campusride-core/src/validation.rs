//! Field validation rules for the login and signup forms.
//!
//! Every rule is a pure function of the raw field value. `None` means the
//! value is acceptable; `Some(message)` is the exact text shown under the
//! field.

use std::fmt;
use std::sync::LazyLock;

use enum_map::Enum;
use regex::Regex;

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const USERNAME_TOO_SHORT: &str = "Username must be at least 3 characters";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email address is invalid";
pub const EMAIL_OR_USERNAME_REQUIRED: &str = "Email or Username is required";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

/// Structural email check: something, `@`, something, `.`, something.
///
/// Unanchored: `"x a@b.c"` passes.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Identifies a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Enum)]
pub enum FieldKey {
    EmailOrUsername,
    Email,
    Username,
    Password,
    Phone,
}

impl FieldKey {
    /// Key used for this field in request bodies.
    pub fn wire_name(self) -> &'static str {
        match self {
            FieldKey::EmailOrUsername => "emailOrUsername",
            FieldKey::Email => "email",
            FieldKey::Username => "username",
            FieldKey::Password => "password",
            FieldKey::Phone => "phone",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Validates `value` for `field`.
pub fn validate(field: FieldKey, value: &str) -> Option<&'static str> {
    match field {
        FieldKey::Username => validate_username(value),
        FieldKey::Email => validate_email(value),
        FieldKey::EmailOrUsername => validate_email_or_username(value),
        FieldKey::Password => validate_password(value),
        // Phone numbers are accepted as typed.
        FieldKey::Phone => None,
    }
}

fn validate_username(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some(USERNAME_REQUIRED)
    } else if text_len(value) < MIN_USERNAME_LEN {
        Some(USERNAME_TOO_SHORT)
    } else {
        None
    }
}

fn validate_email(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !EMAIL_PATTERN.is_match(value) {
        Some(EMAIL_INVALID)
    } else {
        None
    }
}

fn validate_email_or_username(value: &str) -> Option<&'static str> {
    value.is_empty().then_some(EMAIL_OR_USERNAME_REQUIRED)
}

fn validate_password(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some(PASSWORD_REQUIRED)
    } else if text_len(value) < MIN_PASSWORD_LEN {
        Some(PASSWORD_TOO_SHORT)
    } else {
        None
    }
}

/// Length in UTF-16 code units, the unit the mobile text inputs report.
fn text_len(value: &str) -> usize {
    value.encode_utf16().count()
}
