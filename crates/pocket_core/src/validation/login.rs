//! Login form field rules.
//!
//! Rules, in evaluation order per field:
//! - username: required, at least 2 chars, `^[A-Za-z_][A-Za-z0-9_]*$`.
//! - password: required, at least 8 chars.
//! - email: required, local@domain pattern.
//! - phone: required, 10 to 15 ASCII digits.
//!
//! Lengths count Unicode scalar values, not UTF-16 code units: one emoji
//! outside the BMP counts as one character toward a minimum.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const USERNAME_MIN_CHARS: usize = 2;
pub const PASSWORD_MIN_CHARS: usize = 8;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid username regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))"#,
        r"@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$",
    ))
    .expect("valid email regex")
});
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10,15}$").expect("valid phone regex"));

/// Login form field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginField {
    Username,
    Password,
    Email,
    Phone,
}

impl LoginField {
    pub const ALL: [LoginField; 4] = [Self::Username, Self::Password, Self::Email, Self::Phone];

    /// Stable field key used in error envelopes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

/// Which rule rejected a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort,
    WrongFormat,
}

impl FieldError {
    /// Inline message shown under `field`.
    pub fn message(self, field: LoginField) -> &'static str {
        match (field, self) {
            (LoginField::Username, Self::Required) => "Username is required.",
            (LoginField::Username, Self::TooShort) => {
                "Username can't be less than two characters."
            }
            (LoginField::Username, Self::WrongFormat) => "Username is in wrong format.",
            (LoginField::Password, Self::Required) => "Password is required.",
            (LoginField::Password, _) => "Password must be more than 8 characters.",
            (LoginField::Email, Self::Required) => "Email is required.",
            (LoginField::Email, _) => "Email is in wrong format.",
            (LoginField::Phone, Self::Required) => "Phone is required.",
            (LoginField::Phone, _) => "Phone is in wrong format.",
        }
    }
}

/// Raw login form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: String,
}

impl LoginForm {
    pub fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Username => &self.username,
            LoginField::Password => &self.password,
            LoginField::Email => &self.email,
            LoginField::Phone => &self.phone,
        }
    }
}

/// Per-field inline messages. Empty string means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginErrors {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: String,
}

impl LoginErrors {
    pub fn get(&self, field: LoginField) -> &str {
        match field {
            LoginField::Username => &self.username,
            LoginField::Password => &self.password,
            LoginField::Email => &self.email,
            LoginField::Phone => &self.phone,
        }
    }

    fn slot_mut(&mut self, field: LoginField) -> &mut String {
        match field {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
            LoginField::Email => &mut self.email,
            LoginField::Phone => &mut self.phone,
        }
    }

    /// Fields currently carrying a message.
    pub fn invalid_fields(&self) -> Vec<LoginField> {
        LoginField::ALL
            .into_iter()
            .filter(|field| !self.get(*field).is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.invalid_fields().is_empty()
    }
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginValidation {
    pub errors: LoginErrors,
    pub is_valid: bool,
}

/// Validates all four fields and collects inline messages.
pub fn validate_login(form: &LoginForm) -> LoginValidation {
    let mut errors = LoginErrors::default();
    for field in LoginField::ALL {
        if let Err(err) = check_field(field, form.value(field)) {
            *errors.slot_mut(field) = err.message(field).to_string();
        }
    }
    let is_valid = errors.is_empty();
    LoginValidation { errors, is_valid }
}

/// Applies the rule chain for one field.
pub fn check_field(field: LoginField, value: &str) -> Result<(), FieldError> {
    match field {
        LoginField::Username => check_username(value),
        LoginField::Password => check_password(value),
        LoginField::Email => check_email(value),
        LoginField::Phone => check_phone(value),
    }
}

pub fn check_username(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if value.chars().count() < USERNAME_MIN_CHARS {
        return Err(FieldError::TooShort);
    }
    if !USERNAME_RE.is_match(value) {
        return Err(FieldError::WrongFormat);
    }
    Ok(())
}

/// No upper bound and no character-class requirement.
pub fn check_password(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if value.chars().count() < PASSWORD_MIN_CHARS {
        return Err(FieldError::TooShort);
    }
    Ok(())
}

pub fn check_email(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if !EMAIL_RE.is_match(value) {
        return Err(FieldError::WrongFormat);
    }
    Ok(())
}

pub fn check_phone(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if !PHONE_RE.is_match(value) {
        return Err(FieldError::WrongFormat);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_email, check_password, check_username, FieldError, LoginField};

    #[test]
    fn username_rule_order_is_required_then_length_then_format() {
        assert_eq!(check_username(""), Err(FieldError::Required));
        assert_eq!(check_username("1"), Err(FieldError::TooShort));
        assert_eq!(check_username("1a"), Err(FieldError::WrongFormat));
        assert_eq!(check_username("_a"), Ok(()));
    }

    #[test]
    fn length_minimum_counts_scalar_values() {
        // Eight UTF-16 units, four characters.
        assert_eq!(check_password("\u{1F600}".repeat(4).as_str()), Err(FieldError::TooShort));
        assert_eq!(check_password("\u{1F600}".repeat(8).as_str()), Ok(()));
    }

    #[test]
    fn email_accepts_quoted_local_part_and_ip_literal() {
        assert_eq!(check_email(r#""john doe"@example.org"#), Ok(()));
        assert_eq!(check_email("ops@[192.168.0.1]"), Ok(()));
        assert_eq!(check_email("a..b@example.com"), Err(FieldError::WrongFormat));
        assert_eq!(check_email("user@localhost"), Err(FieldError::WrongFormat));
    }

    #[test]
    fn messages_match_inline_copy() {
        assert_eq!(
            FieldError::TooShort.message(LoginField::Password),
            "Password must be more than 8 characters."
        );
        assert_eq!(
            FieldError::WrongFormat.message(LoginField::Phone),
            "Phone is in wrong format."
        );
    }
}
