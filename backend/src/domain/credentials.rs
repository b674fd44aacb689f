//! Credential strength validation applied before an account is created.
//!
//! Validation is pure and collects every violation rather than stopping at the
//! first. Each password strength rule is checked on its own so callers see one
//! message per rule broken.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::json;
use zeroize::Zeroizing;

use super::Error;

/// Minimum username length in characters.
pub const USERNAME_MIN: usize = 3;
/// Maximum username length in characters.
pub const USERNAME_MAX: usize = 50;
/// Minimum password length in characters.
pub const PASSWORD_MIN: usize = 8;
/// Maximum password length in characters.
pub const PASSWORD_MAX: usize = 128;
/// Maximum length of first and last names.
pub const NAME_MAX: usize = 50;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Field a violation applies to, named as in request payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CredentialField {
    Username,
    Email,
    FirstName,
    LastName,
    Password,
    ConfirmPassword,
}

impl CredentialField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable rule identifier for a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    Required,
    InvalidFormat,
    TooShort,
    TooLong,
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    MissingSpecialCharacter,
    PasswordMismatch,
}

impl ViolationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidFormat => "invalid_format",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::MissingUppercase => "missing_uppercase",
            Self::MissingLowercase => "missing_lowercase",
            Self::MissingDigit => "missing_digit",
            Self::MissingSpecialCharacter => "missing_special_character",
            Self::PasswordMismatch => "password_mismatch",
        }
    }
}

/// A single broken rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialViolation {
    pub field: CredentialField,
    pub code: ViolationCode,
    pub message: String,
}

impl CredentialViolation {
    fn new(field: CredentialField, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

/// Every violation found in one validation pass, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("credential validation failed with {} violation(s)", .0.len())]
pub struct CredentialViolations(Vec<CredentialViolation>);

impl CredentialViolations {
    pub fn iter(&self) -> impl Iterator<Item = &CredentialViolation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a violation with `code` was reported against `field`.
    pub fn contains(&self, field: CredentialField, code: ViolationCode) -> bool {
        self.0
            .iter()
            .any(|violation| violation.field == field && violation.code == code)
    }

    /// Human-readable messages, in rule order.
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.message.as_str()).collect()
    }
}

impl From<CredentialViolations> for Error {
    fn from(value: CredentialViolations) -> Self {
        let message = value
            .0
            .first()
            .map(|violation| violation.message.clone())
            .unwrap_or_else(|| "credential validation failed".to_owned());
        Error::invalid_request(message).with_details(json!({
            "code": "validation_failed",
            "violations": value.0,
        }))
    }
}

/// Raw account-creation input.
#[derive(Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: Zeroizing<String>,
    pub confirm_password: Option<Zeroizing<String>>,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

/// Credentials that passed every rule.
///
/// ## Invariants
/// - `username` is trimmed, 3..=50 characters.
/// - `email` is trimmed, lower-cased and well formed.
/// - `password` satisfies every strength rule.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedCredentials {
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    password: Zeroizing<String>,
}

impl ValidatedCredentials {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for ValidatedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCredentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    /// Check every structural, strength and cross-field rule.
    ///
    /// # Examples
    /// ```
    /// use calculations::domain::RegistrationForm;
    /// use zeroize::Zeroizing;
    ///
    /// let form = RegistrationForm {
    ///     username: "ada".into(),
    ///     email: "ada@example.com".into(),
    ///     first_name: "Ada".into(),
    ///     last_name: "Lovelace".into(),
    ///     password: Zeroizing::new("alllowercase1!".into()),
    ///     confirm_password: None,
    /// };
    /// let violations = form.validate().expect_err("missing uppercase");
    /// assert_eq!(
    ///     violations.messages(),
    ///     vec!["Password must contain at least one uppercase letter"]
    /// );
    /// ```
    pub fn validate(&self) -> Result<ValidatedCredentials, CredentialViolations> {
        let mut violations = Vec::new();

        let username = self.username.trim();
        check_length(
            &mut violations,
            CredentialField::Username,
            username,
            (USERNAME_MIN, USERNAME_MAX),
            "Username",
        );

        let email = self.email.trim();
        if !email_regex().is_match(email) {
            violations.push(CredentialViolation::new(
                CredentialField::Email,
                ViolationCode::InvalidFormat,
                "Invalid email address",
            ));
        }

        let first_name = self.first_name.trim();
        check_name(&mut violations, CredentialField::FirstName, first_name, "First name");
        let last_name = self.last_name.trim();
        check_name(&mut violations, CredentialField::LastName, last_name, "Last name");

        check_length(
            &mut violations,
            CredentialField::Password,
            &self.password,
            (PASSWORD_MIN, PASSWORD_MAX),
            "Password",
        );
        check_strength(&mut violations, &self.password);

        let mismatch = self
            .confirm_password
            .as_ref()
            .is_some_and(|confirm| confirm.as_str() != self.password.as_str());
        if mismatch {
            violations.push(CredentialViolation::new(
                CredentialField::ConfirmPassword,
                ViolationCode::PasswordMismatch,
                "Passwords do not match",
            ));
        }

        if !violations.is_empty() {
            return Err(CredentialViolations(violations));
        }

        Ok(ValidatedCredentials {
            username: username.to_owned(),
            email: email.to_lowercase(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            password: self.password.clone(),
        })
    }
}

fn check_length(
    violations: &mut Vec<CredentialViolation>,
    field: CredentialField,
    value: &str,
    (min, max): (usize, usize),
    label: &str,
) {
    let len = value.chars().count();
    if len < min {
        violations.push(CredentialViolation::new(
            field,
            ViolationCode::TooShort,
            format!("{label} must be at least {min} characters long"),
        ));
    } else if len > max {
        violations.push(CredentialViolation::new(
            field,
            ViolationCode::TooLong,
            format!("{label} must be at most {max} characters long"),
        ));
    }
}

fn check_name(
    violations: &mut Vec<CredentialViolation>,
    field: CredentialField,
    value: &str,
    label: &str,
) {
    if value.is_empty() {
        violations.push(CredentialViolation::new(
            field,
            ViolationCode::Required,
            format!("{label} is required"),
        ));
    } else if value.chars().count() > NAME_MAX {
        violations.push(CredentialViolation::new(
            field,
            ViolationCode::TooLong,
            format!("{label} must be at most {NAME_MAX} characters long"),
        ));
    }
}

fn check_strength(violations: &mut Vec<CredentialViolation>, password: &str) {
    let rules: [(fn(char) -> bool, ViolationCode, &str); 4] = [
        (
            char::is_uppercase,
            ViolationCode::MissingUppercase,
            "Password must contain at least one uppercase letter",
        ),
        (
            char::is_lowercase,
            ViolationCode::MissingLowercase,
            "Password must contain at least one lowercase letter",
        ),
        (
            |c: char| c.is_ascii_digit(),
            ViolationCode::MissingDigit,
            "Password must contain at least one digit",
        ),
        (
            |c: char| !c.is_alphanumeric(),
            ViolationCode::MissingSpecialCharacter,
            "Password must contain at least one special character",
        ),
    ];
    for (predicate, code, message) in rules {
        if !password.chars().any(predicate) {
            violations.push(CredentialViolation::new(
                CredentialField::Password,
                code,
                message,
            ));
        }
    }
}
