//! Login credentials.
//!
//! Login checks presence and the registration length minimums; strength rules
//! only apply at registration time (see [`crate::domain::credentials`]).

use std::fmt;

use zeroize::Zeroizing;

use super::credentials::{PASSWORD_MIN, USERNAME_MIN};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
    /// Username shorter than any registered account can be.
    UsernameTooShort,
    /// Password shorter than any registered account can have.
    PasswordTooShort,
}

impl LoginValidationError {
    /// Field the error applies to, as named in request payloads.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameTooShort => "username",
            Self::EmptyPassword | Self::PasswordTooShort => "password",
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::EmptyPassword => "empty_password",
            Self::UsernameTooShort | Self::PasswordTooShort => "too_short",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::UsernameTooShort => {
                write!(f, "username must be at least {USERNAME_MIN} characters long")
            }
            Self::PasswordTooShort => {
                write!(f, "password must be at least {PASSWORD_MIN} characters long")
            }
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and at least [`USERNAME_MIN`] characters.
/// - `password` is at least [`PASSWORD_MIN`] characters and kept verbatim; it
///   is zeroed on drop.
///
/// # Examples
/// ```
/// use calculations::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "Secret1!").unwrap();
/// assert_eq!(creds.username(), "ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        if normalized.chars().count() < USERNAME_MIN {
            return Err(LoginValidationError::UsernameTooShort);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(LoginValidationError::PasswordTooShort);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
