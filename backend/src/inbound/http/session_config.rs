//! Session cookie settings read from the environment.
//!
//! | Variable | Meaning |
//! | --- | --- |
//! | `SESSION_KEY_FILE` | path to the cookie signing key (>= 64 bytes) |
//! | `SESSION_COOKIE_SECURE` | mark the cookie `Secure` |
//! | `SESSION_SAMESITE` | `Strict`, `Lax` or `None` |
//! | `SESSION_ALLOW_EPHEMERAL` | permit a generated key when the file is missing |
//!
//! Debug builds warn and fall back to defaults; release builds reject missing
//! or malformed values.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// How strictly session toggles are validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Defaults with warnings.
    Debug,
    /// Every toggle must be present and valid.
    Release,
}

impl BuildMode {
    /// Pick the mode matching `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use calculations::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Validated session cookie settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// A single environment toggle with its parser and debug fallback.
struct Toggle<T> {
    name: &'static str,
    expected: &'static str,
    parse: fn(&str) -> Option<T>,
    debug_default: T,
}

impl<T: Copy> Toggle<T> {
    fn read<E: Env>(&self, env: &E, mode: BuildMode) -> Result<T, SessionConfigError> {
        let Some(value) = env.string(self.name) else {
            if mode == BuildMode::Release {
                return Err(SessionConfigError::MissingEnv { name: self.name });
            }
            warn!(name = self.name, "session toggle not set; using default");
            return Ok(self.debug_default);
        };
        if let Some(parsed) = (self.parse)(&value) {
            return Ok(parsed);
        }
        if mode == BuildMode::Release {
            return Err(SessionConfigError::InvalidEnv {
                name: self.name,
                value,
                expected: self.expected,
            });
        }
        warn!(name = self.name, %value, "invalid session toggle; using default");
        Ok(self.debug_default)
    }
}

const COOKIE_SECURE: Toggle<bool> = Toggle {
    name: COOKIE_SECURE_ENV,
    expected: BOOL_EXPECTED,
    parse: parse_bool,
    debug_default: true,
};

const SAME_SITE: Toggle<SameSite> = Toggle {
    name: SAMESITE_ENV,
    expected: SAMESITE_EXPECTED,
    parse: parse_same_site,
    debug_default: SameSite::Lax,
};

const ALLOW_EPHEMERAL: Toggle<bool> = Toggle {
    name: ALLOW_EPHEMERAL_ENV,
    expected: BOOL_EXPECTED,
    parse: parse_bool,
    debug_default: false,
};

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```
/// use calculations::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("calculations_session_key_example");
/// std::fs::write(&key_path, vec![b'k'; 64])?;
/// let key_path = key_path.to_string_lossy().into_owned();
///
/// let mut env = MockEnv::new();
/// let path = key_path.clone();
/// env.expect_string().returning(move |name| match name {
///     "SESSION_KEY_FILE" => Some(path.clone()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     "SESSION_SAMESITE" => Some("Strict".to_owned()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = COOKIE_SECURE.read(env, mode)?;
    let same_site = SAME_SITE.read(env, mode)?;
    if same_site == SameSite::None && !cookie_secure {
        if mode == BuildMode::Release {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
        warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it");
    }
    let allow_ephemeral = ALLOW_EPHEMERAL.read(env, mode)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn session_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(error) if mode == BuildMode::Debug || allow_ephemeral => {
            warn!(path = %path.display(), %error, "using temporary session key");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    let length = bytes.len();
    if length < SESSION_KEY_MIN_LEN {
        bytes.zeroize();
        if mode == BuildMode::Debug {
            warn!(path = %path.display(), length, "session key too short; using temporary key");
            return Ok(Key::generate());
        }
        return Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_len: SESSION_KEY_MIN_LEN,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
