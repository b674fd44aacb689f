//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

/// Key file removed when dropped.
struct TempKeyFile {
    file: NamedTempFile,
}

impl TempKeyFile {
    fn new(len: usize) -> Self {
        let mut file = NamedTempFile::new().expect("create key file");
        file.write_all(&vec![b'k'; len]).expect("write key file");
        Self { file }
    }

    fn path_str(&self) -> String {
        self.file.path().to_string_lossy().into_owned()
    }
}

#[fixture]
fn key_file() -> TempKeyFile {
    TempKeyFile::new(SESSION_KEY_MIN_LEN)
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_vars(key_file: &TempKeyFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_file.path_str()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_valid_settings_succeed(key_file: TempKeyFile) {
    let settings = session_settings_from_env(&mock_env(release_vars(&key_file)), BuildMode::Release)
        .expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case::cookie_secure(COOKIE_SECURE_ENV)]
#[case::same_site(SAMESITE_ENV)]
#[case::allow_ephemeral(ALLOW_EPHEMERAL_ENV)]
fn release_missing_toggle_is_rejected(key_file: TempKeyFile, #[case] name: &'static str) {
    let mut vars = release_vars(&key_file);
    vars.remove(name);
    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::MissingEnv { name: missing } if missing == name));
}

#[rstest]
#[case::cookie_secure(COOKIE_SECURE_ENV, "maybe")]
#[case::cookie_secure_blank(COOKIE_SECURE_ENV, "")]
#[case::same_site(SAMESITE_ENV, "sometimes")]
#[case::allow_ephemeral(ALLOW_EPHEMERAL_ENV, "2")]
fn release_invalid_toggle_is_rejected(
    key_file: TempKeyFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&key_file);
    vars.insert(name, value.to_owned());
    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: invalid, .. } if invalid == name));
}

#[rstest]
fn release_ephemeral_enabled_is_rejected(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_insecure_none_same_site_is_rejected(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_missing_key_file_is_rejected(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(KEY_FILE_ENV, "/nonexistent/calc-session-key".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn release_short_key_is_rejected() {
    let short = TempKeyFile::new(32);
    let err = release_error(release_vars(&short));
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length: 32, min_len: SESSION_KEY_MIN_LEN, .. }
    ));
}

#[rstest]
fn debug_defaults_allow_ephemeral_key() {
    let mut vars = HashMap::new();
    vars.insert(KEY_FILE_ENV, "/nonexistent/calc-session-key".to_owned());
    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Debug)
        .expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_invalid_values_fall_back_to_defaults(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(COOKIE_SECURE_ENV, "maybe".to_owned());
    vars.insert(SAMESITE_ENV, "unexpected".to_owned());
    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug fallback");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_short_key_uses_temporary_key() {
    let short = TempKeyFile::new(8);
    let settings = session_settings_from_env(&mock_env(release_vars(&short)), BuildMode::Debug)
        .expect("debug tolerates short keys");
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case("TRUE", Some(true))]
#[case("n", Some(false))]
#[case("on", None)]
fn bools_parse_case_insensitively(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
