//! Registered accounts and their password digests.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

use super::UserId;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Error raised when a stored digest is not in `salt$hash` hex form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored password digest is malformed")]
pub struct MalformedDigest;

/// Salted SHA-256 password digest, stored as `hex(salt)$hex(hash)`.
///
/// # Examples
/// ```
/// use calculations::domain::PasswordDigest;
///
/// let digest = PasswordDigest::derive("Secure1!pass");
/// assert!(digest.verify("Secure1!pass"));
/// assert!(!digest.verify("secure1!pass"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    salt: [u8; SALT_LEN],
    hash: [u8; 32],
}

impl PasswordDigest {
    /// Hash `password` under a fresh random salt.
    pub fn derive(password: &str) -> Self {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(salt, password)
    }

    fn with_salt(salt: [u8; SALT_LEN], password: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        let mut hash = [0_u8; 32];
        hash.copy_from_slice(&hasher.finalize());
        Self { salt, hash }
    }

    /// Parse a digest read back from storage.
    pub fn parse(stored: &str) -> Result<Self, MalformedDigest> {
        let (salt_hex, hash_hex) = stored.split_once('$').ok_or(MalformedDigest)?;
        let mut salt = [0_u8; SALT_LEN];
        let mut hash = [0_u8; 32];
        hex::decode_to_slice(salt_hex, &mut salt).map_err(|_| MalformedDigest)?;
        hex::decode_to_slice(hash_hex, &mut hash).map_err(|_| MalformedDigest)?;
        Ok(Self { salt, hash })
    }

    /// Check `password` against the digest without early exit on mismatch.
    pub fn verify(&self, password: &str) -> bool {
        let candidate = Self::with_salt(self.salt, password);
        candidate
            .hash
            .iter()
            .zip(self.hash.iter())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }

    /// Storage encoding.
    pub fn encode(&self) -> String {
        format!("{}${}", hex::encode(self.salt), hex::encode(self.hash))
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_digest: PasswordDigest,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn encode_then_parse_verifies_original_password() {
        let digest = PasswordDigest::derive("Secure1!pass");
        let stored = digest.encode();
        let parsed = PasswordDigest::parse(&stored).expect("well formed");
        assert!(parsed.verify("Secure1!pass"));
        assert_eq!(parsed, digest);
    }

    #[rstest]
    fn encoding_is_salt_dollar_hash() {
        let encoded = PasswordDigest::with_salt([0_u8; SALT_LEN], "pw").encode();
        let (salt, hash) = encoded.split_once('$').expect("separator");
        assert_eq!(salt, "0".repeat(SALT_LEN * 2));
        assert_eq!(hash.len(), 64);
    }

    #[rstest]
    fn same_password_gets_distinct_salts() {
        let a = PasswordDigest::derive("Secure1!pass");
        let b = PasswordDigest::derive("Secure1!pass");
        assert_ne!(a.encode(), b.encode());
    }

    #[rstest]
    #[case::no_separator("abcd")]
    #[case::bad_hex("zz$zz")]
    #[case::short_salt("00$00")]
    fn rejects_malformed_storage(#[case] stored: &str) {
        assert_eq!(PasswordDigest::parse(stored), Err(MalformedDigest));
    }

    #[rstest]
    fn debug_hides_digest_bytes() {
        let digest = PasswordDigest::derive("Secure1!pass");
        assert_eq!(format!("{digest:?}"), "PasswordDigest(..)");
    }
}
