//! CheckMacValue signing.
//!
//! The gateway authenticates both outgoing orders and incoming callbacks
//! with the same checksum. The canonical form must be reproduced exactly:
//!
//! 1. Drop any existing `CheckMacValue` field
//! 2. Sort the remaining fields by name (byte order)
//! 3. Join as `name=value` pairs with `&`
//! 4. Wrap as `HashKey=<key>&...&HashIV=<iv>`
//! 5. Form-encode the whole string (space becomes `+`), then lowercase it,
//!    escapes included (`%3A` becomes `%3a`)
//! 6. SHA-256 the bytes and render the digest as uppercase hex

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::fields::WireFields;

/// Name of the checksum field on the wire.
pub const CHECK_MAC_FIELD: &str = "CheckMacValue";

/// Uppercase hex SHA-256 checksum.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CheckMacValue(String);

impl CheckMacValue {
    /// Wraps a checksum received from outside (callback payload, store).
    ///
    /// No format check is applied; a malformed value simply never matches.
    pub fn from_received(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time equality.
    pub fn matches(&self, other: &CheckMacValue) -> bool {
        let a = self.0.as_bytes();
        let b = other.0.as_bytes();
        a.len() == b.len() && bool::from(a.ct_eq(b))
    }
}

impl fmt::Display for CheckMacValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for CheckMacValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CheckMacValue").field(&self.0).finish()
    }
}

/// Computes CheckMacValue checksums with the merchant's HashKey/HashIV.
#[derive(Clone)]
pub struct CheckMacSigner {
    hash_key: SecretString,
    hash_iv: SecretString,
}

impl CheckMacSigner {
    pub fn new(hash_key: impl Into<String>, hash_iv: impl Into<String>) -> Self {
        Self {
            hash_key: SecretString::new(hash_key.into()),
            hash_iv: SecretString::new(hash_iv.into()),
        }
    }

    /// Signs the field set. Deterministic for a given field set and secrets.
    pub fn sign(&self, fields: &WireFields) -> CheckMacValue {
        let canonical = self.canonical_string(fields);
        let digest = Sha256::digest(canonical.as_bytes());
        CheckMacValue(hex::encode_upper(digest))
    }

    /// Returns true if `claimed` is the checksum of `fields`.
    pub fn verify(&self, fields: &WireFields, claimed: &CheckMacValue) -> bool {
        self.sign(fields).matches(claimed)
    }

    /// Builds the lowercased, form-encoded string that gets hashed.
    pub(crate) fn canonical_string(&self, fields: &WireFields) -> String {
        let mut pairs: Vec<(&str, String)> = fields
            .iter()
            .filter(|(name, _)| *name != CHECK_MAC_FIELD)
            .map(|(name, value)| (name, value.to_string()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let joined = pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&");

        let wrapped = format!(
            "HashKey={}&{}&HashIV={}",
            self.hash_key.expose_secret(),
            joined,
            self.hash_iv.expose_secret()
        );

        form_encode(&wrapped).to_ascii_lowercase()
    }
}

impl fmt::Debug for CheckMacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckMacSigner").finish_non_exhaustive()
    }
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ~`, with space as `+`.
///
/// A literal `%` is itself escaped to `%25`, so every `%20` in the
/// encoded output stems from a space.
fn form_encode(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}
