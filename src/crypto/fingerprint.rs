//! # Key Fingerprints
//!
//! A fingerprint is a short, stable identifier for a public key.
//!
//! ## Derivation
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     FINGERPRINT DERIVATION                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Armored text (any accepted label, private or public)                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  parse → derive public half if needed                                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  PKCS#1 RSAPublicKey DER  (canonical: SEQUENCE { n, e })               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  SHA-256 → lowercase hex (64 chars)                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Digesting the DER of the re-encoded public key, never the input text,
//! makes the private PEM, public PEM, PKCS#8 and SPKI forms of one identity
//! all produce the same fingerprint.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::crypto::keys::{parse, KeyPair};
use crate::error::{Error, Result};

/// Length of a fingerprint in hex characters
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// SHA-256 fingerprint of a public key, as lowercase hex
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint an already-parsed keypair
    pub fn of(keypair: &KeyPair) -> Result<Self> {
        let digest = Sha256::digest(keypair.public_der()?);
        Ok(Self(hex::encode(digest)))
    }

    /// Parse a fingerprint string
    ///
    /// Accepts upper- or lowercase hex; stores lowercase.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let trimmed = hex_str.trim();
        if trimmed.len() != FINGERPRINT_HEX_LEN || !trimmed.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(Error::InvalidKey(format!(
                "Fingerprint must be {} hex characters",
                FINGERPRINT_HEX_LEN
            )));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// The hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time equality
    pub fn ct_eq(&self, other: &Fingerprint) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compute the fingerprint of armored key text (private or public)
pub fn compute(armored: &str) -> Result<Fingerprint> {
    Fingerprint::of(parse(armored)?.keypair())
}

/// Check armored key text against an expected fingerprint
///
/// Returns `Ok(false)` on mismatch, including a malformed `expected` string.
pub fn verify_fingerprint(armored: &str, expected: &str) -> Result<bool> {
    let actual = compute(armored)?;
    Ok(match Fingerprint::from_hex(expected) {
        Ok(expected) => actual.ct_eq(&expected),
        Err(_) => false,
    })
}

// ============================================================================
// TESTS
// ============================================================================
