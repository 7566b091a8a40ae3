//! Tunable parameters for key generation and pin-based encryption.

use serde::{Deserialize, Serialize};

use crate::crypto::{
    validate_iterations, validate_key_bits, DEFAULT_KEY_BITS, DEFAULT_PIN_KDF_ITERATIONS,
};
use crate::error::Result;

/// Configuration for an [`IdentitySession`](crate::identity::IdentitySession)
///
/// Missing fields fall back to the defaults when deserialized, so a host
/// can persist only the values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// RSA modulus size for freshly generated identities
    pub key_bits: usize,
    /// PBKDF2 rounds used when sealing secrets with a pin
    pub pin_kdf_iterations: u32,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
            pin_kdf_iterations: DEFAULT_PIN_KDF_ITERATIONS,
        }
    }
}

impl CryptoConfig {
    /// Check that every value is in its supported range
    pub fn validate(&self) -> Result<()> {
        validate_key_bits(self.key_bits)?;
        validate_iterations(self.pin_kdf_iterations)
    }
}
