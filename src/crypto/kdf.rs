//! # Key Derivation Functions
//!
//! Stretches a short, human-entered pin into a 256-bit symmetric key.
//!
//! ## Pin Derivation
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PIN → SYMMETRIC KEY                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  PBKDF2-HMAC-SHA256(                                                   │
//! │    password   = pin (UTF-8 bytes),                                     │
//! │    salt       = 16 random bytes (stored beside the ciphertext),        │
//! │    iterations = 100 000 by default (stored beside the ciphertext),     │
//! │    output     = 32 bytes                                               │
//! │  )                                                                      │
//! │                                                                         │
//! │  → AES-256-GCM key, zeroized on drop                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Considerations
//!
//! | Aspect | Design Choice |
//! |--------|---------------|
//! | KDF Algorithm | PBKDF2-HMAC-SHA256 |
//! | Salt | Fresh per encryption, so equal pins give unrelated keys |
//! | Work Factor | Carried in the blob; raising the default never breaks old data |
//! | Upper Bound | Iteration counts above the maximum are refused before any work |

use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Default PBKDF2 iteration count for pin-derived keys
pub const DEFAULT_PIN_KDF_ITERATIONS: u32 = 100_000;

/// Largest iteration count accepted, from config or from a stored blob
pub const MAX_PIN_KDF_ITERATIONS: u32 = 10_000_000;

/// Salt length in bytes
pub const SALT_SIZE: usize = 16;

/// Derived key length in bytes (AES-256)
pub const PIN_KEY_SIZE: usize = 32;

/// Check an iteration count against the supported range
pub fn validate_iterations(iterations: u32) -> Result<()> {
    if iterations == 0 || iterations > MAX_PIN_KDF_ITERATIONS {
        tracing::warn!(iterations, "Rejected PBKDF2 iteration count");
        return Err(Error::KeyDerivationFailed(format!(
            "Iteration count must be between 1 and {}, got {}",
            MAX_PIN_KDF_ITERATIONS, iterations
        )));
    }
    Ok(())
}

/// Derive a 32-byte key from a pin and salt
pub fn derive_pin_key(
    pin: &str,
    salt: &[u8; SALT_SIZE],
    iterations: u32,
) -> Result<Zeroizing<[u8; PIN_KEY_SIZE]>> {
    validate_iterations(iterations)?;

    let mut key = Zeroizing::new([0u8; PIN_KEY_SIZE]);
    pbkdf2::pbkdf2_hmac::<Sha256>(pin.as_bytes(), salt, iterations, &mut *key);
    Ok(key)
}

// ============================================================================
// TESTS
// ============================================================================
