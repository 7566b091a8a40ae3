//! # Error Handling
//!
//! This module provides the error type shared by every Keyvault Core module.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Key Material Errors                                               │
//! │  │   ├── Parse                 - Malformed armored key text            │
//! │  │   ├── KeyGeneration         - RNG failure / unsupported size        │
//! │  │   ├── MissingPrivateKey     - Public-only key used for private op   │
//! │  │   └── InvalidKey            - Key unusable for the operation        │
//! │  │                                                                      │
//! │  ├── Identity Errors                                                   │
//! │  │   └── NoActiveIdentity      - No key supplied and none activated    │
//! │  │                                                                      │
//! │  ├── Crypto Errors                                                     │
//! │  │   ├── KeyTooSmall           - Modulus can't hold padding overhead   │
//! │  │   ├── EncryptionFailed      - Encryption primitive failed           │
//! │  │   ├── DecryptionFailed      - Padding/auth failure (wrong key/pin)  │
//! │  │   ├── SigningFailed         - Signature primitive failed            │
//! │  │   └── KeyDerivationFailed   - Pin KDF failed                        │
//! │  │                                                                      │
//! │  └── Encoding Errors                                                   │
//! │      ├── InvalidCiphertextEncoding - Bad base64 / block structure      │
//! │      └── InvalidSignatureEncoding  - Bad signature text                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `DecryptionFailed` carries no detail: a wrong key, a wrong
//! pin and a corrupted padding block all look the same to the caller.

use thiserror::Error;

/// Result type alias for Keyvault Core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Keyvault Core
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Key Material Errors (100-199)
    // ========================================================================
    /// Armored key text could not be parsed
    #[error("Failed to parse key: {0}")]
    Parse(String),

    /// Key generation failed
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// The operation needs private material the key doesn't have
    #[error("This key has no private material.")]
    MissingPrivateKey,

    /// Key is structurally valid text but unusable
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    // ========================================================================
    // Identity Errors (200-299)
    // ========================================================================
    /// No key was supplied and no identity is active
    #[error("No active identity. Activate a keypair or pass one explicitly.")]
    NoActiveIdentity,

    // ========================================================================
    // Crypto Errors (300-399)
    // ========================================================================
    /// Key modulus is too small for the padding scheme
    #[error("A {bits}-bit key is too small for {padding} padding")]
    KeyTooSmall {
        /// Modulus size in bits
        bits: usize,
        /// Name of the padding scheme
        padding: &'static str,
    },

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed (wrong key, wrong pin or corrupted data)
    #[error("Decryption failed")]
    DecryptionFailed,

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Key derivation failed
    #[error("Failed to derive key: {0}")]
    KeyDerivationFailed(String),

    // ========================================================================
    // Encoding Errors (400-499)
    // ========================================================================
    /// Ciphertext is not valid base64 or has the wrong block structure
    #[error("Invalid ciphertext encoding: {0}")]
    InvalidCiphertextEncoding(String),

    /// Signature text is not valid
    #[error("Invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),
}

impl Error {
    /// Get the numeric error code
    ///
    /// Error codes are organized by category:
    /// - 100-199: Key material
    /// - 200-299: Identity
    /// - 300-399: Crypto operations
    /// - 400-499: Encoding
    pub fn code(&self) -> i32 {
        match self {
            // Key material (100-199)
            Error::Parse(_) => 100,
            Error::KeyGeneration(_) => 101,
            Error::MissingPrivateKey => 102,
            Error::InvalidKey(_) => 103,

            // Identity (200-299)
            Error::NoActiveIdentity => 200,

            // Crypto (300-399)
            Error::KeyTooSmall { .. } => 300,
            Error::EncryptionFailed(_) => 301,
            Error::DecryptionFailed => 302,
            Error::SigningFailed(_) => 303,
            Error::KeyDerivationFailed(_) => 304,

            // Encoding (400-499)
            Error::InvalidCiphertextEncoding(_) => 400,
            Error::InvalidSignatureEncoding(_) => 401,
        }
    }

    /// Check if this error requires user action
    ///
    /// These are the failures a UI should turn into "wrong pin",
    /// "corrupted key file" or "unlock your identity first".
    pub fn requires_user_action(&self) -> bool {
        matches!(
            self,
            Error::DecryptionFailed | Error::Parse(_) | Error::NoActiveIdentity
        )
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<rsa::pkcs1::Error> for Error {
    fn from(err: rsa::pkcs1::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<rsa::pkcs8::Error> for Error {
    fn from(err: rsa::pkcs8::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<rsa::pkcs8::spki::Error> for Error {
    fn from(err: rsa::pkcs8::spki::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::Parse("x".into()).code(), 100);
        assert_eq!(Error::MissingPrivateKey.code(), 102);
        assert_eq!(Error::NoActiveIdentity.code(), 200);
        assert_eq!(
            Error::KeyTooSmall {
                bits: 512,
                padding: "OAEP"
            }
            .code(),
            300
        );
        assert_eq!(Error::DecryptionFailed.code(), 302);
        assert_eq!(Error::InvalidSignatureEncoding("x".into()).code(), 401);
    }

    #[test]
    fn test_user_action_errors() {
        assert!(Error::DecryptionFailed.requires_user_action());
        assert!(Error::NoActiveIdentity.requires_user_action());
        assert!(!Error::MissingPrivateKey.requires_user_action());
    }

    #[test]
    fn test_decryption_failed_has_no_detail() {
        assert_eq!(Error::DecryptionFailed.to_string(), "Decryption failed");
    }
}
