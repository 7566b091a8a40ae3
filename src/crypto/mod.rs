//! # Cryptography Module
//!
//! This module provides all cryptographic primitives used by Keyvault Core.
//!
//! ## Security Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC ARCHITECTURE                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    IDENTITY KEY                                 │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  RSA keypair (2048 bits by default, e = 65537)                 │   │
//! │  │  Armored as PKCS#1 PEM; PKCS#8 / SPKI accepted on import       │   │
//! │  │                          │                                      │   │
//! │  │            ┌─────────────┼─────────────┐                       │   │
//! │  │            ▼             ▼             ▼                       │   │
//! │  │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐           │   │
//! │  │  │ Fingerprint  │ │  Signatures  │ │  Encryption  │           │   │
//! │  │  │ SHA-256 of   │ │  PKCS#1 v1.5 │ │  PKCS#1 v1.5 │           │   │
//! │  │  │ PKCS#1 DER   │ │  + SHA-256   │ │  or OAEP     │           │   │
//! │  │  └──────────────┘ └──────────────┘ └──────────────┘           │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 PIN-PROTECTED STORAGE                           │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  pin ──► PBKDF2-HMAC-SHA256 ──► AES-256-GCM key                │   │
//! │  │                                                                 │   │
//! │  │  Used to seal the armored private key at rest                  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices
//!
//! | Algorithm | Purpose |
//! |-----------|---------|
//! | RSASSA-PKCS1-v1_5 / SHA-256 | Signing |
//! | RSAES-PKCS1-v1_5 | Legacy encryption |
//! | RSAES-OAEP / SHA-256 | Encryption |
//! | PBKDF2-HMAC-SHA256 | Pin stretching |
//! | AES-256-GCM | Pin-protected secrets |
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: Armored private keys, derived pin keys and
//!    decrypted plaintext buffers are held in `Zeroizing` wrappers
//! 2. **Constant-Time Comparison**: Fingerprints compare via `subtle`
//! 3. **Secure Random**: `rand::rngs::OsRng` unless the caller supplies a CSPRNG
//! 4. **Uniform Failures**: Every decryption failure surfaces as one error

mod encryption;
mod fingerprint;
mod kdf;
mod keys;
mod signing;
mod symmetric;

#[cfg(test)]
pub(crate) mod fixtures;

pub use encryption::{
    decrypt, decrypt_oaep, decrypt_with, encrypt, encrypt_oaep, encrypt_with, encrypt_with_rng,
    Padding, OAEP_HASH_LEN, OAEP_OVERHEAD, PKCS1_OVERHEAD,
};
pub use fingerprint::{
    compute as compute_fingerprint, verify_fingerprint, Fingerprint, FINGERPRINT_HEX_LEN,
};
pub use kdf::{derive_pin_key, DEFAULT_PIN_KDF_ITERATIONS, MAX_PIN_KDF_ITERATIONS, SALT_SIZE};
pub use keys::{
    parse, serialize_private, serialize_public, KeyPair, ParsedKey, DEFAULT_KEY_BITS,
    MAX_KEY_BITS, MIN_KEY_BITS, PKCS1_PRIVATE_LABEL, PKCS1_PUBLIC_LABEL,
};
pub use signing::{sign, verify, verify_armored, Signature, SignedMessage};
pub use symmetric::{decrypt_string, encrypt_string, PinCipher, FORMAT_VERSION};

pub(crate) use keys::validate_key_bits;
pub(crate) use kdf::validate_iterations;
