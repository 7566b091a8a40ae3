//! # Keyvault Core
//!
//! RSA identity management for Keyvault clients: key generation and import,
//! fingerprints, signatures, message encryption and pin-protected storage
//! of private keys.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        KEYVAULT CORE MODULES                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │  Identity                                                     │     │
//! │  │  - Active identity slot (IdentitySession)                    │     │
//! │  │  - Default-key routing for sign / decrypt                    │     │
//! │  │  - Seal / restore under a pin                                │     │
//! │  └──────────────────────────────┬────────────────────────────────┘     │
//! │                                 │                                       │
//! │  ┌──────────────────────────────▼────────────────────────────────┐     │
//! │  │  Crypto                                                       │     │
//! │  │                                                               │     │
//! │  │  keys ─────── PEM parse / serialize, generation              │     │
//! │  │  fingerprint ─ SHA-256 of the canonical public key           │     │
//! │  │  signing ──── RSASSA-PKCS1-v1_5 / SHA-256                    │     │
//! │  │  encryption ─ chunked RSA, PKCS#1 v1.5 or OAEP               │     │
//! │  │  kdf ──────── PBKDF2-HMAC-SHA256 pin stretching              │     │
//! │  │  symmetric ── AES-256-GCM pin cipher                         │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`config`] - Key size and pin cost settings
//! - [`crypto`] - Cryptographic primitives (keys, encryption, signing)
//! - [`identity`] - Active identity session
//!
//! ## Quick Start
//!
//! ```no_run
//! use keyvault_core::{IdentitySession, KeyPair};
//!
//! # fn main() -> keyvault_core::Result<()> {
//! let session = IdentitySession::new();
//! session.generate_identity()?;
//!
//! let signed = session.sign(b"hello", None)?;
//! assert!(session.verify(b"hello", &signed.signature, None)?);
//!
//! let peer = KeyPair::from_armored(&signed.public_key)?;
//! let ciphertext = keyvault_core::crypto::encrypt_oaep(b"hi", &peer)?;
//! assert_eq!(session.decrypt_oaep(&ciphertext, None)?, b"hi");
//! # Ok(())
//! # }
//! ```
//!
//! All operations are synchronous and CPU-bound. Hosts with an async
//! runtime should run key generation on a blocking worker.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use config::CryptoConfig;
pub use crypto::{Fingerprint, KeyPair, ParsedKey, PinCipher, Signature, SignedMessage};
pub use error::{Error, Result};
pub use identity::{IdentitySession, ResolvedKey};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of Keyvault Core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================
