//! # Identity Module
//!
//! Holds the "active identity" (the keypair treated as self) and routes
//! signing and decryption to it when the caller doesn't name a key.
//!
//! ## Session Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         IDENTITY SESSION                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  IdentitySession                                                │   │
//! │  │  ├── config: CryptoConfig       (key size, pin cost)            │   │
//! │  │  └── active: RwLock<Option<Arc<KeyPair>>>                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  sign / decrypt / fingerprint (message, key: Option<&KeyPair>)         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  resolve(key) ── Some(k) ──────────────► use k                         │
//! │        │                                                                │
//! │        └─ None ── active? ── yes ──────► clone Arc, release lock       │
//! │                          └── no ───────► NoActiveIdentity              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! `activate` swaps the slot under a write lock. Readers clone the `Arc`
//! under a read lock and then work without holding it, so an operation that
//! started before a swap finishes with the key it resolved.
//!
//! Independent sessions share nothing. [`IdentitySession::global`] is a
//! process-wide instance for hosts that want a single slot.

use std::ops::Deref;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use zeroize::Zeroizing;

use crate::config::CryptoConfig;
use crate::crypto::{self, Fingerprint, KeyPair, ParsedKey, PinCipher, Signature, SignedMessage};
use crate::error::{Error, Result};

/// Process-wide session
static GLOBAL: OnceCell<IdentitySession> = OnceCell::new();

/// A key resolved at the call boundary: either the caller's or the active one
pub enum ResolvedKey<'a> {
    /// Supplied explicitly by the caller
    Explicit(&'a KeyPair),
    /// The session's active identity at resolution time
    Active(Arc<KeyPair>),
}

impl Deref for ResolvedKey<'_> {
    type Target = KeyPair;

    fn deref(&self) -> &KeyPair {
        match self {
            ResolvedKey::Explicit(keypair) => keypair,
            ResolvedKey::Active(keypair) => keypair,
        }
    }
}

/// Holder of the active identity
#[derive(Debug, Default)]
pub struct IdentitySession {
    config: CryptoConfig,
    active: RwLock<Option<Arc<KeyPair>>>,
}

impl IdentitySession {
    /// Create an empty session with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with a validated configuration
    pub fn with_config(config: CryptoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            active: RwLock::new(None),
        })
    }

    /// The process-wide session, created on first use
    pub fn global() -> &'static IdentitySession {
        GLOBAL.get_or_init(IdentitySession::new)
    }

    /// Session configuration
    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }

    // ========================================================================
    // ACTIVE IDENTITY
    // ========================================================================

    /// Make `keypair` the active identity, replacing any previous one
    ///
    /// A public-only keypair is accepted; private operations routed to it
    /// fail with `MissingPrivateKey`.
    pub fn activate(&self, keypair: KeyPair) -> Arc<KeyPair> {
        let keypair = Arc::new(keypair);
        let previous = self.active.write().replace(Arc::clone(&keypair));

        tracing::debug!(
            bits = keypair.bits(),
            has_private = keypair.has_private(),
            replaced = previous.is_some(),
            "Activated identity"
        );
        keypair
    }

    /// Parse armored text and activate it
    pub fn activate_armored(&self, armored: &str) -> Result<Arc<KeyPair>> {
        let keypair = crypto::parse(armored)?.into_keypair();
        Ok(self.activate(keypair))
    }

    /// Generate a fresh identity of `config.key_bits` and activate it
    pub fn generate_identity(&self) -> Result<Arc<KeyPair>> {
        let keypair = KeyPair::generate(self.config.key_bits)?;
        Ok(self.activate(keypair))
    }

    /// The active identity, if any
    pub fn current(&self) -> Option<Arc<KeyPair>> {
        self.active.read().clone()
    }

    /// Whether an identity is active
    pub fn is_active(&self) -> bool {
        self.active.read().is_some()
    }

    /// Drop the active identity, returning it
    pub fn clear(&self) -> Option<Arc<KeyPair>> {
        let previous = self.active.write().take();
        if previous.is_some() {
            tracing::debug!("Cleared active identity");
        }
        previous
    }

    /// Pick `explicit` if given, else the active identity
    pub fn resolve<'a>(&self, explicit: Option<&'a KeyPair>) -> Result<ResolvedKey<'a>> {
        match explicit {
            Some(keypair) => Ok(ResolvedKey::Explicit(keypair)),
            None => self
                .current()
                .map(ResolvedKey::Active)
                .ok_or(Error::NoActiveIdentity),
        }
    }

    // ========================================================================
    // ROUTED OPERATIONS
    // ========================================================================

    /// Sign with `key` or the active identity
    pub fn sign(&self, message: &[u8], key: Option<&KeyPair>) -> Result<SignedMessage> {
        crypto::sign(&*self.resolve(key)?, message)
    }

    /// Verify with `key` or the active identity's public half
    pub fn verify(
        &self,
        message: &[u8],
        signature: &Signature,
        key: Option<&KeyPair>,
    ) -> Result<bool> {
        Ok(crypto::verify(&*self.resolve(key)?, message, signature))
    }

    /// PKCS#1 v1.5 decrypt with `key` or the active identity
    pub fn decrypt(&self, ciphertext: &str, key: Option<&KeyPair>) -> Result<Vec<u8>> {
        crypto::decrypt(ciphertext, &*self.resolve(key)?)
    }

    /// OAEP decrypt with `key` or the active identity
    pub fn decrypt_oaep(&self, ciphertext: &str, key: Option<&KeyPair>) -> Result<Vec<u8>> {
        crypto::decrypt_oaep(ciphertext, &*self.resolve(key)?)
    }

    /// PKCS#1 v1.5 encrypt for the active identity
    pub fn encrypt_to_self(&self, message: &[u8]) -> Result<String> {
        crypto::encrypt(message, &*self.resolve(None)?)
    }

    /// OAEP encrypt for the active identity
    pub fn encrypt_oaep_to_self(&self, message: &[u8]) -> Result<String> {
        crypto::encrypt_oaep(message, &*self.resolve(None)?)
    }

    /// Fingerprint of `key` or the active identity
    pub fn fingerprint(&self, key: Option<&KeyPair>) -> Result<Fingerprint> {
        self.resolve(key)?.fingerprint()
    }

    /// Armored public key of `key` or the active identity
    pub fn public_armored(&self, key: Option<&KeyPair>) -> Result<String> {
        crypto::serialize_public(&*self.resolve(key)?)
    }

    // ========================================================================
    // PIN-PROTECTED STORAGE
    // ========================================================================

    /// Pin cipher at the configured cost
    pub fn pin_cipher(&self) -> Result<PinCipher> {
        PinCipher::new(self.config.pin_kdf_iterations)
    }

    /// Seal the active identity's private key under `pin`
    pub fn seal(&self, pin: &str) -> Result<String> {
        self.resolve(None)?.seal(&self.pin_cipher()?, pin)
    }

    /// Unseal a stored identity and make it active
    pub fn restore(&self, sealed: &str, pin: &str) -> Result<Arc<KeyPair>> {
        let armored = Zeroizing::new(self.pin_cipher()?.decrypt_string(sealed, pin)?);
        match crypto::parse(&armored)? {
            ParsedKey::Private(keypair) => Ok(self.activate(keypair)),
            ParsedKey::Public(_) => Err(Error::MissingPrivateKey),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
