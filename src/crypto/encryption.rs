//! # Encryption Module
//!
//! RSA encryption of arbitrary-length messages for a recipient's public key.
//!
//! ## Chunked Block Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      MESSAGE ENCRYPTION FLOW                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  k = modulus length in bytes (256 for RSA-2048)                        │
//! │                                                                         │
//! │  Step 1: Split plaintext into chunks of `capacity` bytes               │
//! │  ┌────────────┬────────────┬────────┐                                  │
//! │  │  chunk 0   │  chunk 1   │ chunk 2│   (last chunk may be short)      │
//! │  └─────┬──────┴─────┬──────┴────┬───┘                                  │
//! │        ▼            ▼           ▼                                       │
//! │  Step 2: Pad + RSA-encrypt each chunk independently (fresh randomness) │
//! │  ┌────────────┬────────────┬────────────┐                              │
//! │  │  k bytes   │  k bytes   │  k bytes   │                              │
//! │  └────────────┴────────────┴────────────┘                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Step 3: Concatenate (no separators) and base64-encode                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Padding Schemes
//!
//! | Scheme | Capacity per block | Notes |
//! |--------|--------------------|-------|
//! | PKCS#1 v1.5 | `k - 11` | Legacy; interoperates with older clients |
//! | OAEP | `k - 2·32 - 2` | SHA-256 for both label hash and MGF1 |
//!
//! There is no scheme marker in the ciphertext. The decrypting side must call
//! the function matching the one used to encrypt.

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand_core::CryptoRngCore;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::crypto::keys::KeyPair;
use crate::error::{Error, Result};

/// PKCS#1 v1.5 encryption overhead in bytes
pub const PKCS1_OVERHEAD: usize = 11;

/// Digest length of the OAEP hash (SHA-256)
pub const OAEP_HASH_LEN: usize = 32;

/// OAEP encryption overhead in bytes
pub const OAEP_OVERHEAD: usize = 2 * OAEP_HASH_LEN + 2;

/// RSA encryption padding scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Padding {
    /// RSAES-PKCS1-v1_5
    Pkcs1v15,
    /// RSAES-OAEP with SHA-256 / MGF1-SHA-256 and an empty label
    Oaep,
}

impl Padding {
    /// Padding bytes consumed in every block
    pub fn overhead(self) -> usize {
        match self {
            Padding::Pkcs1v15 => PKCS1_OVERHEAD,
            Padding::Oaep => OAEP_OVERHEAD,
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Padding::Pkcs1v15 => "PKCS#1 v1.5",
            Padding::Oaep => "OAEP-SHA256",
        }
    }

    /// Plaintext bytes that fit into one block of a `key_size`-byte modulus
    pub fn capacity(self, key_size: usize) -> Result<usize> {
        match key_size.checked_sub(self.overhead()) {
            Some(capacity) if capacity > 0 => Ok(capacity),
            _ => Err(Error::KeyTooSmall {
                bits: key_size * 8,
                padding: self.name(),
            }),
        }
    }

    fn encrypt_block<R: CryptoRngCore>(
        self,
        public: &RsaPublicKey,
        rng: &mut R,
        chunk: &[u8],
    ) -> rsa::Result<Vec<u8>> {
        match self {
            Padding::Pkcs1v15 => public.encrypt(rng, Pkcs1v15Encrypt, chunk),
            Padding::Oaep => public.encrypt(rng, Oaep::new::<Sha256>(), chunk),
        }
    }

    fn decrypt_block(self, private: &RsaPrivateKey, block: &[u8]) -> rsa::Result<Vec<u8>> {
        match self {
            Padding::Pkcs1v15 => private.decrypt(Pkcs1v15Encrypt, block),
            Padding::Oaep => private.decrypt(Oaep::new::<Sha256>(), block),
        }
    }
}

// ============================================================================
// LEGACY (PKCS#1 v1.5)
// ============================================================================

/// Encrypt `message` for `recipient` with PKCS#1 v1.5 padding
pub fn encrypt(message: &[u8], recipient: &KeyPair) -> Result<String> {
    encrypt_with(Padding::Pkcs1v15, message, recipient)
}

/// Decrypt PKCS#1 v1.5 ciphertext produced by [`encrypt`]
pub fn decrypt(ciphertext: &str, keypair: &KeyPair) -> Result<Vec<u8>> {
    decrypt_with(Padding::Pkcs1v15, ciphertext, keypair)
}

// ============================================================================
// OAEP
// ============================================================================

/// Encrypt `message` for `recipient` with OAEP-SHA256 padding
pub fn encrypt_oaep(message: &[u8], recipient: &KeyPair) -> Result<String> {
    encrypt_with(Padding::Oaep, message, recipient)
}

/// Decrypt OAEP ciphertext produced by [`encrypt_oaep`]
pub fn decrypt_oaep(ciphertext: &str, keypair: &KeyPair) -> Result<Vec<u8>> {
    decrypt_with(Padding::Oaep, ciphertext, keypair)
}

// ============================================================================
// SHARED ENGINE
// ============================================================================

/// Encrypt with an explicit padding scheme using the OS RNG
pub fn encrypt_with(padding: Padding, message: &[u8], recipient: &KeyPair) -> Result<String> {
    encrypt_with_rng(padding, message, recipient, &mut OsRng)
}

/// Encrypt with an explicit padding scheme and a caller-provided CSPRNG
///
/// An empty message still produces one block, so ciphertext is never empty.
pub fn encrypt_with_rng<R: CryptoRngCore>(
    padding: Padding,
    message: &[u8],
    recipient: &KeyPair,
    rng: &mut R,
) -> Result<String> {
    let public = recipient.public_key();
    let key_size = public.size();
    let capacity = padding.capacity(key_size)?;

    let chunk_count = message.len().div_ceil(capacity).max(1);
    let mut blocks = Vec::with_capacity(chunk_count * key_size);

    let mut encrypt_chunk = |chunk: &[u8]| -> Result<()> {
        let block = padding
            .encrypt_block(public, rng, chunk)
            .map_err(|e| Error::EncryptionFailed(e.to_string()))?;
        debug_assert_eq!(block.len(), key_size);
        blocks.extend_from_slice(&block);
        Ok(())
    };

    if message.is_empty() {
        encrypt_chunk(&[])?;
    } else {
        for chunk in message.chunks(capacity) {
            encrypt_chunk(chunk)?;
        }
    }

    tracing::debug!(
        padding = padding.name(),
        chunks = chunk_count,
        "Encrypted message"
    );
    Ok(STANDARD.encode(&blocks))
}

/// Decrypt with an explicit padding scheme
///
/// ## Errors
///
/// - `MissingPrivateKey` if `keypair` is public-only
/// - `InvalidCiphertextEncoding` for bad base64 or a length that isn't a
///   whole number of blocks
/// - `DecryptionFailed` if any block fails padding validation
pub fn decrypt_with(padding: Padding, ciphertext: &str, keypair: &KeyPair) -> Result<Vec<u8>> {
    let private = keypair.private_key()?;
    let key_size = keypair.key_size();
    padding.capacity(key_size)?;

    let blocks = decode_blocks(ciphertext, key_size)?;

    let mut plaintext = Zeroizing::new(Vec::with_capacity(blocks.len()));
    for block in blocks.chunks(key_size) {
        let chunk = Zeroizing::new(
            padding
                .decrypt_block(private, block)
                .map_err(|_| Error::DecryptionFailed)?,
        );
        plaintext.extend_from_slice(&chunk);
    }

    Ok(std::mem::take(&mut *plaintext))
}

fn decode_blocks(ciphertext: &str, key_size: usize) -> Result<Vec<u8>> {
    let compact: String = ciphertext.split_ascii_whitespace().collect();
    let blocks = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| Error::InvalidCiphertextEncoding(e.to_string()))?;

    if blocks.is_empty() || blocks.len() % key_size != 0 {
        return Err(Error::InvalidCiphertextEncoding(format!(
            "Ciphertext length {} is not a multiple of the {}-byte block size",
            blocks.len(),
            key_size
        )));
    }

    Ok(blocks)
}

// ============================================================================
// TESTS
// ============================================================================
