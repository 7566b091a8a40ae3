//! # Pin-Protected Secrets
//!
//! Encrypts short secrets (typically an armored private key) under a pin so
//! they can be stored at rest.
//!
//! ## Blob Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PIN CIPHERTEXT FORMAT                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────┬────────────┬──────────┬──────────┬──────────────────────────┐ │
//! │  │ ver │ iterations │   salt   │  nonce   │  ciphertext + GCM tag    │ │
//! │  │ 1 B │  4 B (BE)  │   16 B   │   12 B   │  len(plaintext) + 16 B   │ │
//! │  └─────┴────────────┴──────────┴──────────┴──────────────────────────┘ │
//! │  └──────────────── header (AAD) ──────────┘                            │
//! │                                                                         │
//! │  key = PBKDF2-HMAC-SHA256(pin, salt, iterations)                       │
//! │  ct  = AES-256-GCM(key, nonce, plaintext, aad = header)                │
//! │                                                                         │
//! │  Whole blob is standard base64.                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The iteration count travels with the blob, so decrypting only needs the
//! pin and a [`PinCipher`] configured with a different cost can still read
//! anything written by another.

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::crypto::kdf::{
    derive_pin_key, validate_iterations, DEFAULT_PIN_KDF_ITERATIONS, MAX_PIN_KDF_ITERATIONS,
    SALT_SIZE,
};
use crate::error::{Error, Result};

/// Current blob format version
pub const FORMAT_VERSION: u8 = 0x01;

/// AES-GCM nonce size in bytes
pub const NONCE_SIZE: usize = 12;

/// AES-GCM tag size in bytes
pub const TAG_SIZE: usize = 16;

const HEADER_LEN: usize = 1 + 4 + SALT_SIZE + NONCE_SIZE;

/// Pin-based symmetric cipher with a fixed key-stretching cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinCipher {
    iterations: u32,
}

impl Default for PinCipher {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_PIN_KDF_ITERATIONS,
        }
    }
}

impl PinCipher {
    /// Create a cipher that stretches pins with `iterations` PBKDF2 rounds
    pub fn new(iterations: u32) -> Result<Self> {
        validate_iterations(iterations)?;
        Ok(Self { iterations })
    }

    /// PBKDF2 rounds used for new ciphertexts
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Encrypt a string under `pin`
    pub fn encrypt_string(&self, plaintext: &str, pin: &str) -> Result<String> {
        self.encrypt_string_with_rng(plaintext, pin, &mut OsRng)
    }

    /// Encrypt with a caller-provided CSPRNG for salt and nonce
    pub fn encrypt_string_with_rng<R: CryptoRngCore>(
        &self,
        plaintext: &str,
        pin: &str,
        rng: &mut R,
    ) -> Result<String> {
        let mut salt = [0u8; SALT_SIZE];
        rng.fill_bytes(&mut salt);
        let mut nonce = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut nonce);

        let mut blob = Vec::with_capacity(HEADER_LEN + plaintext.len() + TAG_SIZE);
        blob.push(FORMAT_VERSION);
        blob.extend_from_slice(&self.iterations.to_be_bytes());
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&nonce);

        let key = derive_pin_key(pin, &salt, self.iterations)?;
        let cipher = Aes256Gcm::new_from_slice(key.as_slice())
            .map_err(|e| Error::EncryptionFailed(format!("Invalid key: {}", e)))?;

        let payload = Payload {
            msg: plaintext.as_bytes(),
            aad: &blob,
        };
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), payload)
            .map_err(|e| Error::EncryptionFailed(format!("Encryption failed: {}", e)))?;

        blob.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(&blob))
    }

    /// Decrypt a blob produced by any `PinCipher`
    ///
    /// The configured iteration count is not consulted; the blob's own is.
    ///
    /// ## Errors
    ///
    /// - `InvalidCiphertextEncoding` for bad base64, a truncated blob, an
    ///   unknown version or an out-of-range iteration count
    /// - `DecryptionFailed` for a wrong pin, tampering, or non-UTF-8 plaintext
    pub fn decrypt_string(&self, ciphertext: &str, pin: &str) -> Result<String> {
        let compact: String = ciphertext.split_ascii_whitespace().collect();
        let blob = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| Error::InvalidCiphertextEncoding(e.to_string()))?;

        let header = parse_header(&blob)?;
        let key = derive_pin_key(pin, &header.salt, header.iterations)?;
        let cipher = Aes256Gcm::new_from_slice(key.as_slice())
            .map_err(|e| Error::EncryptionFailed(format!("Invalid key: {}", e)))?;

        let payload = Payload {
            msg: &blob[HEADER_LEN..],
            aad: &blob[..HEADER_LEN],
        };
        let plaintext = Zeroizing::new(
            cipher
                .decrypt(Nonce::from_slice(&header.nonce), payload)
                .map_err(|_| Error::DecryptionFailed)?,
        );

        std::str::from_utf8(&plaintext)
            .map(str::to_owned)
            .map_err(|_| Error::DecryptionFailed)
    }
}

struct Header {
    iterations: u32,
    salt: [u8; SALT_SIZE],
    nonce: [u8; NONCE_SIZE],
}

fn parse_header(blob: &[u8]) -> Result<Header> {
    if blob.len() < HEADER_LEN + TAG_SIZE {
        return Err(Error::InvalidCiphertextEncoding(format!(
            "Ciphertext too short: {} bytes",
            blob.len()
        )));
    }
    if blob[0] != FORMAT_VERSION {
        return Err(Error::InvalidCiphertextEncoding(format!(
            "Unknown format version {}",
            blob[0]
        )));
    }

    let mut iterations = [0u8; 4];
    iterations.copy_from_slice(&blob[1..5]);
    let iterations = u32::from_be_bytes(iterations);
    if iterations == 0 || iterations > MAX_PIN_KDF_ITERATIONS {
        return Err(Error::InvalidCiphertextEncoding(format!(
            "Unsupported iteration count {}",
            iterations
        )));
    }

    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(&blob[5..5 + SALT_SIZE]);
    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(&blob[5 + SALT_SIZE..HEADER_LEN]);

    Ok(Header {
        iterations,
        salt,
        nonce,
    })
}

/// Encrypt a string under `pin` with the default cost
pub fn encrypt_string(plaintext: &str, pin: &str) -> Result<String> {
    PinCipher::default().encrypt_string(plaintext, pin)
}

/// Decrypt a pin-protected string
pub fn decrypt_string(ciphertext: &str, pin: &str) -> Result<String> {
    PinCipher::default().decrypt_string(ciphertext, pin)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn fast() -> PinCipher {
        PinCipher::new(1_000).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let cipher = fast();
        let encrypted = cipher.encrypt_string("Hello, World!", "1234").unwrap();

        assert_eq!(cipher.decrypt_string(&encrypted, "1234").unwrap(), "Hello, World!");
    }

    #[test]
    fn test_default_cost_round_trip() {
        let encrypted = encrypt_string("secret", "246810").unwrap();
        let raw = STANDARD.decode(&encrypted).unwrap();

        assert_eq!(raw[0], FORMAT_VERSION);
        assert_eq!(&raw[1..5], &DEFAULT_PIN_KDF_ITERATIONS.to_be_bytes());
        assert_eq!(decrypt_string(&encrypted, "246810").unwrap(), "secret");
    }

    #[test]
    fn test_wrong_pin_fails() {
        let cipher = fast();
        let encrypted = cipher.encrypt_string("secret", "1234").unwrap();

        assert!(matches!(
            cipher.decrypt_string(&encrypted, "9999"),
            Err(Error::DecryptionFailed)
        ));
    }

    #[test]
    fn test_cost_travels_with_blob() {
        let encrypted = fast().encrypt_string("secret", "1234").unwrap();
        let other = PinCipher::new(2_000).unwrap();

        assert_eq!(other.decrypt_string(&encrypted, "1234").unwrap(), "secret");
    }

    #[test]
    fn test_randomized_output() {
        let cipher = fast();
        let a = cipher.encrypt_string("same", "1234").unwrap();
        let b = cipher.encrypt_string("same", "1234").unwrap();

        assert_ne!(a, b);
        assert_eq!(cipher.decrypt_string(&a, "1234").unwrap(), "same");
        assert_eq!(cipher.decrypt_string(&b, "1234").unwrap(), "same");
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let cipher = fast();
        let a = cipher
            .encrypt_string_with_rng("same", "1234", &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = cipher
            .encrypt_string_with_rng("same", "1234", &mut StdRng::seed_from_u64(9))
            .unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_plaintext_and_pin() {
        let cipher = fast();
        let encrypted = cipher.encrypt_string("", "").unwrap();

        assert_eq!(cipher.decrypt_string(&encrypted, "").unwrap(), "");
        assert!(cipher.decrypt_string(&encrypted, "0").is_err());
    }

    #[test]
    fn test_tampering_detected() {
        let cipher = fast();
        let encrypted = cipher.encrypt_string("secret", "1234").unwrap();
        let raw = STANDARD.decode(&encrypted).unwrap();

        // Flip a ciphertext byte, a salt byte and a nonce byte in turn
        for index in [raw.len() - 1, 6, 5 + SALT_SIZE] {
            let mut tampered = raw.clone();
            tampered[index] ^= 0x01;
            assert!(matches!(
                cipher.decrypt_string(&STANDARD.encode(&tampered), "1234"),
                Err(Error::DecryptionFailed)
            ));
        }
    }

    #[test]
    fn test_malformed_blobs() {
        let cipher = fast();
        let encrypted = cipher.encrypt_string("secret", "1234").unwrap();
        let raw = STANDARD.decode(&encrypted).unwrap();

        assert!(matches!(
            cipher.decrypt_string("not base64!", "1234"),
            Err(Error::InvalidCiphertextEncoding(_))
        ));
        assert!(matches!(
            cipher.decrypt_string(&STANDARD.encode(&raw[..HEADER_LEN]), "1234"),
            Err(Error::InvalidCiphertextEncoding(_))
        ));

        let mut bad_version = raw.clone();
        bad_version[0] = 0x02;
        assert!(matches!(
            cipher.decrypt_string(&STANDARD.encode(&bad_version), "1234"),
            Err(Error::InvalidCiphertextEncoding(_))
        ));

        let mut zero_rounds = raw.clone();
        zero_rounds[1..5].copy_from_slice(&0u32.to_be_bytes());
        assert!(matches!(
            cipher.decrypt_string(&STANDARD.encode(&zero_rounds), "1234"),
            Err(Error::InvalidCiphertextEncoding(_))
        ));

        let mut huge_rounds = raw;
        huge_rounds[1..5].copy_from_slice(&u32::MAX.to_be_bytes());
        assert!(matches!(
            cipher.decrypt_string(&STANDARD.encode(&huge_rounds), "1234"),
            Err(Error::InvalidCiphertextEncoding(_))
        ));
    }

    #[test]
    fn test_new_rejects_bad_cost() {
        assert!(PinCipher::new(0).is_err());
        assert!(PinCipher::new(MAX_PIN_KDF_ITERATIONS + 1).is_err());
        assert_eq!(PinCipher::default().iterations(), DEFAULT_PIN_KDF_ITERATIONS);
    }
}
