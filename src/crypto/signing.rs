//! # Digital Signatures Module
//!
//! Provides RSA digital signatures for message authentication and integrity.
//!
//! ## Signature Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SIGNING FLOW                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Message ──► SHA-256 ──► EMSA-PKCS1-v1_5 encode ──► RSA private op     │
//! │                                                                         │
//! │  Output: SignedMessage { signature (k bytes), signer public PEM }      │
//! │                                                                         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                       VERIFICATION FLOW                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Message ──► SHA-256 ─┐                                                │
//! │  Signature ──► RSA public op ──► compare encoded digest ──► true/false │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Properties
//!
//! | Property | Description |
//! |----------|-------------|
//! | Scheme | RSASSA-PKCS1-v1_5 with SHA-256 |
//! | Deterministic | Same key + message = same signature |
//! | Public Verification | Only the public key is needed to verify |
//!
//! A signature that doesn't match is an ordinary outcome and yields `false`.
//! Only text that can't be decoded at all is an error.

use base64::{engine::general_purpose::STANDARD, Engine};
use rsa::Pkcs1v15Sign;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::crypto::keys::{parse, KeyPair};
use crate::error::{Error, Result};

/// An RSA signature (always exactly one modulus length long when valid)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "base64_bytes")] Vec<u8>);

impl Signature {
    /// Create from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encode as standard base64
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Decode from standard base64
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let compact: String = encoded.split_ascii_whitespace().collect();
        if compact.is_empty() {
            return Err(Error::InvalidSignatureEncoding("Signature is empty".into()));
        }
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| Error::InvalidSignatureEncoding(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A signature together with the signer's armored public key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMessage {
    /// Signature over the message
    pub signature: Signature,
    /// PKCS#1 PEM of the signer's public key
    pub public_key: String,
}

/// Sign a message with RSASSA-PKCS1-v1_5 / SHA-256
///
/// ## Errors
///
/// `MissingPrivateKey` if `keypair` is public-only.
pub fn sign(keypair: &KeyPair, message: &[u8]) -> Result<SignedMessage> {
    let private = keypair.private_key()?;
    let digest = Sha256::digest(message);

    let signature = private
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| Error::SigningFailed(e.to_string()))?;

    Ok(SignedMessage {
        signature: Signature(signature),
        public_key: keypair.armored_public()?.to_owned(),
    })
}

/// Verify a signature using the public half of `keypair`
///
/// Returns `false` for any mismatch: wrong key, altered message, altered or
/// truncated signature.
pub fn verify(keypair: &KeyPair, message: &[u8], signature: &Signature) -> bool {
    let digest = Sha256::digest(message);
    keypair
        .public_key()
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature.0)
        .is_ok()
}

/// Verify a base64 signature against armored key text
///
/// ## Errors
///
/// - `InvalidKey` if `armored_key` can't be parsed
/// - `InvalidSignatureEncoding` if `signature` isn't base64
pub fn verify_armored(armored_key: &str, message: &[u8], signature: &str) -> Result<bool> {
    let parsed = parse(armored_key).map_err(|e| Error::InvalidKey(e.to_string()))?;
    let signature = Signature::from_base64(signature)?;
    Ok(verify(parsed.keypair(), message, &signature))
}

/// Serde helper for signature bytes as base64
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::fixtures::{FIXED_PRIVATE_PEM, FIXED_PUBLIC_PEM};
    use crate::crypto::keys::MIN_KEY_BITS;

    fn fixed() -> KeyPair {
        KeyPair::from_armored(FIXED_PRIVATE_PEM).unwrap()
    }

    #[test]
    fn test_sign_verify() {
        let keypair = KeyPair::generate(MIN_KEY_BITS).unwrap();
        let message = b"hello world";

        let signed = sign(&keypair, message).unwrap();

        assert_eq!(signed.public_key, keypair.armored_public().unwrap());
        assert_eq!(signed.signature.as_bytes().len(), keypair.key_size());
        assert!(verify(&keypair, message, &signed.signature));
    }

    #[test]
    fn test_verify_with_public_only_key() {
        let keypair = fixed();
        let message = b"28004708";

        let signed = sign(&keypair, message).unwrap();
        let public = KeyPair::from_armored(FIXED_PUBLIC_PEM).unwrap();

        assert!(verify(&public, message, &signed.signature));
        assert!(verify_armored(FIXED_PUBLIC_PEM, message, &signed.signature.to_base64()).unwrap());
    }

    #[test]
    fn test_verify_wrong_message_fails() {
        let keypair = fixed();
        let signed = sign(&keypair, b"Hello, World!").unwrap();

        assert!(!verify(&keypair, b"Wrong message!", &signed.signature));
    }

    #[test]
    fn test_verify_wrong_key_fails() {
        let keypair1 = fixed();
        let keypair2 = KeyPair::generate(MIN_KEY_BITS).unwrap();
        let signed = sign(&keypair1, b"Hello, World!").unwrap();

        assert!(!verify(&keypair2, b"Hello, World!", &signed.signature));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let keypair = fixed();
        let message = b"Hello, World!";
        let signed = sign(&keypair, message).unwrap();

        let mut flipped = signed.signature.as_bytes().to_vec();
        flipped[10] ^= 0x01;
        assert!(!verify(&keypair, message, &Signature::from_bytes(flipped)));

        let truncated = signed.signature.as_bytes()[1..].to_vec();
        assert!(!verify(&keypair, message, &Signature::from_bytes(truncated)));

        assert!(!verify(&keypair, message, &Signature::from_bytes(Vec::new())));
    }

    #[test]
    fn test_deterministic_signatures() {
        let keypair = fixed();
        let sig1 = sign(&keypair, b"Hello, World!").unwrap();
        let sig2 = sign(&keypair, b"Hello, World!").unwrap();

        assert_eq!(sig1.signature, sig2.signature);
    }

    #[test]
    fn test_sign_requires_private_key() {
        let public = KeyPair::from_armored(FIXED_PUBLIC_PEM).unwrap();
        assert!(matches!(sign(&public, b"x"), Err(Error::MissingPrivateKey)));
    }

    #[test]
    fn test_verify_armored_errors() {
        let signed = sign(&fixed(), b"x").unwrap();
        let encoded = signed.signature.to_base64();

        assert!(matches!(
            verify_armored("not a key", b"x", &encoded),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(
            verify_armored(FIXED_PUBLIC_PEM, b"x", "!!not base64!!"),
            Err(Error::InvalidSignatureEncoding(_))
        ));
        assert!(matches!(
            verify_armored(FIXED_PUBLIC_PEM, b"x", "   "),
            Err(Error::InvalidSignatureEncoding(_))
        ));
        // Well-formed base64 that simply doesn't match is not an error
        assert!(!verify_armored(FIXED_PUBLIC_PEM, b"x", "AAAA").unwrap());
    }

    #[test]
    fn test_signed_message_serialization() {
        let signed = sign(&fixed(), b"test").unwrap();

        let json = serde_json::to_string(&signed).unwrap();
        let restored: SignedMessage = serde_json::from_str(&json).unwrap();

        assert_eq!(signed, restored);
        assert!(json.contains(&signed.signature.to_base64()));
    }
}
