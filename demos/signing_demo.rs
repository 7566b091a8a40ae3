//! # Digital Signature Demo
//!
//! Demonstrates RSA signatures and fingerprints for message authentication.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example signing_demo
//! ```

use keyvault_core::crypto::{compute_fingerprint, sign, verify, verify_armored, KeyPair};

fn main() {
    println!("=== Keyvault Core: Digital Signature Demo ===\n");

    // Step 1: Create a keypair
    println!("Step 1: Generating a 2048-bit RSA keypair...");

    let keypair = KeyPair::generate(2048).expect("Failed to generate keypair");
    let fingerprint = keypair.fingerprint().expect("Failed to fingerprint key");

    println!("  Fingerprint: {}", fingerprint);
    println!();

    // Step 2: Explain the signing process
    println!("Step 2: Understanding RSA Signatures");
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │                   SIGNATURE FLOW                            │");
    println!("  ├─────────────────────────────────────────────────────────────┤");
    println!("  │                                                             │");
    println!("  │  SIGNING (Private Key Holder Only):                        │");
    println!("  │                                                             │");
    println!("  │    Message ─► SHA-256 ─┐                                   │");
    println!("  │                        ▼                                   │");
    println!("  │    Private ─► PKCS#1 v1.5 ─► Signature (256 bytes)         │");
    println!("  │    Key          Sign                                       │");
    println!("  │                                                             │");
    println!("  │  VERIFICATION (Anyone with Public Key):                    │");
    println!("  │                                                             │");
    println!("  │    Message ─► SHA-256 ─┐                                   │");
    println!("  │                        ▼                                   │");
    println!("  │    Public ──► PKCS#1 v1.5 ─► Valid / Invalid               │");
    println!("  │    Key          Verify                                     │");
    println!("  │    Signature ──────┘                                       │");
    println!("  │                                                             │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    // Step 3: Sign a message
    println!("Step 3: Signing a message...");

    let message = b"Transfer 10 credits to Bob";
    let signed = sign(&keypair, message).expect("Failed to sign");

    println!("  Message: {:?}", String::from_utf8_lossy(message));
    println!("  Signature (base64): {}...", &signed.signature.to_base64()[..32]);
    println!("  Signature length: {} bytes", signed.signature.as_bytes().len());
    println!();

    // Step 4: Verify with only the public key text
    println!("Step 4: Verifying with the signer's public PEM...");

    let valid = verify_armored(&signed.public_key, message, &signed.signature.to_base64())
        .expect("Malformed input");
    println!("  Valid: {}", valid);

    let sender = compute_fingerprint(&signed.public_key).expect("Bad public key");
    println!("  Signer fingerprint matches: {}", sender.ct_eq(&fingerprint));
    println!();

    // Step 5: Tampering
    println!("Step 5: Verifying a tampered message...");

    let tampered = b"Transfer 99 credits to Bob";
    println!(
        "  Valid: {}",
        verify(&keypair, tampered, &signed.signature)
    );
    println!();

    println!("=== Demo Complete ===");
}
