//! # Encryption Demo
//!
//! Demonstrates chunked RSA encryption with both padding schemes.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example encryption_demo
//! ```

use keyvault_core::crypto::{encrypt, encrypt_oaep, KeyPair, Padding};
use keyvault_core::IdentitySession;

fn main() {
    println!("=== Keyvault Core: Encryption Demo ===\n");

    // Step 1: Alice and Bob each have an identity
    println!("Step 1: Creating identities...");

    let alice = IdentitySession::new();
    alice.generate_identity().expect("Failed to create Alice");

    let bob = KeyPair::generate(2048).expect("Failed to create Bob");
    println!("  Alice: {}", alice.fingerprint(None).expect("fingerprint"));
    println!("  Bob:   {}", bob.fingerprint().expect("fingerprint"));
    println!();

    // Bob learns Alice's public key
    let alice_public = KeyPair::from_armored(&alice.public_armored(None).expect("armor"))
        .expect("Failed to parse Alice's key");

    // Step 2: Chunking
    println!("Step 2: Block capacity for a {}-bit key", alice_public.bits());
    for padding in [Padding::Pkcs1v15, Padding::Oaep] {
        println!(
            "  {:<12} {} bytes per block",
            padding.name(),
            padding.capacity(alice_public.key_size()).expect("capacity")
        );
    }
    println!();

    let message = "A long message that spans more than one RSA block. ".repeat(8);
    println!("Step 3: Bob encrypts a {}-byte message for Alice...", message.len());

    let legacy = encrypt(message.as_bytes(), &alice_public).expect("encrypt");
    let oaep = encrypt_oaep(message.as_bytes(), &alice_public).expect("encrypt");
    println!("  PKCS#1 v1.5 ciphertext: {} base64 chars", legacy.len());
    println!("  OAEP ciphertext:        {} base64 chars", oaep.len());
    println!();

    // Step 4: Alice decrypts with her active identity
    println!("Step 4: Alice decrypts with her active identity...");

    let from_legacy = alice.decrypt(&legacy, None).expect("decrypt");
    let from_oaep = alice.decrypt_oaep(&oaep, None).expect("decrypt");
    println!("  PKCS#1 v1.5 round trip: {}", from_legacy == message.as_bytes());
    println!("  OAEP round trip:        {}", from_oaep == message.as_bytes());
    println!();

    // Step 5: Bob can't read it
    println!("Step 5: Bob tries to decrypt with his own key...");
    match keyvault_core::crypto::decrypt_oaep(&oaep, &bob) {
        Ok(_) => println!("  Unexpectedly succeeded!"),
        Err(e) => println!("  Failed as expected: {} (code {})", e, e.code()),
    }
    println!();

    println!("=== Demo Complete ===");
}
