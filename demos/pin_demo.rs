//! # Pin Storage Demo
//!
//! Demonstrates sealing an identity under a pin and restoring it.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example pin_demo
//! ```

use keyvault_core::{CryptoConfig, IdentitySession};

fn main() {
    println!("=== Keyvault Core: Pin Storage Demo ===\n");

    let config = CryptoConfig::default();
    println!("Config: {:?}\n", config);

    // Step 1: Create and seal
    println!("Step 1: Creating an identity and sealing it with pin 482916...");

    let session = IdentitySession::with_config(config.clone()).expect("Invalid config");
    session.generate_identity().expect("Failed to create identity");
    let fingerprint = session.fingerprint(None).expect("fingerprint");

    let sealed = session.seal("482916").expect("Failed to seal");
    println!("  Fingerprint: {}", fingerprint);
    println!("  Sealed blob: {}... ({} chars)", &sealed[..24], sealed.len());
    println!();

    // Step 2: Simulate an app restart
    println!("Step 2: Restarting with an empty session...");

    let restarted = IdentitySession::with_config(config).expect("Invalid config");
    println!("  Active identity: {}", restarted.is_active());
    println!();

    // Step 3: Wrong pin
    println!("Step 3: Restoring with the wrong pin...");
    match restarted.restore(&sealed, "000000") {
        Ok(_) => println!("  Unexpectedly succeeded!"),
        Err(e) => println!(
            "  Failed: {} (user action required: {})",
            e,
            e.requires_user_action()
        ),
    }
    println!();

    // Step 4: Right pin
    println!("Step 4: Restoring with the right pin...");
    restarted.restore(&sealed, "482916").expect("Failed to restore");
    let restored = restarted.fingerprint(None).expect("fingerprint");
    println!("  Fingerprint: {}", restored);
    println!("  Same identity: {}", restored == fingerprint);
    println!();

    println!("=== Demo Complete ===");
}
