//! # Envelope Demo
//!
//! Demonstrates an encrypted round trip between two parties.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example envelope_demo
//! ```

use tracing_subscriber::EnvFilter;
use umbra_envelope::crypto::get_conversation_key;
use umbra_envelope::{decrypt, encrypt, Error, SecretKey};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Umbra Envelope: End-to-End Encryption Demo ===\n");

    // Step 1: Two parties (fixed keys; in production use secure random keys)
    println!("Step 1: Loading keys for Alice and Bob...");
    let alice = SecretKey::from_hex("0000000000000000000000000000000000000000000000000000000000000001")?;
    let bob = SecretKey::from_hex("0000000000000000000000000000000000000000000000000000000000000002")?;
    println!("  Alice's public key: {}", alice.public_key());
    println!("  Bob's public key:   {}", bob.public_key());
    println!();

    // Step 2: Both sides derive the same conversation key
    println!("Step 2: Deriving conversation keys (secp256k1 ECDH + HKDF)...");
    let alice_key = get_conversation_key(&alice, &bob.public_key())?;
    let bob_key = get_conversation_key(&bob, &alice.public_key())?;
    println!("  Keys match: {}", alice_key == bob_key);
    println!();

    // Step 3: Alice encrypts
    println!("Step 3: Alice encrypts a message for Bob...");
    let message = "Hello Bob! This message is padded, encrypted and authenticated.";
    let payload = encrypt(message, &alice, &bob.public_key())?;
    println!("  Plaintext:  {} bytes", message.len());
    println!("  Payload:    {}", payload);
    println!();

    // Step 4: Bob decrypts
    println!("Step 4: Bob decrypts...");
    let decrypted = decrypt(&payload, &bob, &alice.public_key())?;
    println!("  Decrypted:  {}", decrypted);
    println!();

    // Step 5: Tampering is detected
    println!("Step 5: Tampering with the payload...");
    let mut tampered = payload.into_bytes();
    let i = tampered.len() / 2;
    tampered[i] = if tampered[i] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap_or_default();
    match decrypt(&tampered, &bob, &alice.public_key()) {
        Ok(_) => println!("  Unexpected: tampered payload decrypted"),
        Err(e) => println!("  Rejected:   {} (code {})", e, e.code()),
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
