//! Integration tests for the CredVault crypto module.

use credvault::crypto::password::{hash_password, verify_password, Argon2Params};
use credvault::crypto::{decrypt, derive_blob_key, encrypt, MIN_KDF_ITERATIONS};

/// Cheap Argon2 costs for tests (still above the enforced floor).
fn test_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

const SALT: &[u8] = b"test-deployment-salt";

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = b"the launch codes are 0000";

    let ciphertext = encrypt(&key, plaintext).expect("encrypt should succeed");

    // Ciphertext must be longer than plaintext (12-byte nonce + 16-byte tag).
    assert!(ciphertext.len() > plaintext.len());

    let recovered = decrypt(&key, &ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = [0xCDu8; 32];
    let plaintext = b"same input";

    let ct1 = encrypt(&key, plaintext).expect("encrypt 1");
    let ct2 = encrypt(&key, plaintext).expect("encrypt 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(ct1, ct2, "two encryptions of the same plaintext must differ");
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let key = [0x11u8; 32];
    let wrong_key = [0x22u8; 32];
    let plaintext = b"for your eyes only";

    let ciphertext = encrypt(&key, plaintext).expect("encrypt");
    let result = decrypt(&wrong_key, &ciphertext);

    assert!(result.is_err(), "decryption with the wrong key must fail");
}

#[test]
fn decrypt_with_truncated_data_fails() {
    // Anything shorter than 12 bytes (nonce length) should fail.
    let key = [0xAAu8; 32];
    let result = decrypt(&key, &[0u8; 5]);
    assert!(result.is_err(), "truncated ciphertext must fail");
}

#[test]
fn decrypt_with_corrupted_ciphertext_fails() {
    let key = [0xBBu8; 32];
    let plaintext = b"integrity matters";

    let mut ciphertext = encrypt(&key, plaintext).expect("encrypt");
    // Flip a byte in the ciphertext portion (after the 12-byte nonce).
    if let Some(byte) = ciphertext.get_mut(15) {
        *byte ^= 0xFF;
    }

    let result = decrypt(&key, &ciphertext);
    assert!(result.is_err(), "corrupted ciphertext must fail auth check");
}

// ---------------------------------------------------------------------------
// Passphrase key derivation (PBKDF2)
// ---------------------------------------------------------------------------

#[test]
fn derive_blob_key_same_inputs_same_output() {
    let key1 = derive_blob_key(b"my-passphrase", SALT, MIN_KDF_ITERATIONS).expect("derive 1");
    let key2 = derive_blob_key(b"my-passphrase", SALT, MIN_KDF_ITERATIONS).expect("derive 2");

    assert_eq!(
        *key1, *key2,
        "same passphrase + salt + iterations must produce the same key"
    );
}

#[test]
fn derive_blob_key_different_passphrases_different_keys() {
    let key1 = derive_blob_key(b"passphrase-one", SALT, MIN_KDF_ITERATIONS).expect("derive 1");
    let key2 = derive_blob_key(b"passphrase-two", SALT, MIN_KDF_ITERATIONS).expect("derive 2");

    assert_ne!(*key1, *key2);
}

#[test]
fn derive_blob_key_different_salts_different_keys() {
    let key1 = derive_blob_key(b"same", b"salt-aaaa", MIN_KDF_ITERATIONS).expect("derive 1");
    let key2 = derive_blob_key(b"same", b"salt-bbbb", MIN_KDF_ITERATIONS).expect("derive 2");

    assert_ne!(*key1, *key2);
}

#[test]
fn derive_blob_key_rejects_weak_iteration_counts() {
    let result = derive_blob_key(b"pass", SALT, MIN_KDF_ITERATIONS - 1);
    assert!(result.is_err(), "iteration counts below the floor must fail");
}

#[test]
fn derive_blob_key_rejects_empty_inputs() {
    assert!(derive_blob_key(b"", SALT, MIN_KDF_ITERATIONS).is_err());
    assert!(derive_blob_key(b"pass", b"", MIN_KDF_ITERATIONS).is_err());
}

// ---------------------------------------------------------------------------
// Login-password hashing (Argon2id)
// ---------------------------------------------------------------------------

#[test]
fn hash_password_is_deterministic() {
    let h1 = hash_password(b"S3cret!pw", SALT, &test_params()).expect("hash 1");
    let h2 = hash_password(b"S3cret!pw", SALT, &test_params()).expect("hash 2");
    assert_eq!(h1, h2);
}

#[test]
fn hash_password_differs_per_password_and_salt() {
    let h1 = hash_password(b"password-one", SALT, &test_params()).expect("hash 1");
    let h2 = hash_password(b"password-two", SALT, &test_params()).expect("hash 2");
    assert_ne!(h1, h2);

    let h3 = hash_password(b"password-one", b"other-salt", &test_params()).expect("hash 3");
    assert_ne!(h1, h3);
}

#[test]
fn verify_password_accepts_correct_and_rejects_wrong() {
    let stored = hash_password(b"correct horse", SALT, &test_params()).expect("hash");

    assert!(verify_password(b"correct horse", SALT, &test_params(), &stored).expect("verify"));
    assert!(!verify_password(b"battery staple", SALT, &test_params(), &stored).expect("verify"));
}

#[test]
fn hash_password_rejects_weak_memory_cost() {
    let weak = Argon2Params {
        memory_kib: 1_024,
        iterations: 1,
        parallelism: 1,
    };
    assert!(hash_password(b"pw", SALT, &weak).is_err());
}
