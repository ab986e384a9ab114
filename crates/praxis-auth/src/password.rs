//! PBKDF2 password hashing.
//!
//! Stored form is `<hash_b64>.<salt_b64>`. Verification re-derives the hash
//! from the candidate password and the stored salt, then compares in
//! constant time.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

const ITERATIONS: u32 = 200_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Hashes a password with a fresh random salt.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    let key = derive_key(password, &salt, ITERATIONS);
    format!("{}.{}", STANDARD.encode(key), STANDARD.encode(salt))
}

/// Checks a candidate password against a stored `<hash>.<salt>` string.
///
/// Malformed stored values verify as false rather than erroring, so a
/// corrupted row cannot be used to log in.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((hash_b64, salt_b64)) = stored.split_once('.') else {
        return false;
    };
    let Ok(expected) = STANDARD.decode(hash_b64) else {
        return false;
    };
    let Ok(salt) = STANDARD.decode(salt_b64) else {
        return false;
    };
    let key = derive_key(password, &salt, ITERATIONS);
    constant_time_eq(&key, &expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_is_deterministic_per_salt() {
        let a = derive_key("hunter2", b"0123456789abcdef", 1_000);
        let b = derive_key("hunter2", b"0123456789abcdef", 1_000);
        let c = derive_key("hunter2", b"fedcba9876543210", 1_000);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hash_then_verify_round_trips() {
        let stored = hash_password("correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &stored));
        assert!(!verify_password("correct horse battery stable", &stored));
    }

    #[test]
    fn stored_format_has_two_base64_parts() {
        let stored = hash_password("pw");
        let (hash_b64, salt_b64) = stored.split_once('.').unwrap();
        assert_eq!(STANDARD.decode(hash_b64).unwrap().len(), KEY_LEN);
        assert_eq!(STANDARD.decode(salt_b64).unwrap().len(), SALT_LEN);
    }

    #[test]
    fn malformed_stored_values_never_verify() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "no-dot-here"));
        assert!(!verify_password("pw", "not base64!.also not!"));
    }

    #[test]
    fn constant_time_eq_handles_length_mismatch() {
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"abc", b"abc"));
    }
}
