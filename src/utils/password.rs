//! Password hashing in the `pbkdf2_sha256$<iterations>$<salt>$<hash>` format.
//!
//! The hash part is the standard base64 encoding of a 32-byte
//! PBKDF2-HMAC-SHA256 output.

use base64::Engine as _;
use pbkdf2::pbkdf2_hmac_array;
use rand::Rng;
use rand::distr::Alphanumeric;
use sha2::Sha256;
use subtle::ConstantTimeEq;

const ALGORITHM: &str = "pbkdf2_sha256";

/// Iterations used for new hashes.
pub const DEFAULT_ITERATIONS: u32 = 600_000;

const SALT_LENGTH: usize = 22;
const KEY_LENGTH: usize = 32;

/// Hashes `password` with a fresh random salt and [`DEFAULT_ITERATIONS`].
pub fn hash_password(password: &str) -> String {
    hash_password_with(password, DEFAULT_ITERATIONS)
}

/// Hashes `password` with a fresh random salt and the given iteration count.
pub fn hash_password_with(password: &str, iterations: u32) -> String {
    let salt: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LENGTH)
        .map(char::from)
        .collect();

    encode(password, &salt, iterations)
}

/// Checks `password` against an encoded hash.
///
/// Unknown algorithms and malformed hashes never verify.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.splitn(4, '$');
    let (Some(algorithm), Some(iterations), Some(salt), Some(_)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    if algorithm != ALGORITHM {
        return false;
    }
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    if iterations == 0 {
        return false;
    }

    encode(password, salt, iterations)
        .as_bytes()
        .ct_eq(encoded.as_bytes())
        .into()
}

fn encode(password: &str, salt: &str, iterations: u32) -> String {
    let key = pbkdf2_hmac_array::<Sha256, KEY_LENGTH>(password.as_bytes(), salt.as_bytes(), iterations);
    let hash = base64::engine::general_purpose::STANDARD.encode(key);
    format!("{ALGORITHM}${iterations}${salt}${hash}")
}
