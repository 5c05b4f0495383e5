//! Bearer token generation and hashing.
//!
//! Raw tokens are handed to the client once; only their HMAC-SHA256 under
//! the server signing secret is stored.

use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of random bytes before base64 encoding.
const TOKEN_LENGTH_BYTES: usize = 32;

/// Generates a cryptographically secure random bearer token.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 43-character token.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_token() -> String {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Hashes a raw token with HMAC-SHA256 keyed by `secret`.
///
/// Returns a 64-character lowercase hex-encoded MAC. The same secret must be
/// used when the token is issued and when it is checked.
pub fn hash_token(secret: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
