use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::Error;

/// Iteration count for the salted SHA-256 scheme. Stored hashes from the
/// legacy deployment were produced with exactly this count, so it cannot be
/// raised without a migration path for existing credentials.
pub const HASH_ITERATIONS: u32 = 1024;

/// Salt length in raw bytes, before base64 encoding.
pub const SALT_LEN: usize = 16;

/// A derived password credential: both fields base64-encoded.
#[derive(Debug, Clone)]
pub struct Credential {
    pub hash: String,
    pub salt: String,
}

/// Derive a credential from a plaintext password.
///
/// Generates a fresh random salt on every call, so two derivations of the
/// same plaintext never share a salt or a hash.
pub fn derive(plaintext: &str) -> Result<Credential, Error> {
    if plaintext.trim().is_empty() {
        return Err(Error::Validation("password must not be empty".to_string()));
    }

    let salt: [u8; SALT_LEN] = rand::random();
    let hash = digest(plaintext, &salt);

    Ok(Credential {
        hash: BASE64.encode(hash),
        salt: BASE64.encode(salt),
    })
}

/// Verify a plaintext password against a stored (hash, salt) pair.
///
/// Comparison is constant-time. A hash or salt that does not decode as
/// base64 verifies as false rather than erroring: stored credentials are
/// trusted input, anything else is simply not a match.
pub fn verify(plaintext: &str, hash: &str, salt: &str) -> bool {
    let Ok(salt_bytes) = BASE64.decode(salt) else {
        return false;
    };
    let Ok(expected) = BASE64.decode(hash) else {
        return false;
    };

    let actual = digest(plaintext, &salt_bytes);
    actual[..].ct_eq(&expected[..]).into()
}

// h0 = sha256(salt || plaintext), then h(i) = sha256(h(i-1)).
fn digest(plaintext: &str, salt: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(plaintext.as_bytes());
    let mut out = hasher.finalize();

    for _ in 1..HASH_ITERATIONS {
        out = Sha256::digest(out);
    }

    out.into()
}
