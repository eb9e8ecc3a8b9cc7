//! Auth secret generation.
//!
//! Uses `fastrand`, which is not a cryptographic RNG. The value seeds session
//! signing in local development setups only.

/// Length of a generated auth secret.
pub const AUTH_SECRET_LEN: usize = 50;

/// Characters an auth secret is drawn from: `A-Z` then `0-9`.
pub const AUTH_SECRET_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate an auth secret from a caller-supplied RNG.
pub fn generate_auth_secret(rng: &mut fastrand::Rng) -> String {
    (0..AUTH_SECRET_LEN)
        .map(|_| AUTH_SECRET_ALPHABET[rng.usize(..AUTH_SECRET_ALPHABET.len())] as char)
        .collect()
}
