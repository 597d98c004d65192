//! Credential hashing primitives.
//!
//! Passwords are never stored — only the hex-encoded SHA-512 digest of
//! password bytes followed by per-account salt bytes. Verification
//! recomputes the digest and compares in constant time.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

/// Compute the salted password digest: lowercase hex SHA-512 over
/// password bytes then salt bytes, in that order.
///
/// Deterministic for identical `(password, salt)` — verification relies
/// on recomputation.
#[must_use]
pub fn salt_hash(password: &str, salt: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a fresh per-account salt.
///
/// UUIDv4 bytes come from the OS CSPRNG, giving 122 bits of entropy per
/// salt, base64-encoded for storage as text.
#[must_use]
pub fn generate_salt() -> String {
    BASE64.encode(uuid::Uuid::new_v4().as_bytes())
}

/// Constant-time equality of two hex digest strings.
///
/// Avoids the early-exit timing channel of `==` when comparing a
/// recomputed digest against the stored one.
#[must_use]
pub fn digest_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn salt_hash_is_deterministic() {
        assert_eq!(salt_hash("pw", "salt"), salt_hash("pw", "salt"));
    }

    #[test]
    fn salt_hash_is_hex_sha512() {
        let digest = salt_hash("pw", "salt");
        // SHA-512 → 64 bytes → 128 hex characters.
        assert_eq!(digest.len(), 128);
        assert!(digest.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn different_password_changes_digest() {
        assert_ne!(salt_hash("pw1", "salt"), salt_hash("pw2", "salt"));
    }

    #[test]
    fn different_salt_changes_digest() {
        assert_ne!(salt_hash("pw", "salt1"), salt_hash("pw", "salt2"));
    }

    #[test]
    fn concatenation_order_matters() {
        // hash("ab" + "c") must differ from hash("a" + "bc").
        assert_ne!(salt_hash("ab", "c"), salt_hash("a", "bc"));
    }

    #[test]
    fn generated_salts_are_unique() {
        let a = generate_salt();
        let b = generate_salt();
        assert_ne!(a, b);
    }

    #[test]
    fn generated_salt_decodes_to_at_least_eight_bytes() {
        let salt = generate_salt();
        let decoded = BASE64.decode(&salt).unwrap();
        assert!(decoded.len() >= 8);
    }

    #[test]
    fn digest_eq_matches_plain_equality() {
        let d = salt_hash("pw", "salt");
        assert!(digest_eq(&d, &d.clone()));
        assert!(!digest_eq(&d, &salt_hash("other", "salt")));
    }
}
