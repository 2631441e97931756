//! Password hashing via bcrypt.

use std::sync::LazyLock;

use tracing::debug;

use super::AuthError;

/// bcrypt cost factor.
pub const BCRYPT_COST: u32 = 10;

/// Hash compared against when no account matches, so unknown emails cost
/// the same bcrypt round as wrong passwords.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| bcrypt::hash("folio-no-such-account", BCRYPT_COST).unwrap_or_default());

/// Hash a password with bcrypt (cost 10).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
///
/// A malformed hash is a mismatch, not an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            debug!("bcrypt verify failed on stored hash: {e}");
            false
        }
    }
}

/// Burn one verification against a fixed hash. Always returns `false`.
pub fn verify_against_dummy(password: &str) -> bool {
    let _ = verify_password(password, &DUMMY_HASH);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn hash_uses_configured_cost() {
        let hash = hash_password("pw").unwrap();
        assert_eq!(&hash[4..6], "10");
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_fails_closed() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn dummy_never_matches() {
        assert!(!verify_against_dummy("folio-no-such-account"));
    }
}
