//! bcrypt password hashing.
//!
//! bcrypt is CPU-bound; the async wrappers run it on tokio's blocking pool.

use crate::error::AuthError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash `password` with the given bcrypt cost.
///
/// # Errors
///
/// Returns `AuthError::Hashing` for a cost bcrypt rejects.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check `password` against a stored bcrypt hash.
///
/// # Errors
///
/// Returns `AuthError::Hashing` when `hash` is not a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// [`hash_password`] on the blocking pool.
///
/// # Errors
///
/// As [`hash_password`], or `AuthError::Hashing` if the blocking task panics.
pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}

/// [`verify_password`] on the blocking pool.
///
/// # Errors
///
/// As [`verify_password`], or `AuthError::Hashing` if the blocking task panics.
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimum cost keeps the tests fast.
    const COST: u32 = 4;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse", COST).unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("password123", COST).unwrap();
        let b = hash_password("password123", COST).unwrap();
        assert_ne!(a, b, "salts should differ");
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "not-a-hash"),
            Err(AuthError::Hashing(_))
        ));
    }

    #[test]
    fn invalid_cost_is_an_error() {
        assert!(hash_password("password123", 2).is_err());
    }

    #[tokio::test]
    async fn blocking_wrappers_round_trip() {
        let hash = hash_password_blocking("s3cret-pass".into(), COST).await.unwrap();
        assert!(verify_password_blocking("s3cret-pass".into(), hash).await.unwrap());
    }
}
