use crate::domain::errors::DomainError;

pub fn hash_password(raw: &str) -> Result<String, DomainError> {
    bcrypt::hash(raw, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal(e.to_string()))
}

/// A hash that fails to parse counts as a mismatch rather than an error;
/// login paths only ever need a yes/no.
pub fn verify_password(raw: &str, hash: &str) -> bool {
    bcrypt::verify(raw, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_original_password_only() {
        let hash = hash_password("hunter2").expect("hash failed");
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("hunter2", "not-a-bcrypt-hash"));
    }
}
