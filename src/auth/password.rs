use bcrypt::{hash, verify, DEFAULT_COST};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password must be at least 8 characters long")]
    TooShort,
    #[error("Password must be no more than 128 characters long")]
    TooLong,
    #[error("Password must contain at least one uppercase letter")]
    NoUppercase,
    #[error("Password must contain at least one lowercase letter")]
    NoLowercase,
    #[error("Password must contain at least one number")]
    NoNumber,
    #[error("Failed to hash password")]
    HashingFailed,
    #[error("Failed to verify password")]
    VerificationFailed,
}

/// Password strength requirements
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_number: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            require_uppercase: true,
            require_lowercase: true,
            require_number: true,
        }
    }
}

/// Validate password strength according to policy
pub fn validate_password_strength(
    password: &str,
    policy: &PasswordPolicy,
) -> Result<(), PasswordError> {
    if password.len() < policy.min_length {
        return Err(PasswordError::TooShort);
    }

    if password.len() > policy.max_length {
        return Err(PasswordError::TooLong);
    }

    if policy.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
        return Err(PasswordError::NoUppercase);
    }

    if policy.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
        return Err(PasswordError::NoLowercase);
    }

    if policy.require_number && !password.chars().any(|c| c.is_numeric()) {
        return Err(PasswordError::NoNumber);
    }

    Ok(())
}

/// Hash a password using bcrypt, validating strength first
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    validate_password_strength(password, &PasswordPolicy::default())?;

    hash(password, DEFAULT_COST).map_err(|_| PasswordError::HashingFailed)
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    verify(password, hash).map_err(|_| PasswordError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy() {
        let policy = PasswordPolicy::default();

        assert!(validate_password_strength("Edzo2024megfelel", &policy).is_ok());
        assert!(matches!(
            validate_password_strength("Rovid1", &policy),
            Err(PasswordError::TooShort)
        ));
        assert!(matches!(
            validate_password_strength("csupakisbetu1", &policy),
            Err(PasswordError::NoUppercase)
        ));
        assert!(matches!(
            validate_password_strength("CSUPANAGYBETU1", &policy),
            Err(PasswordError::NoLowercase)
        ));
        assert!(matches!(
            validate_password_strength("NincsBenneSzam", &policy),
            Err(PasswordError::NoNumber)
        ));
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("Akademia2025").unwrap();

        assert!(verify_password("Akademia2025", &hash).unwrap());
        assert!(!verify_password("Akademia2026", &hash).unwrap());
    }
}
