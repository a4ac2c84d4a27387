use crate::config::HashingConfig;
use crate::error::{Result, StudyError};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use tracing::warn;

/// Argon2id password hashing with a random salt per hash.
///
/// Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so
/// each one records the parameters it was made with.
pub struct Passwords {
    argon2: Argon2<'static>,
}

impl Passwords {
    pub fn new(config: &HashingConfig) -> Result<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| StudyError::Config(format!("Invalid password hashing parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| StudyError::PasswordHash(e.to_string()))
    }

    /// False for a wrong password and for a stored value that is not a hash.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored password is not a valid hash");
                return false;
            }
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passwords() -> Passwords {
        Passwords::new(&HashingConfig::fast()).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let pw = passwords();
        let hash = pw.hash("s3cret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(pw.verify("s3cret", &hash));
        assert!(!pw.verify("S3cret", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let pw = passwords();
        assert_ne!(pw.hash("same").unwrap(), pw.hash("same").unwrap());
    }

    #[test]
    fn test_plaintext_or_legacy_values_never_verify() {
        let pw = passwords();
        assert!(!pw.verify("hunter2", "hunter2"));
        assert!(!pw.verify("abc", "96354"));
    }

    #[test]
    fn test_verify_uses_parameters_from_hash() {
        let strong = Passwords::new(&HashingConfig {
            memory_kib: 64,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        let hash = strong.hash("pw").unwrap();
        assert!(passwords().verify("pw", &hash));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let result = Passwords::new(&HashingConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        });
        assert!(matches!(result, Err(StudyError::Config(_))));
    }
}
