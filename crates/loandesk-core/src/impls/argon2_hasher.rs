//! Argon2SecretHasher - argon2id によるパスワードハッシュ
//!
//! 保存形式は PHC 文字列: `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`
//!
//! コストは argon2 crate の既定値（m = 19 MiB, t = 2, p = 1）です。
//! パラメータは文字列に含まれるので、既定値を変えても古いハッシュは照合できます。

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::domain::LoanError;
use crate::ports::SecretHasher;

#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2SecretHasher;

impl Argon2SecretHasher {
    pub fn new() -> Self {
        Self
    }
}

impl SecretHasher for Argon2SecretHasher {
    fn hash(&self, secret: &str) -> Result<String, LoanError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| LoanError::Internal(format!("failed to hash secret: {err}")))
    }

    fn verify(&self, secret: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return false;
        };
        // Constant-time comparison happens inside verify_password.
        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn hash_is_a_phc_string_without_plaintext() {
        let hasher = Argon2SecretHasher::new();
        let stored = hasher.hash("hunter2").unwrap();
        assert_ne!(stored, "hunter2");
        assert!(!stored.contains("hunter2"));
        assert!(stored.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = Argon2SecretHasher::new();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn correct_secret_verifies() {
        let hasher = Argon2SecretHasher::new();
        let stored = hasher.hash("correct horse").unwrap();
        assert!(hasher.verify("correct horse", &stored));
    }

    #[rstest]
    #[case::wrong("wrong horse")]
    #[case::empty("")]
    #[case::trailing_space("correct horse ")]
    #[case::case_changed("Correct horse")]
    fn other_secrets_fail(#[case] attempt: &str) {
        let hasher = Argon2SecretHasher::new();
        let stored = hasher.hash("correct horse").unwrap();
        assert!(!hasher.verify(attempt, &stored));
    }

    #[rstest]
    #[case::plaintext("correct horse")]
    #[case::empty("")]
    #[case::legacy_sha256("sha256$00$00")]
    #[case::truncated("$argon2id$v=19$m=19456,t=2,p=1$")]
    fn malformed_stored_hash_fails(#[case] stored: &str) {
        let hasher = Argon2SecretHasher::new();
        assert!(!hasher.verify("correct horse", stored));
    }
}
