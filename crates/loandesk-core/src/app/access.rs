//! Access - 登録とログイン
//!
//! workflow からは独立しています。ユーザーは AccountStore + SecretHasher、
//! 管理者は固定の AdminCredentials で認証します。

use std::sync::Arc;

use crate::domain::{Account, AccountId, AdminCredentials, AuthenticatedUser, LoanError};
use crate::ports::{AccountStore, IdGenerator, SecretHasher};

pub struct Access {
    accounts: Arc<dyn AccountStore>,
    hasher: Arc<dyn SecretHasher>,
    ids: Arc<dyn IdGenerator>,
    admin: AdminCredentials,
}

impl Access {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        hasher: Arc<dyn SecretHasher>,
        ids: Arc<dyn IdGenerator>,
        admin: AdminCredentials,
    ) -> Self {
        Self {
            accounts,
            hasher,
            ids,
            admin,
        }
    }

    /// Create an account. Not idempotent: the same email twice is rejected.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        secret: &str,
    ) -> Result<AccountId, LoanError> {
        let mut missing = Vec::new();
        if full_name.trim().is_empty() {
            missing.push("fullName");
        }
        if email.trim().is_empty() {
            missing.push("email");
        }
        if secret.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(LoanError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let hasher = self.hasher.clone();
        let owned_secret = secret.to_owned();
        let secret_hash = tokio::task::spawn_blocking(move || hasher.hash(&owned_secret))
            .await
            .map_err(|err| LoanError::Internal(format!("hashing task failed: {err}")))??;

        let account = Account {
            id: self.ids.generate_account_id(),
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            secret_hash,
        };
        let id = account.id;
        self.accounts.insert(account).await?;

        tracing::info!(account_id = %id, "Registered account");
        Ok(id)
    }

    /// Unknown email and wrong secret are indistinguishable to the caller.
    pub async fn authenticate_user(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<AuthenticatedUser, LoanError> {
        let Some(account) = self.accounts.find_by_email(email.trim()).await? else {
            tracing::debug!("User authentication failed");
            return Err(LoanError::Unauthorized);
        };

        let hasher = self.hasher.clone();
        let owned_secret = secret.to_owned();
        let stored = account.secret_hash.clone();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&owned_secret, &stored))
            .await
            .map_err(|err| LoanError::Internal(format!("hashing task failed: {err}")))?;

        if verified {
            tracing::debug!(account_id = %account.id, "User authenticated");
            Ok(AuthenticatedUser::from(&account))
        } else {
            tracing::debug!("User authentication failed");
            Err(LoanError::Unauthorized)
        }
    }

    pub fn authenticate_admin(&self, username: &str, secret: &str) -> Result<(), LoanError> {
        if self.admin.matches(username, secret) {
            Ok(())
        } else {
            tracing::warn!("Administrator authentication failed");
            Err(LoanError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{Argon2SecretHasher, InMemoryStore};
    use crate::ports::{SystemClock, UlidGenerator};

    fn access_with(store: InMemoryStore) -> Access {
        Access::new(
            Arc::new(store),
            Arc::new(Argon2SecretHasher::new()),
            Arc::new(UlidGenerator::new(SystemClock)),
            AdminCredentials::new("root", "toor"),
        )
    }

    #[tokio::test]
    async fn register_stores_only_the_hash() {
        let store = InMemoryStore::new();
        let access = access_with(store.clone());

        let id = access
            .register("Ada Lovelace", "ada@example.com", "engine")
            .await
            .unwrap();

        let stored = store.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_ne!(stored.secret_hash, "engine");
        assert!(!stored.secret_hash.contains("engine"));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_validation_error() {
        let access = access_with(InMemoryStore::new());
        access.register("A", "dup@example.com", "one").await.unwrap();

        let err = access
            .register("B", "dup@example.com", "two")
            .await
            .unwrap_err();
        assert!(matches!(err, LoanError::Validation(_)));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let access = access_with(InMemoryStore::new());
        let err = access.register("  ", "", "pw").await.unwrap_err();
        match err {
            LoanError::Validation(msg) => {
                assert!(msg.contains("fullName"));
                assert!(msg.contains("email"));
                assert!(!msg.contains("password"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_with_correct_secret() {
        let access = access_with(InMemoryStore::new());
        let id = access
            .register("Ada Lovelace", "ada@example.com", "engine")
            .await
            .unwrap();

        let user = access
            .authenticate_user("ada@example.com", "engine")
            .await
            .unwrap();
        assert_eq!(user.account_id, id);
        assert_eq!(user.full_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn wrong_secret_and_unknown_email_look_the_same() {
        let access = access_with(InMemoryStore::new());
        access
            .register("Ada Lovelace", "ada@example.com", "engine")
            .await
            .unwrap();

        let wrong = access
            .authenticate_user("ada@example.com", "Engine")
            .await
            .unwrap_err();
        let unknown = access
            .authenticate_user("bob@example.com", "engine")
            .await
            .unwrap_err();

        assert!(matches!(wrong, LoanError::Unauthorized));
        assert!(matches!(unknown, LoanError::Unauthorized));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn admin_uses_configured_pair() {
        let access = access_with(InMemoryStore::new());
        assert!(access.authenticate_admin("root", "toor").is_ok());
        assert!(matches!(
            access.authenticate_admin("admin", "admin123"),
            Err(LoanError::Unauthorized)
        ));
    }
}
