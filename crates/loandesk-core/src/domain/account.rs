//! Registered applicant accounts.

use serde::{Deserialize, Serialize};

use super::ids::AccountId;

/// A registered applicant.
///
/// `secret_hash` is the output of a `SecretHasher`; the plaintext secret
/// is never kept after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub full_name: String,
    pub email: String,
    pub secret_hash: String,
}

/// Result of a successful user login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    #[serde(rename = "userId")]
    pub account_id: AccountId,
    pub full_name: String,
}

impl From<&Account> for AuthenticatedUser {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            full_name: account.full_name.clone(),
        }
    }
}

/// Fixed administrator credential pair.
///
/// Supplied once at process start; never stored alongside accounts.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new("admin", "admin123")
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_match_is_exact() {
        let admin = AdminCredentials::new("admin", "s3cret");
        assert!(admin.matches("admin", "s3cret"));
        assert!(!admin.matches("Admin", "s3cret"));
        assert!(!admin.matches("admin", "s3cret "));
        assert!(!admin.matches("", ""));
    }

    #[test]
    fn admin_debug_hides_password() {
        let admin = AdminCredentials::new("admin", "s3cret");
        let rendered = format!("{:?}", admin);
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("s3cret"));
    }
}
