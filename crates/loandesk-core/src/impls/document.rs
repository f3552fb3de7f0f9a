//! StoreDocument - store 実装が共有する document 状態
//!
//! InMemoryStore と JsonFileStore はどちらもこの構造体を Mutex で包みます。
//! JsonFileStore はさらに書き込みのたびにこれを丸ごとファイルへ書き出します。

use serde::{Deserialize, Serialize};

use crate::domain::{
    Account, AccountId, ApplicationId, LoanApplication, LoanStatus, StoreError,
};

/// Insertion-ordered collections of every record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub applications: Vec<LoanApplication>,
}

impl StoreDocument {
    /// Existence check and insert happen under the caller's lock.
    pub fn insert_account(&mut self, account: Account) -> Result<(), StoreError> {
        if self.find_account_by_email(&account.email).is_some() {
            return Err(StoreError::Duplicate {
                field: "email",
                value: account.email,
            });
        }
        self.accounts.push(account);
        Ok(())
    }

    pub fn find_account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.email == email)
    }

    pub fn insert_application(&mut self, application: LoanApplication) -> Result<(), StoreError> {
        if self.get_application(application.id).is_some() {
            return Err(StoreError::Duplicate {
                field: "application id",
                value: application.id.to_string(),
            });
        }
        self.applications.push(application);
        Ok(())
    }

    fn get_application(&self, id: ApplicationId) -> Option<&LoanApplication> {
        self.applications.iter().find(|application| application.id == id)
    }

    pub fn applications_for(&self, account_id: AccountId) -> Vec<LoanApplication> {
        self.applications
            .iter()
            .filter(|application| application.account_id == account_id)
            .cloned()
            .collect()
    }

    pub fn update_status(
        &mut self,
        id: ApplicationId,
        status: LoanStatus,
    ) -> Option<LoanApplication> {
        let application = self
            .applications
            .iter_mut()
            .find(|application| application.id == id)?;
        application.status = status;
        Some(application.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ulid::Ulid;

    fn account(email: &str) -> Account {
        Account {
            id: AccountId::from_ulid(Ulid::new()),
            full_name: "Test".to_string(),
            email: email.to_string(),
            secret_hash: "hash".to_string(),
        }
    }

    fn application(account_id: AccountId) -> LoanApplication {
        LoanApplication {
            id: ApplicationId::from_ulid(Ulid::new()),
            account_id,
            full_name: "Test".to_string(),
            amount: 100.0,
            tenure: 3,
            reason: "r".to_string(),
            employment_status: "e".to_string(),
            employment_address: "a".to_string(),
            status: LoanStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let mut doc = StoreDocument::default();
        doc.insert_account(account("a@example.com")).unwrap();
        let err = doc.insert_account(account("a@example.com")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { field: "email", .. }));
        assert_eq!(doc.accounts.len(), 1);
    }

    #[test]
    fn update_status_on_missing_id_changes_nothing() {
        let mut doc = StoreDocument::default();
        let owner = AccountId::from_ulid(Ulid::new());
        doc.insert_application(application(owner)).unwrap();
        let before = doc.applications.clone();

        let missing = ApplicationId::from_ulid(Ulid::new());
        assert!(doc.update_status(missing, LoanStatus::Approved).is_none());
        assert_eq!(doc.applications, before);
    }

    #[test]
    fn applications_for_filters_by_owner() {
        let mut doc = StoreDocument::default();
        let a = AccountId::from_ulid(Ulid::new());
        let b = AccountId::from_ulid(Ulid::new());
        doc.insert_application(application(a)).unwrap();
        doc.insert_application(application(b)).unwrap();
        doc.insert_application(application(a)).unwrap();

        let mine = doc.applications_for(a);
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|app| app.account_id == a));
    }
}
