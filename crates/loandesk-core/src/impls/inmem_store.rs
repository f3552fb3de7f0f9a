//! InMemoryStore - 開発用の document store
//!
//! - tokio::sync::Mutex で 1 document 単位の書き込みを atomic にする
//! - プロセス終了で内容は消える（`memory://`）

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::document::StoreDocument;
use crate::domain::{
    Account, AccountId, ApplicationId, LoanApplication, LoanStatus, StoreError,
};
use crate::ports::{AccountStore, ApplicationStore};

/// InMemoryStore は AccountStore と ApplicationStore の両方を実装する
///
/// Clone は同じ document を共有します。
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreDocument>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn insert(&self, account: Account) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.insert_account(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.find_account_by_email(email).cloned())
    }
}

#[async_trait]
impl ApplicationStore for InMemoryStore {
    async fn insert(&self, application: LoanApplication) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.insert_application(application)
    }

    async fn list_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<LoanApplication>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.applications_for(account_id))
    }

    async fn list_all(&self) -> Result<Vec<LoanApplication>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.applications.clone())
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        status: LoanStatus,
    ) -> Result<Option<LoanApplication>, StoreError> {
        let mut state = self.state.lock().await;
        Ok(state.update_status(id, status))
    }
}
