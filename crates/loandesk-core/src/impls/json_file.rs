//! JsonFileStore - 単一 JSON ファイルに保存する document store
//!
//! `file://<path>` 接続文字列で選ばれます。
//!
//! # 実装
//! - 起動時にファイル全体を読み込む（なければ空で作成）
//! - 書き込みのたびに一時ファイルへ書き出して rename
//! - 書き込みはロックを保持したまま行うので、ファイルは常にどこかの時点の状態

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::document::StoreDocument;
use crate::domain::{
    Account, AccountId, ApplicationId, LoanApplication, LoanStatus, StoreError,
};
use crate::ports::{AccountStore, ApplicationStore};

#[derive(Clone)]
pub struct JsonFileStore {
    path: Arc<PathBuf>,
    state: Arc<Mutex<StoreDocument>>,
}

impl JsonFileStore {
    /// Load the document at `path`, creating an empty one if it does not exist.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let document = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => StoreDocument::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let document = StoreDocument::default();
                write_document(&path, &document).await?;
                document
            }
            Err(err) => return Err(err.into()),
        };

        tracing::debug!(
            path = %path.display(),
            accounts = document.accounts.len(),
            applications = document.applications.len(),
            "Opened JSON store"
        );

        Ok(Self {
            path: Arc::new(path),
            state: Arc::new(Mutex::new(document)),
        })
    }
}

async fn write_document(path: &Path, document: &StoreDocument) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(document)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl AccountStore for JsonFileStore {
    async fn insert(&self, account: Account) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        next.insert_account(account)?;
        write_document(&self.path, &next).await?;
        *state = next;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.find_account_by_email(email).cloned())
    }
}

#[async_trait]
impl ApplicationStore for JsonFileStore {
    async fn insert(&self, application: LoanApplication) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        next.insert_application(application)?;
        write_document(&self.path, &next).await?;
        *state = next;
        Ok(())
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
        let mut next = state.clone();
        let Some(updated) = next.update_status(id, status) else {
            return Ok(None);
        };
        write_document(&self.path, &next).await?;
        *state = next;
        Ok(Some(updated))
    }
}
