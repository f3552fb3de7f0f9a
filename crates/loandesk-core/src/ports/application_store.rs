//! ApplicationStore port - ローン申請の正本
//!
//! ApplicationStore がすべての LoanApplication を所有します。
//! Workflow は 1 操作の間だけコピーを持ちます。

use async_trait::async_trait;

use crate::domain::{AccountId, ApplicationId, LoanApplication, LoanStatus, StoreError};

/// ApplicationStore は LoanApplication を保持する document store
///
/// # 設計原則
/// - 1 document の書き込みは atomic
/// - document をまたぐトランザクションはない
/// - `update_status` は last-write-wins（楽観ロックなし）
/// - 列挙順は store の挿入順（契約上の保証ではない）
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert(&self, application: LoanApplication) -> Result<(), StoreError>;

    async fn list_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<LoanApplication>, StoreError>;

    async fn list_all(&self) -> Result<Vec<LoanApplication>, StoreError>;

    /// Overwrite the status and return the updated record, or `None` when
    /// no application has that id (nothing is written in that case).
    async fn update_status(
        &self,
        id: ApplicationId,
        status: LoanStatus,
    ) -> Result<Option<LoanApplication>, StoreError>;
}
