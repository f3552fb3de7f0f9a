//! AccountStore port - 登録済みアカウントの正本
//!
//! 実装:
//! - InMemoryStore（`memory://`、開発・テスト用）
//! - JsonFileStore（`file://` 接続文字列）

use async_trait::async_trait;

use crate::domain::{Account, StoreError};

/// AccountStore は Account を保持する document store
///
/// # 設計原則
/// - email は一意。重複は `StoreError::Duplicate` で拒否する
/// - 存在チェックと insert は同じクリティカルセクション内で行う
/// - Account は作成後に変更・削除されない
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert(&self, account: Account) -> Result<(), StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
}
