//! App - アプリケーション層
//!
//! ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **Access**: 登録・ユーザー認証・管理者認証
//! - **Workflow**: 申請の受付・一覧・ステータス上書き・統計
//! - **AppBuilder**: 設定からのワイヤリング

pub mod access;
pub mod builder;
pub mod workflow;

pub use self::access::Access;
pub use self::builder::{App, AppBuilder, AppConfig, BuildError};
pub use self::workflow::Workflow;
