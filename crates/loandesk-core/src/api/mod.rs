//! Api - transport に依存しない要求面と JSON-lines サーバー
//!
//! - **Request / Response**: 操作ごとの入力と、ステータスコード付きの出力
//! - **Dispatcher**: Request を Access / Workflow に振り分け、エラーを Response に変換
//! - **Server**: 1 行 1 リクエストの TCP サーバー

pub mod dispatch;
pub mod request;
pub mod server;

pub use self::dispatch::Dispatcher;
pub use self::request::{Request, Response};
pub use self::server::Server;
