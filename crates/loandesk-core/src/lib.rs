//! loandesk-core
//!
//! Loan-application intake and review: applicants register and submit loan
//! requests, an administrator lists every application, overwrites statuses
//! and reads aggregate statistics.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, account, application, status, stats, errors）
//! - **ports**: 抽象化レイヤー（AccountStore, ApplicationStore, SecretHasher, Clock, IdGenerator）
//! - **impls**: 実装（InMemoryStore, JsonFileStore, Argon2SecretHasher）
//! - **app**: アプリケーションロジック（Access, Workflow, AppBuilder）
//! - **api**: 要求面（Request/Response, Dispatcher, JSON-lines Server）
//! - **present**: テキスト表示

pub mod api;
pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod present;
