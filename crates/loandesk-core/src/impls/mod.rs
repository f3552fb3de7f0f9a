//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryStore**: `memory://`（開発・テスト用）
//! - **JsonFileStore**: `file://<path>`（単一ファイルの document store）
//! - **Argon2SecretHasher**: argon2id（PHC 文字列）

pub mod argon2_hasher;
pub mod document;
pub mod inmem_store;
pub mod json_file;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::StoreError;
use crate::ports::{AccountStore, ApplicationStore};

pub use self::inmem_store::InMemoryStore;
pub use self::json_file::JsonFileStore;
pub use self::argon2_hasher::Argon2SecretHasher;

/// Parsed store connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUrl {
    Memory,
    File(PathBuf),
}

impl FromStr for StoreUrl {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "memory" | "memory://" => Ok(StoreUrl::Memory),
            other => match other.strip_prefix("file://") {
                Some(path) if !path.is_empty() => Ok(StoreUrl::File(PathBuf::from(path))),
                _ => Err(StoreError::Unavailable(format!(
                    "unsupported store connection string {other:?} (expected memory:// or file://<path>)"
                ))),
            },
        }
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreUrl::Memory => f.write_str("memory://"),
            StoreUrl::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}

/// Both store ports, usually backed by the same object.
#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountStore>,
    pub applications: Arc<dyn ApplicationStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            accounts: Arc::new(store.clone()),
            applications: Arc::new(store),
        }
    }

    /// Open the store named by `url`. Failing here should abort startup.
    pub async fn open(url: &StoreUrl) -> Result<Self, StoreError> {
        match url {
            StoreUrl::Memory => Ok(Self::in_memory()),
            StoreUrl::File(path) => {
                let store = JsonFileStore::open(path).await?;
                Ok(Self {
                    accounts: Arc::new(store.clone()),
                    applications: Arc::new(store),
                })
            }
        }
    }
}
