//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # Fail-fast 設計
//! - store が指定されていなければ build() がエラーを返す
//! - 接続文字列から開く場合、開けなければ起動を中断する

use std::sync::Arc;

use crate::app::{Access, Workflow};
use crate::domain::{AdminCredentials, StoreError};
use crate::impls::{Argon2SecretHasher, StoreUrl, Stores};
use crate::ports::{Clock, IdGenerator, SystemClock, UlidGenerator};

/// Settings fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreUrl,
    pub port: u16,
    pub admin: AdminCredentials,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreUrl::Memory,
            port: 5000,
            admin: AdminCredentials::default(),
        }
    }
}

/// AppBuilder はアプリケーションを構築
///
/// ```ignore
/// let app = AppBuilder::new()
///     .stores(Stores::in_memory())
///     .admin(AdminCredentials::new("admin", "admin123"))
///     .build()?;
/// ```
pub struct AppBuilder {
    stores: Option<Stores>,
    clock: Arc<dyn Clock>,
    admin: AdminCredentials,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no store configured; call stores() or use from_config()")]
    MissingStores,

    #[error("failed to open store: {0}")]
    Store(#[from] StoreError),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            stores: None,
            clock: Arc::new(SystemClock),
            admin: AdminCredentials::default(),
        }
    }

    /// Open the configured store and carry over the admin pair.
    pub async fn from_config(config: &AppConfig) -> Result<Self, BuildError> {
        let stores = Stores::open(&config.store).await?;
        tracing::info!(store = %config.store, "Store opened");
        Ok(Self::new().stores(stores).admin(config.admin.clone()))
    }

    pub fn stores(mut self, stores: Stores) -> Self {
        self.stores = Some(stores);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn admin(mut self, admin: AdminCredentials) -> Self {
        self.admin = admin;
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let stores = self.stores.ok_or(BuildError::MissingStores)?;
        // Ids follow the configured clock.
        let ids: Arc<dyn IdGenerator> = Arc::new(UlidGenerator::new(ClockRef(self.clock.clone())));

        Ok(App {
            access: Access::new(
                stores.accounts,
                Arc::new(Argon2SecretHasher::new()),
                ids.clone(),
                self.admin,
            ),
            workflow: Workflow::new(stores.applications, self.clock, ids),
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Lets a shared `dyn Clock` drive a `UlidGenerator`.
struct ClockRef(Arc<dyn Clock>);

impl Clock for ClockRef {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.0.now()
    }
}

/// App は access layer と workflow engine をまとめたもの
pub struct App {
    pub access: Access,
    pub workflow: Workflow,
}
