//! IdGenerator port - ID 生成の抽象化
//!
//! store ではなくアプリ層で ID を採番します。
//! テスト容易性のために trait として抽象化しています。

use crate::domain::ids::{AccountId, ApplicationId};
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は ID を生成
///
/// `Send + Sync` を要求（複数の request task から使える）
pub trait IdGenerator: Send + Sync {
    fn generate_account_id(&self) -> AccountId;

    fn generate_application_id(&self) -> ApplicationId;
}

/// UlidGenerator は Clock の時刻 + ランダム部分で ULID を生成
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_account_id(&self) -> AccountId {
        AccountId::from(self.next_ulid())
    }

    fn generate_application_id(&self) -> ApplicationId {
        ApplicationId::from(self.next_ulid())
    }
}
