//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! 永続化・時刻・ID 採番・ハッシュは外部の協力者として扱い、
//! app 層はこれらの trait だけに依存します。

pub mod account_store;
pub mod application_store;
pub mod clock;
pub mod id_generator;
pub mod secret_hasher;

pub use self::account_store::AccountStore;
pub use self::application_store::ApplicationStore;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::secret_hasher::SecretHasher;
