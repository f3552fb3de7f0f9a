//! SecretHasher port - パスワードの一方向ハッシュ

use crate::domain::LoanError;

/// SecretHasher は salt 付きの一方向ハッシュを提供
///
/// `hash` の出力は salt とコストを含む自己完結した文字列で、`verify` は
/// それだけで照合できること。どちらも CPU を使うので、async 側からは
/// `spawn_blocking` 経由で呼ぶ。
pub trait SecretHasher: Send + Sync {
    fn hash(&self, secret: &str) -> Result<String, LoanError>;

    /// A malformed stored hash simply fails to verify.
    fn verify(&self, secret: &str, stored: &str) -> bool;
}
