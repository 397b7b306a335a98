//! # ユースケース層
//!
//! ビジネスロジックを実装する。リポジトリにはトレイト経由でのみ依存し、
//! 失敗は分類済みの [`dodai_shared::ServiceError`] として上位層へ返す。

pub mod health;

pub use health::{HealthUseCase, HealthUseCaseImpl, PingStatus};
