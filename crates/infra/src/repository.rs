//! # リポジトリ実装
//!
//! 永続化層へのアクセスをトレイトとして抽象化し、PostgreSQL 実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: 上位層はトレイトにのみ依存する
//! - **テスタビリティ**: トレイト経由でスタブ実装に差し替え可能

pub mod health_repository;

pub use health_repository::{HealthRepository, PostgresHealthRepository};
