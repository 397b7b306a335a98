//! # Dodai インフラ層
//!
//! データベース接続とリポジトリ実装を提供する。
//! ビジネスロジックは含まず、上位層（apps/api）から
//! トレイト経由で使用される。

pub mod db;
pub mod repository;

pub use db::DbConfig;
