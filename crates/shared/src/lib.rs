//! # Dodai 共有ユーティリティ
//!
//! プロジェクト全体で使用される共通の契約を提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（infra, api）から依存される
//! - ビジネスロジックを含まない純粋なデータ構造とユーティリティのみを配置
//! - axum などのトランスポート層には依存しない（`IntoResponse` 変換は
//!   各アプリの責務）

pub mod api_response;
pub mod error;
pub mod observability;

pub use api_response::{ApiError, ApiResponse, PaginationMeta};
pub use error::{ErrorOptions, ServiceError};
