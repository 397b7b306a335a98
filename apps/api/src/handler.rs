//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置し、この親モジュールで re-export する
//! - ハンドラは薄く保ち、入力のデコード・検証とエンベロープへの詰め替えのみを
//!   担当する。ビジネスロジックはユースケース層に委譲する

pub mod health;

pub use health::{HealthState, health_check, ping};
