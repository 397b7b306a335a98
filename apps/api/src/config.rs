//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//! 読み込み失敗は [`ConfigError`] として返し、`main` が診断を出力して
//! 非ゼロ終了する。

use std::{env, str::FromStr, time::Duration};

use dodai_infra::DbConfig;
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("環境変数 {0} が設定されていません")]
    Missing(&'static str),

    #[error("環境変数 {name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続設定
    pub database: DbConfig,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    ///
    /// | 変数名 | 必須 | デフォルト |
    /// |--------|------|-----------|
    /// | `APP_HOST` | No | `0.0.0.0` |
    /// | `APP_PORT` | No | `8080` |
    /// | `DATABASE_URL` | **Yes** | — |
    /// | `DB_MAX_CONNECTIONS` | No | `25` |
    /// | `DB_MIN_CONNECTIONS` | No | `5` |
    /// | `DB_MAX_LIFETIME_SECS` | No | `300` |
    /// | `DB_IDLE_TIMEOUT_SECS` | No | `60` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = overridden("APP_PORT")?.unwrap_or(8080);

        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let mut database = DbConfig::new(url);
        if let Some(max) = overridden("DB_MAX_CONNECTIONS")? {
            database.max_connections = max;
        }
        if let Some(min) = overridden("DB_MIN_CONNECTIONS")? {
            database.min_connections = min;
        }
        if let Some(secs) = overridden("DB_MAX_LIFETIME_SECS")? {
            database.max_lifetime = Duration::from_secs(secs);
        }
        if let Some(secs) = overridden("DB_IDLE_TIMEOUT_SECS")? {
            database.idle_timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            host,
            port,
            database,
        })
    }
}

/// 任意指定の環境変数をパースする
///
/// 未設定なら `None`、設定済みでパース不能なら [`ConfigError::Invalid`]。
fn overridden<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(ConfigError::Invalid { name, value: raw }),
        },
        Err(_) => Ok(None),
    }
}
