//! # サービスエラー
//!
//! 全レイヤー境界を越える唯一のエラー表現 [`ServiceError`] を提供する。
//!
//! ## 設計方針
//!
//! - **安定したエラーコード**: クライアントが分岐に使用するため、
//!   リリース間で変更しない（`&'static str` 定数）
//! - **ステータスは構築時に固定**: コードから再計算しない
//! - **内部原因の分離**: `source` はログ専用で、ワイヤ形式には決して含めない
//! - **正規化はべき等**: 未分類のエラーは一度だけ `internal_error` に包まれ、
//!   以降の正規化では変化しない
//!
//! ## 使用例
//!
//! ```
//! use dodai_shared::error::ServiceError;
//!
//! let err = ServiceError::database_unavailable(anyhow::anyhow!("connection refused"));
//! assert_eq!(err.code(), "database_unavailable");
//! assert_eq!(err.status(), 503);
//! ```

use std::fmt;

use serde_json::Value;

/// 安定したエラーコード定数
///
/// クライアントがプログラム的に分岐するための識別子。追加は可能だが、
/// 既存の値は変更しない。
pub mod codes {
    pub const INTERNAL_ERROR: &str = "internal_error";
    pub const INVALID_JSON: &str = "invalid_json";
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const DATABASE_UNAVAILABLE: &str = "database_unavailable";
}

/// レイヤー境界を越える唯一のエラー型
///
/// リポジトリ・ユースケース・バリデーションの各層は失敗を `ServiceError`
/// として構築し、中間層は改変せずに伝播する。レスポンスエンベロープが
/// 最終的に消費し、`status` をそのままトランスポートステータスとして書き出す。
pub struct ServiceError {
    code:    &'static str,
    status:  u16,
    message: String,
    details: Option<Value>,
    source:  Option<anyhow::Error>,
}

/// オプションフィールドの設定
///
/// 省略可能なフィールドを明示的な構造体として渡す。
/// デフォルトはすべて `None`（details なし・source なし）。
#[derive(Default)]
pub struct ErrorOptions {
    /// 構造化された補足情報（例: フィールド名 → 違反内容のマップ）。
    /// ワイヤ形式に含まれるため、クライアントに見せてよい内容のみを入れる。
    pub details: Option<Value>,
    /// 内部診断用の元エラー。ログにのみ出力され、シリアライズされない。
    pub source: Option<anyhow::Error>,
}

impl ServiceError {
    /// 新しい `ServiceError` を作成する
    pub fn new(code: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::with_options(code, status, message, ErrorOptions::default())
    }

    /// オプションフィールド付きで `ServiceError` を作成する
    pub fn with_options(
        code: &'static str,
        status: u16,
        message: impl Into<String>,
        options: ErrorOptions,
    ) -> Self {
        Self {
            code,
            status,
            message: message.into(),
            details: options.details,
            source: options.source,
        }
    }

    /// 内部エラー（500 `internal_error`）
    ///
    /// 元の原因は `source` に保持され、ログにのみ出力される。
    pub fn internal(source: anyhow::Error) -> Self {
        Self::with_options(
            codes::INTERNAL_ERROR,
            500,
            "An internal server error occurred",
            ErrorOptions {
                source: Some(source),
                ..ErrorOptions::default()
            },
        )
    }

    /// JSON デコード失敗（400 `invalid_json`）
    ///
    /// 呼び出し元由来の詳細は一切持たせない。
    pub fn invalid_json() -> Self {
        Self::new(codes::INVALID_JSON, 400, "The JSON payload is invalid")
    }

    /// バリデーション失敗（400 `validation_error`）
    ///
    /// `details` にはフィールド名 → 違反内容のマップを渡す。
    pub fn validation(details: Value) -> Self {
        Self::with_options(
            codes::VALIDATION_ERROR,
            400,
            "Invalid request payload",
            ErrorOptions {
                details: Some(details),
                ..ErrorOptions::default()
            },
        )
    }

    /// データベース接続不可（503 `database_unavailable`）
    pub fn database_unavailable(source: anyhow::Error) -> Self {
        Self::with_options(
            codes::DATABASE_UNAVAILABLE,
            503,
            "Database is unavailable",
            ErrorOptions {
                source: Some(source),
                ..ErrorOptions::default()
            },
        )
    }

    /// 任意のエラーを `ServiceError` に正規化する
    ///
    /// すでに `ServiceError` であればそのまま返す。それ以外は 500 の
    /// `internal_error` に包み、元のエラーを `source` として保持する。
    /// 原因の文字列はクライアントに見えるフィールドには入れない。
    ///
    /// この関数は失敗せず、べき等である:
    /// `normalize(normalize(e))` と `normalize(e)` は同じ結果になる。
    pub fn normalize(err: anyhow::Error) -> Self {
        match err.downcast::<ServiceError>() {
            Ok(service_error) => service_error,
            Err(other) => Self::internal(other),
        }
    }

    /// エラーコードを取得する
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// トランスポートステータスコードを取得する
    pub fn status(&self) -> u16 {
        self.status
    }

    /// クライアントに見せてよいメッセージを取得する
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 構造化された補足情報を取得する
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// 内部診断用の元エラーを取得する（ログ専用）
    pub fn source_error(&self) -> Option<&anyhow::Error> {
        self.source.as_ref()
    }
}

// ログ向けの表示には source を含める。
// クライアント向けの射影（api_response::ApiError）には含めない。
impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {}", self.code, source),
            None => write!(f, "{}", self.code),
        }
    }
}

impl fmt::Debug for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceError")
            .field("code", &self.code)
            .field("status", &self.status)
            .field("message", &self.message)
            .field("details", &self.details)
            .field("source", &self.source)
            .finish()
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| -> &(dyn std::error::Error + 'static) { e.as_ref() })
    }
}

// `?` による境界での正規化。ハンドラやユースケースが anyhow::Error を
// 返す経路では、この変換が正規化を一度だけ適用する。
impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        Self::normalize(err)
    }
}
