//! # API レスポンスエンベロープ
//!
//! 全エンドポイント共通のレスポンス形式を提供する。
//!
//! ## ワイヤ形式
//!
//! 成功時:
//!
//! ```json
//! { "success": true, "message": "pong", "data": { "message": "pong" } }
//! ```
//!
//! 失敗時:
//!
//! ```json
//! { "success": false, "error": { "code": "invalid_json", "message": "..." } }
//! ```
//!
//! ページネーション付き成功時は `meta` が加わる。
//!
//! ## 不変条件
//!
//! - `data` と `error` は常にどちらか一方のみが存在する
//! - `success` は `error` が存在しないことと同値
//! - `error` には [`ServiceError`] の `code` / `message` / `details` のみを
//!   射影する（`status` と内部原因はワイヤ形式に含めない）
//!
//! axum への変換（`IntoResponse`）は各アプリの責務であり、
//! このクレートは純粋なデータ構造のみを提供する。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ServiceError;

/// 統一レスポンスエンベロープ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

/// [`ServiceError`] のクライアント向け射影
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code:    String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// ページネーションメタデータ
///
/// 一覧系エンドポイントが `meta` として添付する形式。
/// ページ計算のロジックは各ユースケースの責務で、ここは形式のみを定める。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page:        u32,
    pub size:        u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl ApiResponse {
    /// 成功レスポンスを作成する
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data:    Some(data),
            error:   None,
            meta:    None,
        }
    }

    /// 失敗レスポンスを作成する
    ///
    /// `status` と内部原因は射影に含めない。ステータスコードは呼び出し側が
    /// `err.status()` から取得してトランスポート層に書き出す。
    pub fn failure(err: &ServiceError) -> Self {
        Self {
            success: false,
            message: None,
            data:    None,
            error:   Some(ApiError {
                code:    err.code().to_string(),
                message: err.message().to_string(),
                details: err.details().cloned(),
            }),
            meta:    None,
        }
    }

    /// ページネーション付き成功レスポンスを作成する
    pub fn paginated(message: impl Into<String>, data: Value, meta: PaginationMeta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::success(message, data)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    /// data / error の排他とフラグの整合を確認する
    fn assert_envelope_invariant(response: &ApiResponse) {
        assert!(!(response.data.is_some() && response.error.is_some()));
        assert_eq!(response.success, response.error.is_none());
    }

    #[test]
    fn test_successが正しいjson形状になる() {
        let response = ApiResponse::success("pong", json!({"message": "pong"}));
        assert_envelope_invariant(&response);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "pong",
                "data": {"message": "pong"},
            })
        );
    }

    #[test]
    fn test_failureがcodeとmessageとdetailsのみを射影する() {
        let err = ServiceError::validation(json!({"name": ["必須です"]}));
        let response = ApiResponse::failure(&err);
        assert_envelope_invariant(&response);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "error": {
                    "code": "validation_error",
                    "message": "Invalid request payload",
                    "details": {"name": ["必須です"]},
                },
            })
        );
        // status と内部原因はワイヤ形式に存在しない
        assert!(value["error"].get("status").is_none());
        assert!(value["error"].get("source").is_none());
    }

    #[test]
    fn test_failureが依存エラーの原因を漏らさない() {
        let err = ServiceError::database_unavailable(anyhow::anyhow!("connection refused"));
        let response = ApiResponse::failure(&err);
        assert_envelope_invariant(&response);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["error"]["code"], "database_unavailable");
        assert!(!value.to_string().contains("connection refused"));
    }

    #[test]
    fn test_paginatedがmetaを含む() {
        let meta = PaginationMeta {
            page:        2,
            size:        20,
            total_items: 95,
            total_pages: 5,
        };
        let response = ApiResponse::paginated("一覧", json!([1, 2, 3]), meta);
        assert_envelope_invariant(&response);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value["meta"],
            json!({"page": 2, "size": 20, "total_items": 95, "total_pages": 5})
        );
        assert_eq!(value["data"], json!([1, 2, 3]));
    }

    #[test]
    fn test_deserializeでjsonからオブジェクトに変換できる() {
        let json_str = r#"{"success": true, "message": "pong", "data": {"message": "pong"}}"#;
        let response: ApiResponse = serde_json::from_str(json_str).unwrap();

        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("pong"));
        assert_eq!(response.data, Some(json!({"message": "pong"})));
        assert!(response.error.is_none());
    }
}
