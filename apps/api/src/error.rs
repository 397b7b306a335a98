//! # エラーレスポンス変換
//!
//! [`ServiceError`] を HTTP レスポンスに変換する。
//!
//! ## 設計方針
//!
//! - トランスポートステータスは常に `ServiceError::status` をそのまま使用し、
//!   コードから別表で再計算しない
//! - 原因のログ出力は検知地点（ユースケース・リポジトリ）の責務であり、
//!   ここでは重複して出力しない
//! - エンベロープ自体のシリアライズに失敗した場合は `axum::Json` が
//!   プレーンテキストの 500 にフォールバックする

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dodai_shared::{ApiResponse, ServiceError};

/// ハンドラ戻り値用のエラーラッパー
///
/// orphan rule により外部クレートの [`ServiceError`] へ直接 `IntoResponse` を
/// 実装できないため、アプリ側で newtype として包む。
/// `?` 演算子は `From` 実装経由でこの型へ変換する。
pub struct AppError(pub ServiceError);

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

// 未分類エラーはこの変換で一度だけ正規化される
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(ServiceError::normalize(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(ApiResponse::failure(&self.0))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ステータスはservice_errorのstatusをそのまま使う() {
        let response = AppError(ServiceError::new("teapot", 418, "ティーポット")).into_response();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn test_ボディがエンベロープの失敗形式になる() {
        let response = AppError(ServiceError::invalid_json()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let value = body_json(response).await;
        assert_eq!(
            value,
            json!({
                "success": false,
                "error": {
                    "code": "invalid_json",
                    "message": "The JSON payload is invalid",
                },
            })
        );
    }

    #[tokio::test]
    async fn test_anyhowエラーがinternal_errorに正規化される() {
        let response = AppError::from(anyhow::anyhow!("予期しない失敗")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let value = body_json(response).await;
        let envelope: ApiResponse = serde_json::from_value(value.clone()).unwrap();
        assert!(!envelope.success);
        assert_eq!(value["error"]["code"], "internal_error");
        assert!(!value.to_string().contains("予期しない失敗"));
    }
}
