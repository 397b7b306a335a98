//! # ヘルスチェックハンドラ
//!
//! サーバーの稼働状態を確認するためのエンドポイント。
//!
//! - `POST /ping` — 死活確認。`{"include_db": bool}` を受け取り、
//!   真の場合はデータベースへの到達性も確認する
//! - `GET /health` — Liveness Check（プロセスが応答することのみを確認）

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dodai_shared::{ApiResponse, ServiceError};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::AppError, usecase::HealthUseCase, validation};

/// ヘルスチェックハンドラの State
pub struct HealthState {
    pub usecase: Arc<dyn HealthUseCase>,
}

/// `POST /ping` のリクエストボディ
#[derive(Debug, Deserialize, Validate)]
pub struct PingRequest {
    /// データベースへの到達性も確認するか（省略時は false）
    #[serde(default)]
    pub include_db: bool,
}

/// `POST /ping` のレスポンスデータ
#[derive(Debug, Serialize)]
struct PingResponse {
    message: String,
}

/// 死活確認エンドポイント
///
/// ボディのデコード失敗は `invalid_json`（400）、ルール違反は
/// `validation_error`（400）、データベース到達不能は
/// `database_unavailable`（503）として失敗エンベロープを返す。
#[tracing::instrument(skip_all)]
pub async fn ping(
    State(state): State<Arc<HealthState>>,
    payload: Result<Json<PingRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!(error = %e, "リクエストのデコードに失敗しました");
        ServiceError::invalid_json()
    })?;

    validation::validate(&request)?;

    let status = state.usecase.ping(request.include_db).await?;

    let data = serde_json::to_value(PingResponse {
        message: status.message,
    })
    .map_err(|e| ServiceError::internal(e.into()))?;

    Ok((StatusCode::OK, Json(ApiResponse::success("pong", data))).into_response())
}

/// Liveness Check エンドポイント
///
/// 依存サービスには触れず、プロセスが応答することのみを確認する。
pub async fn health_check() -> Response {
    let data = serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    });

    (
        StatusCode::OK,
        Json(ApiResponse::success("healthy", data)),
    )
        .into_response()
}
