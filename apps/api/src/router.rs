//! # ルーター構築
//!
//! 組み立て済みのハンドラ State からルートテーブルを構築する。

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handler::{health_check, ping},
    registry::Handlers,
};

/// リクエスト処理全体の上限時間
///
/// hyper は `axum::serve` 経由ではソケットの read/write タイムアウトを
/// 公開しないため、リクエスト単位のタイムアウトで接続資源を制限する。
/// アイドル keep-alive 接続のタイムアウトも同様に公開されないため
/// ここでは設定せず、アイドル接続は graceful shutdown 時に hyper が閉じる。
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// ルーターを構築する
pub fn build_router(handlers: &Handlers) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ping", post(ping))
        .with_state(Arc::clone(&handlers.health))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}
