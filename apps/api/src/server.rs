//! # サーバーライフサイクル管理
//!
//! リスナーの起動から graceful shutdown までを管理する。
//!
//! ## 状態遷移
//!
//! ```text
//! Initializing → Serving → Draining → Stopped
//! ```
//!
//! - **Serving**: リスナーが接続を受け付け、メインタスクは終了シグナル
//!   （SIGINT / SIGTERM）を待つ
//! - **Draining**: シグナル受信後、新規接続の受け付けを停止し、処理中の
//!   リクエストの完了をドレイン期間内で待つ
//! - **Stopped**: 全リクエスト完了（クリーン終了）またはドレイン期間超過
//!   （[`ServeError::DrainTimeout`]、呼び出し元が非ゼロ終了する）

use std::{
    future::{Future, IntoFuture as _},
    time::Duration,
};

use axum::Router;
use thiserror::Error;
use tokio::{net::TcpListener, sync::oneshot};

/// 処理中リクエストの完了を待つドレイン期間
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// サーバー実行エラー
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("サーバー実行中に I/O エラーが発生しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("ドレイン期間内に処理中のリクエストが完了しませんでした")]
    DrainTimeout,
}

/// サーバーを起動し、終了シグナルを受けて graceful shutdown する
///
/// SIGINT / SIGTERM の受信で Draining に遷移する。
pub async fn run(listener: TcpListener, app: Router, drain: Duration) -> Result<(), ServeError> {
    run_with_shutdown(listener, app, drain, terminate_signal()).await
}

/// 任意のシャットダウントリガーでサーバーを実行する
///
/// テストからはシグナルの代わりに完了可能な future を渡す。
pub async fn run_with_shutdown(
    listener: TcpListener,
    app: Router,
    drain: Duration,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServeError> {
    // Draining への遷移を run 側で観測するための通知
    let (drain_tx, drain_rx) = oneshot::channel::<()>();

    let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown.await;
        tracing::info!("終了シグナルを受信しました。シャットダウンを開始します");
        let _ = drain_tx.send(());
    });

    let mut serve_fut = std::pin::pin!(serve.into_future());

    tokio::select! {
        result = &mut serve_fut => Ok(result?),
        _ = drain_rx => match tokio::time::timeout(drain, &mut serve_fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(ServeError::DrainTimeout),
        },
    }
}

/// SIGINT または SIGTERM を待つ
async fn terminate_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("SIGINT ハンドラの登録に失敗しました");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM ハンドラの登録に失敗しました")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {}
        _ = terminate => {}
    }
}
