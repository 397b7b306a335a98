//! # Dodai API サーバー
//!
//! ヘルスプローブを提供するバックエンドサービスの土台。
//!
//! ## アーキテクチャ
//!
//! ```text
//! Request → Router → Handler → UseCase → Repository → PostgreSQL
//!                      │
//!                      └─ 失敗はどの層でも ServiceError として構築され、
//!                         エンベロープ境界で一度だけ書き出される
//! ```
//!
//! 依存コンポーネントは起動時に [`registry`] で一度だけ組み立てられ、
//! 以降は読み取り専用で共有される。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `APP_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `APP_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `DB_MAX_CONNECTIONS` など | No | プール上限（[`config`] を参照） |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//! | `RUST_LOG` | No | ログレベルフィルタ |
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p dodai-api
//! ```
//!
//! 起動時の失敗（設定・データベース接続・リスナー起動）は stderr に診断を
//! 出力し、トラフィックを受け付ける前に非ゼロ終了する。

mod config;
mod error;
mod handler;
mod registry;
mod router;
mod server;
mod usecase;
mod validation;

use std::net::SocketAddr;

use anyhow::Context as _;
use config::ApiConfig;
use dodai_infra::db;
use dodai_shared::observability::{self, LogFormat};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    observability::init_tracing(LogFormat::from_env());
    let _app_span = tracing::info_span!("app", service = "api").entered();

    // 設定読み込み
    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::info!("API サーバーを起動します: {}:{}", config.host, config.port);

    // データベース接続プールを作成（到達不能なら起動失敗）
    let pool = db::create_pool(&config.database)
        .await
        .context("データベース接続に失敗しました")?;

    // 依存コンポーネントをボトムアップに組み立てる
    let repos = registry::build_repos(&pool);
    let usecases = registry::build_usecases(&repos);
    let handlers = registry::build_handlers(&usecases);
    let app = router::build_router(&handlers);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;
    let listener = TcpListener::bind(addr)
        .await
        .context("リスナーの起動に失敗しました")?;
    tracing::info!("API サーバーが起動しました: {addr}");

    let result = server::run(listener, app, server::DRAIN_TIMEOUT).await;

    // プールの解放はリスナー停止（またはドレイン期間超過）後に行う
    pool.close().await;
    tracing::info!("データベース接続を閉じました");

    match result {
        Ok(()) => {
            tracing::info!("サーバーが終了しました");
            Ok(())
        }
        Err(e @ server::ServeError::DrainTimeout) => {
            tracing::error!("サーバーを強制終了します: {e}");
            std::process::exit(1);
        }
        Err(e) => Err(e).context("サーバーの実行に失敗しました"),
    }
}
