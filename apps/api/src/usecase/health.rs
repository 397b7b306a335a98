//! # ヘルスチェックユースケース
//!
//! 死活確認のビジネスロジックを実装する。`include_db` が真の場合のみ
//! データベースへの到達性を確認する。

use std::sync::Arc;

use async_trait::async_trait;
use dodai_infra::repository::HealthRepository;
use dodai_shared::ServiceError;

/// 死活確認の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingStatus {
    pub message: String,
}

/// ヘルスチェックユースケースの抽象
#[async_trait]
pub trait HealthUseCase: Send + Sync {
    /// 死活確認を行う
    ///
    /// `include_db` が真でデータベースに到達できない場合は
    /// `database_unavailable`（503）を返す。
    async fn ping(&self, include_db: bool) -> Result<PingStatus, ServiceError>;
}

/// ヘルスチェックユースケース実装
pub struct HealthUseCaseImpl {
    health_repo: Arc<dyn HealthRepository>,
}

impl HealthUseCaseImpl {
    pub fn new(health_repo: Arc<dyn HealthRepository>) -> Self {
        Self { health_repo }
    }
}

#[async_trait]
impl HealthUseCase for HealthUseCaseImpl {
    async fn ping(&self, include_db: bool) -> Result<PingStatus, ServiceError> {
        if include_db {
            // 原因のログ出力は検知地点であるここで一度だけ行う
            if let Err(e) = self.health_repo.check_db().await {
                tracing::error!(error = %e, "データベースヘルスチェックに失敗しました");
                return Err(ServiceError::database_unavailable(e.into()));
            }
        }

        Ok(PingStatus {
            message: "pong".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use dodai_shared::error::codes;
    use pretty_assertions::assert_eq;

    use super::*;

    // ===== モックリポジトリ =====

    struct MockHealthRepository {
        healthy: bool,
        calls:   AtomicUsize,
    }

    impl MockHealthRepository {
        fn new(healthy: bool) -> Self {
            Self {
                healthy,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl HealthRepository for MockHealthRepository {
        async fn check_db(&self) -> Result<(), sqlx::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.healthy {
                Ok(())
            } else {
                Err(sqlx::Error::PoolTimedOut)
            }
        }
    }

    #[tokio::test]
    async fn test_db確認なしでpongを返す() {
        let repo = Arc::new(MockHealthRepository::new(true));
        let usecase = HealthUseCaseImpl::new(Arc::clone(&repo) as Arc<dyn HealthRepository>);

        let status = usecase.ping(false).await.unwrap();

        assert_eq!(status.message, "pong");
        // include_db が偽ならリポジトリには触れない
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_db確認ありで到達可能ならpongを返す() {
        let repo = Arc::new(MockHealthRepository::new(true));
        let usecase = HealthUseCaseImpl::new(Arc::clone(&repo) as Arc<dyn HealthRepository>);

        let status = usecase.ping(true).await.unwrap();

        assert_eq!(status.message, "pong");
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_db到達不能でdatabase_unavailableを返す() {
        let repo = Arc::new(MockHealthRepository::new(false));
        let usecase = HealthUseCaseImpl::new(repo as Arc<dyn HealthRepository>);

        let err = usecase.ping(true).await.unwrap_err();

        assert_eq!(err.code(), codes::DATABASE_UNAVAILABLE);
        assert_eq!(err.status(), 503);
        // 元エラーは内部診断用に保持される
        assert!(err.source_error().is_some());
    }
}
