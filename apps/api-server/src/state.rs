//! Application state - shared across all handlers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bloglist_core::error::RepoError;
use bloglist_core::ports::BlogRepository;
use bloglist_infra::InMemoryBlogRepository;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub store_timeout: Duration,
}

impl AppState {
    /// Build the application state with the record store the config asks for.
    pub async fn new(config: &AppConfig) -> Self {
        let blogs = Self::blog_repository(config).await;

        tracing::info!("Application state initialized");

        Self::with_repository(blogs, config.store_timeout)
    }

    pub fn with_repository(blogs: Arc<dyn BlogRepository>, store_timeout: Duration) -> Self {
        Self {
            blogs,
            store_timeout,
        }
    }

    /// Await a record store call, giving up after `store_timeout`.
    pub async fn store<T, F>(&self, call: F) -> Result<T, RepoError>
    where
        F: Future<Output = Result<T, RepoError>>,
    {
        tokio::time::timeout(self.store_timeout, call)
            .await
            .map_err(|_| RepoError::Timeout(self.store_timeout))?
    }

    #[cfg(feature = "postgres")]
    async fn blog_repository(config: &AppConfig) -> Arc<dyn BlogRepository> {
        use bloglist_infra::PostgresBlogRepository;
        use bloglist_infra::database::connect;
        use migration::MigratorTrait;

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryBlogRepository::new());
        };

        let conn = match connect(db_config).await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return Arc::new(InMemoryBlogRepository::new());
            }
        };

        if config.run_migrations {
            match migration::Migrator::up(&conn, None).await {
                Ok(()) => tracing::info!("Database migrations applied"),
                Err(e) => tracing::error!("Failed to apply migrations: {}", e),
            }
        }

        Arc::new(PostgresBlogRepository::new(conn))
    }

    #[cfg(not(feature = "postgres"))]
    async fn blog_repository(_config: &AppConfig) -> Arc<dyn BlogRepository> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Arc::new(InMemoryBlogRepository::new())
    }
}
