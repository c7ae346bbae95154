//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::domain::Locale;
use blog_infra::InMemoryStore;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    /// Which backend serves the store, reported by the health check.
    pub store: &'static str,
    pub default_locale: Locale,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "database")]
        let state = match &config.database {
            Some(db_config) => match blog_infra::database::connect(db_config).await {
                Ok(db) => Self::with_database(db, config.default_locale),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory(config.default_locale)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory(config.default_locale)
            }
        };

        #[cfg(not(feature = "database"))]
        let state = {
            tracing::info!("Running without database feature - using in-memory store");
            Self::in_memory(config.default_locale)
        };

        tracing::info!(store = state.store, "Application state initialized");
        state
    }

    /// Volatile state: all data is lost on restart.
    pub fn in_memory(default_locale: Locale) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            posts: PostService::new(store.clone(), store),
            store: "memory",
            default_locale,
        }
    }

    #[cfg(feature = "database")]
    fn with_database(db: blog_infra::database::DbConn, default_locale: Locale) -> Self {
        use blog_infra::database::{SqlPostRepository, SqlTagRepository, backend_name};

        let store = backend_name(&db);
        Self {
            posts: PostService::new(
                Arc::new(SqlPostRepository::new(db.clone())),
                Arc::new(SqlTagRepository::new(db)),
            ),
            store,
            default_locale,
        }
    }
}
