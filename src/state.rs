//! Shared application state

use crate::{
    clients::{HttpSearchIndexClient, NoopSearchIndexClient, SearchIndexClient,
        TextingProviderClient},
    config::Config,
    db::{CategoryRepository, ResourceRepository, ServiceRepository, TextingRepository},
    services::{DirectoryService, ModerationService, TextingService},
    Result,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,
    pub directory: Arc<DirectoryService>,
    pub moderation: Arc<ModerationService>,
    /// Present only when a texting provider is configured.
    pub texting: Option<Arc<TextingService>>,
}

impl AppState {
    /// Initialize the application state: pool, migrations, clients, services.
    pub async fn new(config: Config) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let config = Arc::new(config);
        let db_pool = create_db_pool(config.as_ref()).await?;

        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .map_err(|e| crate::Error::Internal(format!("migration failed: {e}")))?;

        Self::with_pool(config, db_pool)
    }

    /// Build state over an existing pool (migrations already applied).
    pub fn with_pool(config: Arc<Config>, db_pool: PgPool) -> Result<Self> {
        let categories = CategoryRepository::new(db_pool.clone());
        let resources = ResourceRepository::new(db_pool.clone());
        let services = ServiceRepository::new(db_pool.clone());
        let textings = TextingRepository::new(db_pool.clone());

        let search_index: Arc<dyn SearchIndexClient> = match &config.search_index.url {
            Some(url) => Arc::new(HttpSearchIndexClient::new(
                &config.search_index,
                url.clone(),
            )?),
            None => {
                tracing::info!("Search index not configured, removals will be no-ops");
                Arc::new(NoopSearchIndexClient)
            }
        };

        let directory = Arc::new(DirectoryService::new(
            categories,
            resources.clone(),
            services.clone(),
            config.directory.default_site_id,
        ));
        let moderation = Arc::new(ModerationService::new(services.clone(), search_index));

        let texting = match (&config.texting.url, &config.texting.auth_code) {
            (Some(url), Some(auth_code)) => {
                let provider =
                    TextingProviderClient::new(&config.texting, url.clone(), auth_code.clone())?;
                Some(Arc::new(TextingService::new(
                    textings, services, resources, provider,
                )))
            }
            _ => None,
        };

        tracing::info!("Application state initialized successfully");

        Ok(Self {
            config,
            db_pool,
            directory,
            moderation,
            texting,
        })
    }
}

async fn create_db_pool(config: &Config) -> Result<PgPool> {
    tracing::info!("Creating database connection pool...");

    let statement_timeout = config.database.statement_timeout_seconds;
    let lock_timeout = config.database.lock_timeout_seconds;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .min_connections(config.database.pool_min_size)
        .max_connections(config.database.pool_max_size)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database.pool_timeout_seconds,
        ))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                // Max query execution time
                sqlx::query(&format!("SET statement_timeout = '{}s'", statement_timeout))
                    .execute(&mut *conn)
                    .await?;

                // Max lock wait time - fail fast
                sqlx::query(&format!("SET lock_timeout = '{}s'", lock_timeout))
                    .execute(&mut *conn)
                    .await?;

                Ok(())
            })
        })
        .connect(&config.database.url)
        .await
        .map_err(crate::Error::Database)?;

    tracing::info!(
        "Database pool created (min: {}, max: {})",
        config.database.pool_min_size,
        config.database.pool_max_size
    );

    Ok(pool)
}
