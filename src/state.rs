use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::auth::{
    jwt::JwtKeys,
    repo::{PgUserStore, UserStore},
};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
    pub keys: Arc<JwtKeys>,
}

impl AppState {
    /// Connects to Postgres and applies pending migrations.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;
        tracing::info!("migrations applied");

        Ok(Self::from_parts(
            Arc::new(PgUserStore::new(db)),
            Arc::new(config),
        ))
    }

    /// Builds the signing keys once; clones share them.
    pub fn from_parts(store: Arc<dyn UserStore>, config: Arc<AppConfig>) -> Self {
        let keys = Arc::new(JwtKeys::from(&config.jwt));
        Self {
            store,
            config,
            keys,
        }
    }
}
