use chrono::DateTime;
use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::utils::time::now_in;

/// Shared application state
///
/// Cloned into every handler; the pool is reference counted internally.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Database service
    pub db: DbService,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        Self { config, db }
    }

    /// Open the configured database and build the state
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        tracing::info!(
            path = %config.database_path,
            timezone = %config.timezone,
            "Database ready"
        );
        Ok(Self::new(config.clone(), db))
    }

    /// Connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    /// Current instant in the business timezone
    pub fn now(&self) -> DateTime<Tz> {
        now_in(self.config.timezone)
    }
}
