//! Event source abstraction over the transaction database
//!
//! The aggregation pipeline only needs raw event timestamps within a
//! window; where they come from is this module's concern alone.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

use tpsmon_common::{Result, TpsError};
use tpsmon_config::DatabaseConfig;

/// A queryable source of raw transaction timestamps.
#[async_trait]
pub trait EventSource {
    /// Fetch all event timestamps within the inclusive
    /// [window_start, window_end] range.
    async fn fetch_events(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Vec<NaiveDateTime>>;
}

/// PostgreSQL-backed event source over the configured transaction table
pub struct PgEventSource {
    pool: PgPool,
    table: String,
}

impl PgEventSource {
    /// Connect to the configured database. The pool is sized for the
    /// single sequential query this tool issues per invocation.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = format!(
            "postgres://{}:{}@{}:{}/{}",
            config.username, config.password, config.host, config.port, config.dbname
        );
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .map_err(|e| {
                TpsError::database_with_source(
                    format!("Failed to connect to {}:{}", config.host, config.port),
                    e,
                )
            })?;

        debug!(host = %config.host, dbname = %config.dbname, "connected to event source");
        Ok(Self {
            pool,
            table: config.table.clone(),
        })
    }

    /// Release the underlying connections
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl EventSource for PgEventSource {
    async fn fetch_events(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Vec<NaiveDateTime>> {
        // Table name comes from validated configuration; timestamps are bound
        let query = format!(
            "SELECT created_at FROM {} WHERE created_at BETWEEN $1 AND $2 ORDER BY created_at",
            self.table
        );

        let timestamps: Vec<NaiveDateTime> = sqlx::query_scalar(&query)
            .bind(window_start)
            .bind(window_end)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                TpsError::database_with_source("Failed to fetch transaction timestamps", e)
            })?;

        debug!(
            events = timestamps.len(),
            from = %window_start,
            to = %window_end,
            "fetched raw events"
        );
        Ok(timestamps)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StaticEventSource;
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[tokio::test]
    async fn test_static_source_filters_window() {
        let source = StaticEventSource {
            events: vec![
                ts("2024-09-09 23:59:59"),
                ts("2024-09-10 10:00:00"),
                ts("2024-09-10 23:59:59"),
                ts("2024-09-11 00:00:00"),
            ],
        };

        let events = source
            .fetch_events(ts("2024-09-10 00:00:00"), ts("2024-09-10 23:59:59"))
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn test_source_is_object_safe() {
        let source: Box<dyn EventSource + Send + Sync> = Box::new(StaticEventSource {
            events: vec![ts("2024-09-10 10:00:00")],
        });

        let events = source
            .fetch_events(ts("2024-09-10 00:00:00"), ts("2024-09-10 23:59:59"))
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
    }
}
