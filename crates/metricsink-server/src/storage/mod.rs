//! SQLite-backed metric storage.
//!
//! A single `MetricStore` is opened at startup and shared by every request.
//! SQLite serializes concurrent writers; nothing here adds locking,
//! batching, or transactions.

pub mod sql;

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::{debug, info, instrument, warn};

use metricsink_core::error::{MetricError, Result};
use metricsink_core::{NewMetric, ReportFilter};

pub use sql::scan_metric_row;

/// Table used when `initialize_schema` is given an empty name.
pub const DEFAULT_TABLE: &str = "metrics";

/// Storage client: database handle plus the bound default table.
#[derive(Clone)]
pub struct MetricStore {
    pool: SqlitePool,
    table: String,
}

impl MetricStore {
    /// Open (or create) the database file at `db_path`.
    #[instrument(skip(db_path))]
    pub async fn connect(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        info!("opening sqlite database at {:?}", db_path);

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                MetricError::Config(format!("failed to create directory {}: {e}", parent.display()))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| MetricError::Config(format!("failed to initialize sqlite: {e}")))?;

        Ok(Self::from_pool(pool))
    }

    /// Private in-memory database. One connection, kept for the pool's lifetime,
    /// so every query sees the same data.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| MetricError::Config(e.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| MetricError::Config(format!("failed to initialize sqlite: {e}")))?;

        Ok(Self::from_pool(pool))
    }

    fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The bound default table.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the metrics table if missing and bind it as the default.
    #[instrument(skip(self))]
    pub async fn initialize_schema(&mut self, table: &str) -> Result<()> {
        let table = if table.is_empty() { DEFAULT_TABLE } else { table };
        sql::validate_table_name(table)?;

        sqlx::query(&sql::create_table(table))
            .execute(&self.pool)
            .await
            .map_err(|e| MetricError::Schema(format!("create table {table} failed: {e}")))?;

        self.table = table.to_string();
        info!(table = %self.table, "schema ready");
        Ok(())
    }

    fn resolve<'a>(&'a self, table: Option<&'a str>, op: &str) -> Result<&'a str> {
        match table.filter(|t| !t.is_empty()) {
            Some(t) => {
                sql::validate_table_name(t)?;
                Ok(t)
            }
            None => {
                debug!("table name not provided for {op}, using default {}", self.table);
                Ok(&self.table)
            }
        }
    }

    /// Insert one sample; `date` is assigned by SQLite. Returns rows affected.
    #[instrument(skip(self, metric), fields(ip = %metric.ip))]
    pub async fn insert(&self, table: Option<&str>, metric: &NewMetric) -> Result<u64> {
        let table = self.resolve(table, "insert")?;
        debug!(table, ?metric, "inserting metric");

        let done = sqlx::query(&sql::insert_metric(table))
            .bind(metric.cpu_used)
            .bind(metric.memory_used)
            .bind(&metric.ip)
            .execute(&self.pool)
            .await
            .map_err(|e| MetricError::Insert(e.to_string()))?;

        Ok(done.rows_affected())
    }

    /// Run a read query. Without `raw` this returns the first 10 rows of the table.
    #[instrument(skip(self, raw))]
    pub async fn query(&self, table: Option<&str>, raw: Option<&str>) -> Result<Vec<SqliteRow>> {
        let sql = match raw {
            Some(q) => q.to_string(),
            None => sql::select_default(self.resolve(table, "select")?),
        };
        debug!(%sql, "running query");

        sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MetricError::Query(e.to_string()))
    }

    /// Rows of the per-IP aggregate report against the bound table.
    pub async fn report_rows(&self, filter: ReportFilter) -> Result<Vec<SqliteRow>> {
        let sql = sql::report(filter, &self.table);
        self.query(None, Some(&sql)).await
    }

    /// Administrative drop, used for test teardown.
    #[instrument(skip(self))]
    pub async fn drop_table(&self, table: &str) -> Result<()> {
        if table.is_empty() {
            return Err(MetricError::Config("table name not provided".into()));
        }
        sql::validate_table_name(table)?;
        warn!(table, "dropping table");

        sqlx::query(&sql::drop_table(table))
            .execute(&self.pool)
            .await
            .map_err(|e| MetricError::Schema(format!("drop table {table} failed: {e}")))?;
        Ok(())
    }
}
