//! SQLite-backed quote storage.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::config::StorageConfig;
use crate::quote::QuoteRecord;

/// Failure persisting or reading quotes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The write deadline elapsed before the insert completed.
    #[error("quote insert timed out")]
    DeadlineExceeded,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The spawned insert task died before reporting a result.
    #[error("insert task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

const CREATE_TABLE_SQL: &str = "\
CREATE TABLE IF NOT EXISTS currency_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL,
    codein TEXT NOT NULL,
    name TEXT NOT NULL,
    high REAL NOT NULL,
    low REAL NOT NULL,
    varBid REAL NOT NULL,
    pctChange REAL NOT NULL,
    bid REAL NOT NULL,
    ask REAL NOT NULL,
    timestamp INTEGER NOT NULL,
    create_date TEXT NOT NULL
)";

const INSERT_SQL: &str = "\
INSERT INTO currency_data (
    code, codein, name, high, low, varBid, pctChange, bid, ask, timestamp, create_date
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";

const SELECT_ALL_SQL: &str = "\
SELECT code, codein, name, high, low, varBid, pctChange, bid, ask, timestamp, create_date
FROM currency_data ORDER BY id";

/// Row shape of the `currency_data` table.
#[derive(sqlx::FromRow)]
struct QuoteRow {
    code: String,
    codein: String,
    name: String,
    high: f64,
    low: f64,
    #[sqlx(rename = "varBid")]
    var_bid: f64,
    #[sqlx(rename = "pctChange")]
    pct_change: f64,
    bid: f64,
    ask: f64,
    timestamp: i64,
    create_date: String,
}

impl From<QuoteRow> for QuoteRecord {
    fn from(row: QuoteRow) -> Self {
        QuoteRecord {
            code: row.code,
            codein: row.codein,
            name: row.name,
            high: row.high.to_string(),
            low: row.low.to_string(),
            var_bid: row.var_bid.to_string(),
            pct_change: row.pct_change.to_string(),
            bid: row.bid.to_string(),
            ask: row.ask.to_string(),
            timestamp: row.timestamp.to_string(),
            create_date: row.create_date,
        }
    }
}

/// Shared handle to the quote table.
///
/// Cheap to clone; all clones share one bounded connection pool.
#[derive(Clone)]
pub struct QuoteStore {
    pool: SqlitePool,
}

impl QuoteStore {
    /// Open the database (creating file and directory if absent) and make
    /// sure the `currency_data` table exists.
    pub async fn connect(config: &StorageConfig) -> Result<Self, StoreError> {
        if let Some(dir) = Path::new(&config.path).parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect_with(options)
            .await?;

        sqlx::query(CREATE_TABLE_SQL).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Append one quote. Decimal-as-text fields that fail to parse are
    /// stored as zero, the same default the normalizer applies.
    pub async fn insert_quote(&self, record: &QuoteRecord) -> Result<(), StoreError> {
        sqlx::query(INSERT_SQL)
            .bind(&record.code)
            .bind(&record.codein)
            .bind(&record.name)
            .bind(as_real(&record.high))
            .bind(as_real(&record.low))
            .bind(as_real(&record.var_bid))
            .bind(as_real(&record.pct_change))
            .bind(as_real(&record.bid))
            .bind(as_real(&record.ask))
            .bind(record.timestamp.parse::<i64>().unwrap_or(0))
            .bind(&record.create_date)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Every stored quote, oldest first, rendered back as canonical records.
    pub async fn all_quotes(&self) -> Result<Vec<QuoteRecord>, StoreError> {
        let rows: Vec<QuoteRow> = sqlx::query_as(SELECT_ALL_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(QuoteRecord::from).collect())
    }
}

fn as_real(field: &str) -> f64 {
    field.parse().unwrap_or(0.0)
}
