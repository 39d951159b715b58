//! # SQLite Store
//!
//! The production-shaped quote store: pooled SQLite behind the same
//! [`QuoteRepository`] interface as the in-memory dev store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SQLite Store Lifecycle                             │
//! │                                                                         │
//! │  StoreConfig::new(path) ← Configure pool settings                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStore::connect(config).await ← Create pool + run migrations      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QuoteRepository impl ← get / list / create / update / delete           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quotes + quote_items tables (write is transactional per quote)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! WAL (Write-Ahead Logging) is enabled so readers don't block writers and
//! vice versa. There is still no optimistic concurrency: a quote update
//! replaces the row wholesale and the later of two racing writes wins.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::repository::QuoteRepository;
use fieldquote_core::{Quote, QuoteLineItem, QuoteStatus};

/// Embedded migrations from the `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds the SQL files into the binary at
/// compile time; no runtime file access is needed.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

// =============================================================================
// Configuration
// =============================================================================

/// SQLite store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/var/lib/fieldquote/quotes.db")
///     .max_connections(5);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    pub min_connections: u32,

    /// Connection acquire timeout.
    pub connect_timeout: Duration,

    /// Whether to run migrations on connect.
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a configuration with the given path; the file is created
    /// if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Creates an in-memory database configuration (for tests).
    ///
    /// In-memory SQLite is per-connection, so the pool is pinned to a
    /// single connection.
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Row Types
// =============================================================================

/// Flat row shape of the `quotes` table.
#[derive(Debug, sqlx::FromRow)]
struct QuoteRow {
    id: String,
    company_id: String,
    customer_id: String,
    title: String,
    status: String,
    subtotal: f64,
    tax_amount: f64,
    total: f64,
    hours: Option<f64>,
    material_cost: Option<f64>,
    markup_percentage: Option<f64>,
    profit_estimate: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    sent_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
}

impl QuoteRow {
    fn into_quote(self, items: Vec<QuoteLineItem>) -> StoreResult<Quote> {
        // A status outside the known set can only mean row corruption;
        // surface it as an internal error, not an InvalidStatus.
        let status: QuoteStatus = self
            .status
            .parse()
            .map_err(|_| StoreError::Internal(format!("corrupt status: '{}'", self.status)))?;

        Ok(Quote {
            id: self.id,
            company_id: self.company_id,
            customer_id: self.customer_id,
            title: self.title,
            items,
            status,
            subtotal: self.subtotal,
            tax_amount: self.tax_amount,
            total: self.total,
            hours: self.hours,
            material_cost: self.material_cost,
            markup_percentage: self.markup_percentage,
            profit_estimate: self.profit_estimate,
            created_at: self.created_at,
            updated_at: self.updated_at,
            sent_at: self.sent_at,
            expires_at: self.expires_at,
        })
    }
}

/// Flat row shape of the `quote_items` table.
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: String,
    name: String,
    description: Option<String>,
    quantity: f64,
    unit_price: f64,
    tax_rate: f64,
    subtotal: f64,
    tax_amount: f64,
    total: f64,
}

impl From<ItemRow> for QuoteLineItem {
    fn from(row: ItemRow) -> Self {
        QuoteLineItem {
            id: row.id,
            name: row.name,
            description: row.description,
            quantity: row.quantity,
            unit_price: row.unit_price,
            tax_rate: row.tax_rate,
            subtotal: row.subtotal,
            tax_amount: row.tax_amount,
            total: row.total,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Pooled SQLite quote store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates the connection pool and (by default) runs migrations.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Enables WAL journaling, NORMAL synchronous, foreign keys
    /// 3. Builds the pool
    /// 4. Applies pending migrations
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing quote store"
        );

        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());
        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // Needed for quote_items ON DELETE CASCADE; off by default in SQLite
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let store = SqliteStore { pool };

        if config.run_migrations {
            store.run_migrations().await?;
        }

        Ok(store)
    }

    /// Applies pending migrations. Idempotent; called by `connect` unless
    /// disabled in the config.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        info!("Running quote store migrations");
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Returns the underlying pool, for queries the repository doesn't cover.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checks that the store can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    async fn load_items(&self, quote_id: &str) -> StoreResult<Vec<QuoteLineItem>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, description,
                   quantity, unit_price, tax_rate,
                   subtotal, tax_amount, total
            FROM quote_items
            WHERE quote_id = ?1
            ORDER BY position
            "#,
        )
        .bind(quote_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(QuoteLineItem::from).collect())
    }
}

/// Inserts a quote's items inside an open transaction.
async fn insert_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    quote: &Quote,
) -> StoreResult<()> {
    for (position, item) in quote.items.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO quote_items (
                id, quote_id, name, description,
                quantity, unit_price, tax_rate,
                subtotal, tax_amount, total, position
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&item.id)
        .bind(&quote.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.tax_rate)
        .bind(item.subtotal)
        .bind(item.tax_amount)
        .bind(item.total)
        .bind(position as i64)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl QuoteRepository for SqliteStore {
    async fn get(&self, company_id: &str, id: &str) -> StoreResult<Option<Quote>> {
        let row: Option<QuoteRow> = sqlx::query_as(
            r#"
            SELECT id, company_id, customer_id, title, status,
                   subtotal, tax_amount, total,
                   hours, material_cost, markup_percentage, profit_estimate,
                   created_at, updated_at, sent_at, expires_at
            FROM quotes
            WHERE id = ?1 AND company_id = ?2
            "#,
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.load_items(id).await?;
                Ok(Some(row.into_quote(items)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, company_id: &str) -> StoreResult<Vec<Quote>> {
        let rows: Vec<QuoteRow> = sqlx::query_as(
            r#"
            SELECT id, company_id, customer_id, title, status,
                   subtotal, tax_amount, total,
                   hours, material_cost, markup_percentage, profit_estimate,
                   created_at, updated_at, sent_at, expires_at
            FROM quotes
            WHERE company_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        let mut quotes = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.load_items(&row.id).await?;
            quotes.push(row.into_quote(items)?);
        }
        Ok(quotes)
    }

    async fn create(&self, quote: &Quote) -> StoreResult<()> {
        debug!(id = %quote.id, company_id = %quote.company_id, "Creating quote (sqlite)");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO quotes (
                id, company_id, customer_id, title, status,
                subtotal, tax_amount, total,
                hours, material_cost, markup_percentage, profit_estimate,
                created_at, updated_at, sent_at, expires_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8,
                ?9, ?10, ?11, ?12,
                ?13, ?14, ?15, ?16
            )
            "#,
        )
        .bind(&quote.id)
        .bind(&quote.company_id)
        .bind(&quote.customer_id)
        .bind(&quote.title)
        .bind(quote.status.as_str())
        .bind(quote.subtotal)
        .bind(quote.tax_amount)
        .bind(quote.total)
        .bind(quote.hours)
        .bind(quote.material_cost)
        .bind(quote.markup_percentage)
        .bind(quote.profit_estimate)
        .bind(quote.created_at)
        .bind(quote.updated_at)
        .bind(quote.sent_at)
        .bind(quote.expires_at)
        .execute(&mut *tx)
        .await?;

        insert_items(&mut tx, quote).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update(&self, quote: &Quote) -> StoreResult<()> {
        debug!(id = %quote.id, "Updating quote (sqlite)");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE quotes SET
                customer_id = ?3,
                title = ?4,
                status = ?5,
                subtotal = ?6,
                tax_amount = ?7,
                total = ?8,
                hours = ?9,
                material_cost = ?10,
                markup_percentage = ?11,
                profit_estimate = ?12,
                updated_at = ?13,
                sent_at = ?14,
                expires_at = ?15
            WHERE id = ?1 AND company_id = ?2
            "#,
        )
        .bind(&quote.id)
        .bind(&quote.company_id)
        .bind(&quote.customer_id)
        .bind(&quote.title)
        .bind(quote.status.as_str())
        .bind(quote.subtotal)
        .bind(quote.tax_amount)
        .bind(quote.total)
        .bind(quote.hours)
        .bind(quote.material_cost)
        .bind(quote.markup_percentage)
        .bind(quote.profit_estimate)
        .bind(quote.updated_at)
        .bind(quote.sent_at)
        .bind(quote.expires_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Quote", &quote.id));
        }

        // Items are replaced wholesale: delete and reinsert in order
        sqlx::query("DELETE FROM quote_items WHERE quote_id = ?1")
            .bind(&quote.id)
            .execute(&mut *tx)
            .await?;
        insert_items(&mut tx, quote).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, company_id: &str, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting quote (sqlite)");

        // Unconditional: no status guard. Items go with the quote (CASCADE).
        let result = sqlx::query("DELETE FROM quotes WHERE id = ?1 AND company_id = ?2")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Quote", id));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
