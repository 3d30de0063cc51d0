//! Shelf Storage
//!
//! `SQLite` database layer for the Shelf catalog: accounts, books and reviews.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each table owns its own queries (`users`, `books`, `reviews`)
//! - **Constraints First**: uniqueness of emails, ISBNs and one review per
//!   (book, user) pair is enforced by the schema and surfaced as
//!   [`StorageError::Duplicate`]
//!
//! # Example
//!
//! ```rust,no_run
//! use shelf_storage::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite://shelf.db").await?;
//!
//! let matches = shelf_storage::books::search(db.pool(), "tolkien").await?;
//! println!("{} books found", matches.len());
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod books;
pub mod reviews;
pub mod users;

pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://shelf.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Handle to the catalog database
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and bring the schema up to date
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

pub(crate) fn timestamp_to_datetime(ts: i64) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| StorageError::InvalidData(format!("invalid timestamp {ts}")))
}
