//! Import orchestration: parse the catalog file and insert every record

use crate::{CatalogRecord, ImportConfig, ImportError, ImportSummary, Result};
use shelf_storage::books;
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Instant;

/// Catalog importer
pub struct CatalogImporter {
    pool: SqlitePool,
    config: ImportConfig,
}

impl CatalogImporter {
    pub fn new(pool: SqlitePool, config: ImportConfig) -> Self {
        Self { pool, config }
    }

    /// Import a catalog file from disk
    pub async fn import_file(&self, path: &Path) -> Result<ImportSummary> {
        tracing::info!(path = %path.display(), "Importing catalog");
        let contents = tokio::fs::read(path).await?;
        self.import_bytes(&contents).await
    }

    /// Import catalog data already in memory
    ///
    /// The first record is always treated as a header and skipped.
    pub async fn import_bytes(&self, data: &[u8]) -> Result<ImportSummary> {
        let start_time = Instant::now();
        let progress_interval = self.config.progress_interval.max(1);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.config.delimiter)
            .trim(csv::Trim::All)
            .from_reader(data);

        tracing::info!("Skipping the first line, assuming it is a header");

        let mut tx = self.pool.begin().await?;
        let mut imported = 0usize;

        for record in reader.records() {
            let record = record.map_err(|source| {
                let line = source.position().map_or(0, csv::Position::line);
                ImportError::Parse { line, source }
            })?;
            let line = record.position().map_or(0, csv::Position::line);

            let book = record
                .deserialize::<CatalogRecord>(None)
                .map_err(|e| ImportError::InvalidRecord {
                    line,
                    reason: e.to_string(),
                })?
                .into_new_book()
                .map_err(|reason| ImportError::InvalidRecord { line, reason })?;

            books::create(&mut *tx, &book)
                .await
                .map_err(|source| ImportError::Insert { line, source })?;

            imported += 1;
            if imported % progress_interval == 0 {
                tracing::info!("{} books added so far", imported);
            }
        }

        tx.commit().await?;

        let summary = ImportSummary {
            imported,
            duration: start_time.elapsed(),
        };
        tracing::info!(
            "{} books were added in {:.2}s",
            summary.imported,
            summary.duration.as_secs_f64()
        );

        Ok(summary)
    }
}
