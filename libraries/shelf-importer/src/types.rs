//! Common types for the importer

use serde::Deserialize;
use shelf_core::types::NewBook;
use std::time::Duration;

/// Configuration for import runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Log progress every this many records
    pub progress_interval: usize,

    /// Field delimiter
    pub delimiter: u8,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            progress_interval: 100,
            delimiter: b',',
        }
    }
}

/// One data record of the catalog file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogRecord {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub year: String,
}

impl CatalogRecord {
    /// Validate the record and convert it into an insertable book
    pub fn into_new_book(self) -> Result<NewBook, String> {
        if self.isbn.is_empty() {
            return Err("isbn is empty".to_string());
        }
        let year = self
            .year
            .parse::<i32>()
            .map_err(|_| format!("year '{}' is not an integer", self.year))?;

        Ok(NewBook {
            isbn: self.isbn,
            title: self.title,
            author: self.author,
            year,
        })
    }
}

/// Outcome of a successful import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Books inserted
    pub imported: usize,

    pub duration: Duration,
}
