//! Shelf Catalog Importer
//!
//! One-shot batch loader that fills the `books` table from a delimited file.
//!
//! # Format
//!
//! One header record followed by `isbn,title,author,year` records. Fields may
//! be quoted; surrounding whitespace is trimmed.
//!
//! # Failure model
//!
//! The import is all-or-nothing. Every record is inserted inside a single
//! transaction that is committed after the last record, so a malformed record
//! or a duplicate ISBN aborts the run and leaves the catalog untouched.

mod error;
mod types;

pub mod importer;

pub use error::ImportError;
pub use importer::CatalogImporter;
pub use types::{CatalogRecord, ImportConfig, ImportSummary};

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, ImportError>;
