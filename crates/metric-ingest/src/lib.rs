//! Metric data ingestion.
//!
//! This crate owns everything between the files on disk and the shaping
//! transforms:
//!
//! - **Tabular store**: append-only `Category,Value` CSV file
//! - **Structured document**: read-only JSON with a title and labelled points
//! - **Validation**: guardrails applied to survey submissions before append
//! - **Cleaning**: header normalization, numeric coercion and row dropping
//!
//! # Example
//!
//! ```ignore
//! use metric_ingest::{TabularStore, load_series, validate};
//!
//! let store = TabularStore::new("data.csv");
//! store.ensure_store()?;
//! store.append(&validate("Sleep (hours)", false, 7.5)?)?;
//!
//! let loaded = load_series(&store);
//! println!("{} rows, {} dropped", loaded.data.len(), loaded.dropped);
//! ```

mod clean;
mod document;
mod error;
mod header;
mod load;
mod numeric;
mod store;
mod validate;

// === Error Types ===
pub use error::{IngestError, Result};

// === Store Adapters ===
pub use document::{DocumentStore, RawDocument};
pub use store::{RawTable, TabularStore};

// === Validation ===
pub use validate::validate;

// === Cleaning ===
pub use clean::{Cleaned, clean_document, clean_series};
pub use header::{normalize_header, title_case};
pub use load::{load_document, load_series};
pub use numeric::{json_to_f64, parse_numeric};
