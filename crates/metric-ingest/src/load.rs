//! Read-then-clean entry points used by the visualization surface.
//!
//! These never fail. Adapter errors become an empty result plus a warning so
//! the caller can always render a placeholder.

use tracing::warn;

use metric_model::{ChartDocument, CleanedSeries};

use crate::clean::{Cleaned, clean_document, clean_series};
use crate::document::DocumentStore;
use crate::error::IngestError;
use crate::store::TabularStore;

/// Read and clean the tabular store.
///
/// An absent or empty store is "no data yet" and carries no warning.
pub fn load_series(store: &TabularStore) -> Cleaned<CleanedSeries> {
    match store.read_all() {
        Ok(table) => clean_series(&table),
        Err(error) => degrade(&error),
    }
}

/// Read and clean the structured document.
pub fn load_document(store: &DocumentStore) -> Cleaned<ChartDocument> {
    match store.read() {
        Ok(raw) => clean_document(&raw),
        Err(error) => degrade(&error),
    }
}

fn degrade<T: Default>(error: &IngestError) -> Cleaned<T> {
    warn!(%error, "store read failed, continuing with no data");
    Cleaned::with_warning(error.to_string())
}
