//! Structured document adapter.
//!
//! The document is an externally owned JSON object. Only `chart_title` and
//! `data_points` are recognized; any other field is ignored. The adapter
//! never writes to it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};

/// The document as read, before any coercion.
///
/// Shape is checked once here: the root must be an object and `data_points`,
/// when present, must be a list. Entries of the list stay untyped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub chart_title: Option<Value>,
    #[serde(default)]
    pub data_points: Option<Vec<Value>>,
}

impl RawDocument {
    /// Parse a document from its JSON text. The root must be an object.
    pub fn from_json(path: &Path, text: &str) -> Result<Self> {
        let parse_error = |message: String| IngestError::DocumentParse {
            path: path.to_path_buf(),
            message,
        };
        let root: Value = serde_json::from_str(text).map_err(|e| parse_error(e.to_string()))?;
        if !root.is_object() {
            return Err(parse_error("expected a JSON object at the top level".to_string()));
        }
        serde_json::from_value(root).map_err(|e| parse_error(e.to_string()))
    }

    pub fn points(&self) -> &[Value] {
        self.data_points.as_deref().unwrap_or(&[])
    }
}

/// Read-only adapter over the structured document file.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and shape-check the document.
    ///
    /// An absent or zero-length file is reported as
    /// [`IngestError::DocumentMissing`].
    pub fn read(&self) -> Result<RawDocument> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(IngestError::DocumentMissing {
                    path: self.path.clone(),
                });
            }
            Err(e) => {
                return Err(IngestError::DocumentRead {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        let text = text.trim_start_matches('\u{feff}');
        if text.trim().is_empty() {
            return Err(IngestError::DocumentMissing {
                path: self.path.clone(),
            });
        }
        let document = RawDocument::from_json(&self.path, text)?;
        debug!(
            path = %self.path.display(),
            points = document.points().len(),
            "read structured document"
        );
        Ok(document)
    }
}
