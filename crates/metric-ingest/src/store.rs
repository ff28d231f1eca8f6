//! Tabular store adapter.
//!
//! The store is a comma-delimited UTF-8 file with a `Category,Value` header
//! and one observation per line. An absent or zero-length file is the valid
//! "no data yet" state. The adapter assumes it is the only writer.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, info};

use metric_model::{CATEGORY_COLUMN, Observation, VALUE_COLUMN};

use crate::error::{IngestError, Result};

/// Raw, untyped rows of the tabular store in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Header cells as written in the file.
    pub headers: Vec<String>,
    /// Data rows, padded or truncated to the header width.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as key-value records keyed by the raw header.
    pub fn records(&self) -> impl Iterator<Item = Vec<(&str, &str)>> + '_ {
        self.rows.iter().map(|row| {
            self.headers
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect()
        })
    }
}

/// Append-only adapter over the tabular store file.
#[derive(Debug, Clone)]
pub struct TabularStore {
    path: PathBuf,
}

impl TabularStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the store file is absent or holds nothing but whitespace.
    pub fn is_empty(&self) -> Result<bool> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes.iter().all(u8::is_ascii_whitespace)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(IngestError::StoreRead {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Create the store with only the header row if it is absent or blank.
    ///
    /// Calling this any number of times leaves a non-empty store untouched.
    /// A blank file is overwritten so the header is its first record.
    pub fn ensure_store(&self) -> Result<()> {
        if !self.is_empty()? {
            return Ok(());
        }
        let header = encode_record(&self.path, [CATEGORY_COLUMN, VALUE_COLUMN])?;
        fs::write(&self.path, header).map_err(|e| IngestError::StoreWrite {
            path: self.path.clone(),
            source: e,
        })?;
        info!(path = %self.path.display(), "created tabular store");
        Ok(())
    }

    /// Append one observation as a single whole-line write.
    ///
    /// When the store is currently blank it is rewritten with the header
    /// followed by the observation.
    pub fn append(&self, observation: &Observation) -> Result<()> {
        let write_header = self.is_empty()?;
        let mut buffer = Vec::new();
        if write_header {
            buffer.extend(encode_record(&self.path, [CATEGORY_COLUMN, VALUE_COLUMN])?);
        } else if !self.ends_with_newline()? {
            buffer.push(b'\n');
        }
        let value = observation.value.to_string();
        buffer.extend(encode_record(
            &self.path,
            [observation.category.as_str(), value.as_str()],
        )?);

        let mut options = OpenOptions::new();
        if write_header {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }
        let mut file = options
            .create(true)
            .open(&self.path)
            .map_err(|e| IngestError::StoreWrite {
                path: self.path.clone(),
                source: e,
            })?;
        file.write_all(&buffer)
            .and_then(|()| file.flush())
            .map_err(|e| IngestError::StoreWrite {
                path: self.path.clone(),
                source: e,
            })?;
        debug!(path = %self.path.display(), header = write_header, "appended observation");
        Ok(())
    }

    /// Read every row in file order.
    ///
    /// Blank lines are skipped. The first non-blank row is the header.
    pub fn read_all(&self) -> Result<RawTable> {
        if self.is_empty()? {
            return Ok(RawTable::default());
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.read_error(e))?;

        let mut headers: Option<Vec<String>> = None;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.read_error(e))?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            match &headers {
                None => headers = Some(record.iter().map(str::to_string).collect()),
                Some(header_row) => {
                    let row = (0..header_row.len())
                        .map(|idx| record.get(idx).unwrap_or("").to_string())
                        .collect();
                    rows.push(row);
                }
            }
        }
        debug!(path = %self.path.display(), rows = rows.len(), "read tabular store");
        Ok(RawTable {
            headers: headers.unwrap_or_default(),
            rows,
        })
    }

    fn ends_with_newline(&self) -> Result<bool> {
        let read = || -> io::Result<bool> {
            let mut file = File::open(&self.path)?;
            file.seek(SeekFrom::End(-1))?;
            let mut last = [0u8; 1];
            file.read_exact(&mut last)?;
            Ok(last[0] == b'\n')
        };
        read().map_err(|e| IngestError::StoreRead {
            path: self.path.clone(),
            source: e,
        })
    }

    fn read_error(&self, err: csv::Error) -> IngestError {
        if err.is_io_error() {
            IngestError::StoreRead {
                path: self.path.clone(),
                source: io::Error::from(err),
            }
        } else {
            IngestError::CsvParse {
                path: self.path.clone(),
                message: err.to_string(),
            }
        }
    }
}

/// Encode one record with standard quoting, terminated by a newline.
fn encode_record<'a>(path: &Path, fields: impl IntoIterator<Item = &'a str>) -> Result<Vec<u8>> {
    let to_write_error = |source: io::Error| IngestError::StoreWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(fields)
        .map_err(|e| to_write_error(io::Error::from(e)))?;
    writer
        .into_inner()
        .map_err(|e| to_write_error(io::Error::new(e.error().kind(), e.error().to_string())))
}
