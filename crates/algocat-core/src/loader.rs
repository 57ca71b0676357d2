//! # Loader Module
//!
//! The batch pass that turns a raw catalog document into a `CatalogStore`.
//!
//! 1. Parse the document as a JSON array
//! 2. Reject the whole load on a repeated id
//! 3. Validate each record; refused records are dropped and reported
//! 4. Normalize accepted records
//! 5. Build the store
//!
//! The loader does not log. Everything a caller may want to report is in
//! the returned `LoadReport`.

use crate::normalizer::{NormalizationSummary, Normalizer};
use crate::primitives::{MAX_CATALOG_FILE_SIZE, MAX_CATALOG_RECORDS};
use crate::store::CatalogStore;
use crate::types::{CatalogError, DataQualityWarning, ValidationError};
use crate::validator::Validator;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// A raw record that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    /// Position in the input array.
    pub index: usize,
    /// The raw `id`, when it was a string.
    pub id: Option<String>,
    pub errors: Vec<ValidationError>,
}

/// A data-quality finding attached to an accepted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordWarning {
    pub id: String,
    pub warning: DataQualityWarning,
}

/// Outcome of one load pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LoadReport {
    /// Records in the input.
    pub total: usize,
    /// Records that entered the store.
    pub accepted: usize,
    pub rejected: Vec<RejectedRecord>,
    pub warnings: Vec<RecordWarning>,
    pub normalization: NormalizationSummary,
}

impl LoadReport {
    /// True when every input record was accepted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// A built store together with the report of how it was built.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub store: CatalogStore,
    pub report: LoadReport,
}

/// The CatalogLoader runs validation, normalization and indexing.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load already-parsed raw records.
    ///
    /// # Errors
    /// - `LoadAborted(DuplicateId)` if two raw records share a string id
    /// - `TooManyRecords` above `MAX_CATALOG_RECORDS`
    pub fn load(raws: &[Value]) -> Result<LoadOutcome, CatalogError> {
        if raws.len() > MAX_CATALOG_RECORDS {
            return Err(CatalogError::TooManyRecords {
                count: raws.len(),
                max: MAX_CATALOG_RECORDS,
            });
        }

        Validator::check_unique_ids(raws).map_err(CatalogError::LoadAborted)?;

        let mut report = LoadReport {
            total: raws.len(),
            ..LoadReport::default()
        };
        let mut records = Vec::with_capacity(raws.len());

        for (index, raw) in raws.iter().enumerate() {
            match Validator::validate(raw) {
                Ok(valid) => {
                    let (record, summary) = Normalizer::normalize_with_summary(valid.record);
                    report.normalization += summary;
                    report
                        .warnings
                        .extend(valid.warnings.into_iter().map(|warning| RecordWarning {
                            id: record.id.clone(),
                            warning,
                        }));
                    records.push(record);
                }
                Err(errors) => report.rejected.push(RejectedRecord {
                    index,
                    id: raw.get("id").and_then(Value::as_str).map(str::to_string),
                    errors,
                }),
            }
        }

        report.accepted = records.len();
        let store = CatalogStore::build(records)?;
        Ok(LoadOutcome { store, report })
    }

    /// Load a catalog document. The top level must be a JSON array.
    pub fn load_json(json: &str) -> Result<LoadOutcome, CatalogError> {
        let document: Value =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::load_document(document)
    }

    /// Load a catalog document from UTF-8 bytes.
    pub fn load_slice(bytes: &[u8]) -> Result<LoadOutcome, CatalogError> {
        let document: Value =
            serde_json::from_slice(bytes).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::load_document(document)
    }

    /// Load a catalog file, refusing files above `MAX_CATALOG_FILE_SIZE`.
    pub fn load_file(path: &Path) -> Result<LoadOutcome, CatalogError> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", path.display())))?;
        if metadata.len() > MAX_CATALOG_FILE_SIZE {
            return Err(CatalogError::Io(format!(
                "{}: {} bytes exceeds the {MAX_CATALOG_FILE_SIZE} byte limit",
                path.display(),
                metadata.len()
            )));
        }
        let bytes = std::fs::read(path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", path.display())))?;
        Self::load_slice(&bytes)
    }

    fn load_document(document: Value) -> Result<LoadOutcome, CatalogError> {
        match document {
            Value::Array(raws) => Self::load(&raws),
            other => Err(CatalogError::Parse(format!(
                "catalog must be a JSON array of records, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// TESTS
// =============================================================================
