//! # Canonical Export Module
//!
//! Deterministic serialization of a whole store, for verification and for
//! shipping a cleaned catalog.
//!
//! The export is compact JSON:
//!
//! ```text
//! {"format":"algocat-canonical","version":1,"recordCount":N,"records":[...]}
//! ```
//!
//! Records appear in id order, already normalized. Importing runs the full
//! load pipeline again, so an export is never trusted more than a hand-written
//! catalog file.

use crate::loader::{CatalogLoader, LoadOutcome};
use crate::primitives::{CANONICAL_FORMAT, CANONICAL_VERSION, MAX_CATALOG_RECORDS};
use crate::store::CatalogStore;
use crate::types::{AlgorithmRecord, CatalogError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// DOCUMENT
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    format: &'static str,
    version: u8,
    record_count: usize,
    records: Vec<&'a AlgorithmRecord>,
}

/// Header fields of a canonical document, read before any record is touched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalHeader {
    pub format: String,
    pub version: u8,
    pub record_count: usize,
}

impl CanonicalHeader {
    /// Check format tag, version and declared size.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.format != CANONICAL_FORMAT {
            return Err(CatalogError::Serialization(
                "Invalid export format".to_string(),
            ));
        }
        if self.version != CANONICAL_VERSION {
            return Err(CatalogError::Serialization(format!(
                "Unsupported export version {}",
                self.version
            )));
        }
        if self.record_count > MAX_CATALOG_RECORDS {
            return Err(CatalogError::TooManyRecords {
                count: self.record_count,
                max: MAX_CATALOG_RECORDS,
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct ImportDocument {
    #[serde(flatten)]
    header: CanonicalHeader,
    records: Vec<Value>,
}

// =============================================================================
// EXPORT / IMPORT
// =============================================================================

/// Export a store as canonical JSON bytes.
///
/// # Errors
///
/// Returns `CatalogError::Serialization` if a record cannot be serialized.
pub fn export_canonical(store: &CatalogStore) -> Result<Vec<u8>, CatalogError> {
    let document = ExportDocument {
        format: CANONICAL_FORMAT,
        version: CANONICAL_VERSION,
        record_count: store.len(),
        records: store.iter().collect(),
    };
    serde_json::to_vec(&document).map_err(|e| CatalogError::Serialization(e.to_string()))
}

/// Import a canonical export.
///
/// The header is checked first. Records then go through validation,
/// normalization and indexing exactly as a catalog file would.
pub fn import_canonical(data: &[u8]) -> Result<LoadOutcome, CatalogError> {
    let document: ImportDocument =
        serde_json::from_slice(data).map_err(|e| CatalogError::Serialization(e.to_string()))?;
    document.header.validate()?;

    if document.records.len() != document.header.record_count {
        return Err(CatalogError::Serialization(format!(
            "Record count mismatch: header says {}, found {}",
            document.header.record_count,
            document.records.len()
        )));
    }

    CatalogLoader::load(&document.records)
}

/// True if `data` imports cleanly into a store that exports identically to `store`.
pub fn verify_canonical(store: &CatalogStore, data: &[u8]) -> Result<bool, CatalogError> {
    let imported = import_canonical(data)?;
    if !imported.report.is_complete() {
        return Ok(false);
    }
    Ok(export_canonical(&imported.store)? == export_canonical(store)?)
}

// =============================================================================
// CHECKSUMS
// =============================================================================

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over raw bytes.
///
/// Not a cryptographic hash. It detects accidental changes only.
#[must_use]
pub fn checksum_bytes(data: &[u8]) -> u64 {
    data.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Checksum of the canonical export of a store.
pub fn canonical_checksum(store: &CatalogStore) -> Result<u64, CatalogError> {
    export_canonical(store).map(|bytes| checksum_bytes(&bytes))
}

/// Hex BLAKE3 digest of the canonical export of a store.
///
/// Only available with the `crypto-hash` feature.
#[cfg(feature = "crypto-hash")]
pub fn blake3_hash(store: &CatalogStore) -> Result<String, CatalogError> {
    let bytes = export_canonical(store)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

// =============================================================================
// TESTS
// =============================================================================
