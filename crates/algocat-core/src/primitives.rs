//! # Catalog Limits
//!
//! Hardcoded runtime constants for algocat-core.
//!
//! The catalog is small and static; these bounds keep a malformed or hostile
//! input file from turning load or query into unbounded work.

/// Maximum number of records accepted in one load.
pub const MAX_CATALOG_RECORDS: usize = 10_000;

/// Maximum catalog file size in bytes, checked before the file is read.
pub const MAX_CATALOG_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Maximum length of a record id in bytes.
pub const MAX_ID_LENGTH: usize = 128;

/// Maximum length of the free-text query term in bytes.
///
/// Longer terms are treated as malformed and match nothing.
pub const MAX_QUERY_TEXT_LENGTH: usize = 256;

/// Page size used when a caller asks for `limit = 0`.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page a single query returns.
pub const MAX_PAGE_SIZE: usize = 100;

// =============================================================================
// CANONICAL EXPORT
// =============================================================================

/// Format tag written into every canonical export document.
pub const CANONICAL_FORMAT: &str = "algocat-canonical";

/// Current canonical export version.
///
/// Increment this when making breaking changes to the export document.
pub const CANONICAL_VERSION: u8 = 1;
