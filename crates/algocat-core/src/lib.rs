//! # algocat-core
//!
//! The algorithm catalog engine - THE LOGIC.
//!
//! This crate turns a static catalog of algorithm topics into an immutable,
//! indexed store and answers reads against it.
//!
//! ## Pipeline
//!
//! ```text
//! raw JSON ─► Validator ─► Normalizer ─► CatalogStore ─► QueryEngine
//!                                             └────────► FixtureBundle ─► SolutionRunner
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure and synchronous: no async, no network, no logging
//! - Deterministic: the same input always builds the same store and answers
//!   every query the same way
//! - The store is immutable once built; a dataset change means a rebuild
//! - Never panics; all failures are `CatalogError` or a load report entry

// =============================================================================
// MODULES
// =============================================================================

pub mod export;
pub mod harness;
pub mod loader;
pub mod normalizer;
pub mod primitives;
pub mod query;
pub mod store;
pub mod types;
pub mod usage;
pub mod validator;

// =============================================================================
// RE-EXPORTS: Schema
// =============================================================================

pub use types::{
    AlgorithmRecord, CatalogError, CodeBlock, CodeSnippet, ComplexityExpectation,
    DataQualityWarning, Difficulty, Explanation, Implementation, InputParam, Language, ListType,
    ProblemLink, ProblemsToSolve, TestCase, Tutorial, ValidationError, VideoChapter,
    WorkedExample,
};
pub use usage::{CompletionGraph, UsageCounters, UsageEvent};

// =============================================================================
// RE-EXPORTS: Pipeline
// =============================================================================

pub use loader::{CatalogLoader, LoadOutcome, LoadReport, RecordWarning, RejectedRecord};
pub use normalizer::{NormalizationSummary, Normalizer};
pub use validator::{ValidRecord, Validator};

// =============================================================================
// RE-EXPORTS: Store & Reads
// =============================================================================

pub use export::{
    CanonicalHeader, canonical_checksum, checksum_bytes, export_canonical, import_canonical,
    verify_canonical,
};
pub use harness::{Fixture, FixtureBundle, FixtureOutcome, SolutionRunner, check_solution};
pub use query::{CatalogFilter, Pagination, QueryEngine, QueryPage, Relevance};
pub use store::{CatalogStats, CatalogStore, CategoryCount};

#[cfg(feature = "crypto-hash")]
pub use export::blake3_hash;
