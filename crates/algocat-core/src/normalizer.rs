//! # Normalizer Module
//!
//! Canonicalizes validated records before they enter the store.
//!
//! - Practice links deduplicated by URL, first occurrence kept
//! - Fixture expectations moved into `expectedOutput`
//! - Blank complexity strings dropped
//! - Repeated company tags removed
//!
//! Normalization never fails, is deterministic, and is idempotent.

use crate::types::{AlgorithmRecord, ProblemLink, TestCase};
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::AddAssign;

/// What a normalization pass changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NormalizationSummary {
    /// Practice links dropped as URL duplicates.
    pub links_removed: usize,
    /// Fixtures whose expectation was moved out of `output`.
    pub fixtures_renamed: usize,
    /// Complexity expectations with at least one blank entry dropped.
    pub complexity_cleared: usize,
    /// Repeated company tags dropped.
    pub tags_removed: usize,
}

impl NormalizationSummary {
    /// True when the pass changed nothing.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

impl AddAssign for NormalizationSummary {
    fn add_assign(&mut self, other: Self) {
        self.links_removed += other.links_removed;
        self.fixtures_renamed += other.fixtures_renamed;
        self.complexity_cleared += other.complexity_cleared;
        self.tags_removed += other.tags_removed;
    }
}

/// The Normalizer rewrites records into their canonical shape.
pub struct Normalizer;

impl Normalizer {
    /// Normalize a record.
    #[must_use]
    pub fn normalize(record: AlgorithmRecord) -> AlgorithmRecord {
        Self::normalize_with_summary(record).0
    }

    /// Normalize a record and report what changed.
    #[must_use]
    pub fn normalize_with_summary(
        mut record: AlgorithmRecord,
    ) -> (AlgorithmRecord, NormalizationSummary) {
        let mut summary = NormalizationSummary {
            links_removed: dedupe_links(&mut record.problems_to_solve.external)
                + dedupe_links(&mut record.problems_to_solve.internal),
            ..NormalizationSummary::default()
        };

        for case in &mut record.test_cases {
            if canonicalize_expected(case) {
                summary.fixtures_renamed += 1;
            }
            if clear_blank_complexity(case) {
                summary.complexity_cleared += 1;
            }
        }

        summary.tags_removed = dedupe_tags(&mut record.company_tags);

        (record, summary)
    }
}

/// Identity key of a practice link.
///
/// Surrounding whitespace and trailing slashes do not make a URL distinct.
fn url_key(url: &str) -> &str {
    url.trim().trim_end_matches('/')
}

fn dedupe_links(links: &mut Vec<ProblemLink>) -> usize {
    let before = links.len();
    let mut seen = BTreeSet::new();
    links.retain(|link| seen.insert(url_key(&link.url).to_string()));
    before - links.len()
}

/// Move the expectation into `expectedOutput`. Returns true if `output` was set.
///
/// When both are set, `expectedOutput` is kept and `output` is dropped.
fn canonicalize_expected(case: &mut TestCase) -> bool {
    let Some(output) = case.output.take() else {
        return false;
    };
    if case.expected_output.is_none() {
        case.expected_output = Some(output);
    }
    true
}

fn clear_blank_complexity(case: &mut TestCase) -> bool {
    let Some(complexity) = case.complexity_expected.as_mut() else {
        return false;
    };

    let mut cleared = false;
    for slot in [&mut complexity.time, &mut complexity.space] {
        if slot.as_deref().is_some_and(|s| s.trim().is_empty()) {
            *slot = None;
            cleared = true;
        }
    }
    if complexity.is_empty() {
        case.complexity_expected = None;
        cleared = true;
    }
    cleared
}

fn dedupe_tags(tags: &mut Vec<String>) -> usize {
    let before = tags.len();
    let mut seen = BTreeSet::new();
    tags.retain(|tag| seen.insert(tag.trim().to_string()));
    before - tags.len()
}

// =============================================================================
// TESTS
// =============================================================================
