//! # Test-Harness Interface
//!
//! Read-only view of a record's fixtures for an external execution sandbox.
//!
//! The core never runs code. A sandbox implements `SolutionRunner`; the core
//! hands it fixtures and compares what comes back with the canonical
//! expected value. Every fixture in a bundle already passed the
//! `inputSchema` arity check at load time.

use crate::store::CatalogStore;
use crate::types::{
    AlgorithmRecord, CatalogError, ComplexityExpectation, InputParam, Language, TestCase,
};
use serde::Serialize;
use serde_json::Value;

/// One fixture as exposed to a runner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture<'a> {
    /// Position in the record's `testCases`.
    pub index: usize,
    pub input: &'a Value,
    /// `None` when the fixture asserts nothing.
    pub expected: Option<&'a Value>,
    /// Advisory only; never compared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<&'a ComplexityExpectation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

impl<'a> Fixture<'a> {
    fn from_case(index: usize, case: &'a TestCase) -> Self {
        Self {
            index,
            input: &case.input,
            expected: case.expected(),
            complexity: case.complexity_expected.as_ref(),
            description: case.description.as_deref(),
        }
    }
}

/// Everything a sandbox needs to judge submissions for one topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureBundle<'a> {
    pub algorithm_id: &'a str,
    pub input_schema: &'a [InputParam],
    /// Languages with a reference implementation.
    pub languages: Vec<Language>,
    /// In `testCases` order.
    pub fixtures: Vec<Fixture<'a>>,
}

impl<'a> FixtureBundle<'a> {
    #[must_use]
    pub fn from_record(record: &'a AlgorithmRecord) -> Self {
        Self {
            algorithm_id: &record.id,
            input_schema: &record.input_schema,
            languages: record.languages(),
            fixtures: record
                .test_cases
                .iter()
                .enumerate()
                .map(|(index, case)| Fixture::from_case(index, case))
                .collect(),
        }
    }
}

impl CatalogStore {
    /// Fixture bundle for a record.
    pub fn fixtures(&self, id: &str) -> Result<FixtureBundle<'_>, CatalogError> {
        self.get(id).map(FixtureBundle::from_record)
    }
}

/// Execution seam implemented outside this crate by a sandbox.
pub trait SolutionRunner: Send + Sync {
    type Error;

    /// Run `source` in `language` on one fixture input and return its result.
    fn run(&self, language: Language, source: &str, fixture: &Fixture<'_>)
    -> Result<Value, Self::Error>;
}

/// Verdict for one fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum FixtureOutcome<E> {
    Passed { index: usize },
    Failed { index: usize, expected: Value, actual: Value },
    /// Ran, but the fixture asserts no expected value.
    Unchecked { index: usize },
    /// The runner itself failed.
    Errored { index: usize, error: E },
}

impl<E> FixtureOutcome<E> {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Passed { .. } | Self::Unchecked { .. })
    }
}

/// Run a candidate solution against every fixture in a bundle.
pub fn check_solution<R: SolutionRunner>(
    runner: &R,
    bundle: &FixtureBundle<'_>,
    language: Language,
    source: &str,
) -> Vec<FixtureOutcome<R::Error>> {
    bundle
        .fixtures
        .iter()
        .map(|fixture| {
            let index = fixture.index;
            match (runner.run(language, source, fixture), fixture.expected) {
                (Err(error), _) => FixtureOutcome::Errored { index, error },
                (Ok(_), None) => FixtureOutcome::Unchecked { index },
                (Ok(actual), Some(expected)) if actual == *expected => {
                    FixtureOutcome::Passed { index }
                }
                (Ok(actual), Some(expected)) => FixtureOutcome::Failed {
                    index,
                    expected: expected.clone(),
                    actual,
                },
            }
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
