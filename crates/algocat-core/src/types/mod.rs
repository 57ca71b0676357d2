//! # Catalog Schema
//!
//! This module contains the type contract every catalog record satisfies:
//! - Enumerated values (`Difficulty`, `ListType`, `Language`)
//! - The record itself (`AlgorithmRecord`) and its sub-records
//! - Tagged tutorial variants (`Tutorial`)
//! - Error and warning types (`CatalogError`, `ValidationError`, `DataQualityWarning`)
//!
//! ## Wire Shape
//!
//! Field names serialize in camelCase exactly as the catalog file authors them,
//! so a validated record can be written back out and validated again.

use crate::usage::{CompletionGraph, UsageCounters};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

// =============================================================================
// DIFFICULTY
// =============================================================================

/// Difficulty grade of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "easy")]
    Easy,
    #[serde(rename = "intermediate")]
    Intermediate,
    #[serde(rename = "advance")]
    Advance,
    /// Placeholder grade for topics whose difficulty was never assigned.
    #[serde(rename = "MandatoryTODO")]
    MandatoryTodo,
}

impl Difficulty {
    /// Every difficulty, in grading order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Intermediate,
        Difficulty::Advance,
        Difficulty::MandatoryTodo,
    ];

    /// Accepted spellings, in grading order.
    pub const NAMES: &'static [&'static str] = &["easy", "intermediate", "advance", "MandatoryTODO"];

    /// The spelling used in catalog files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Intermediate => "intermediate",
            Self::Advance => "advance",
            Self::MandatoryTodo => "MandatoryTODO",
        }
    }

    /// Parse an exact catalog spelling.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// =============================================================================
// LIST TYPE
// =============================================================================

/// Curriculum list a topic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ListType {
    #[serde(rename = "coreAlgo")]
    CoreAlgo,
    #[serde(rename = "blind75")]
    Blind75,
    #[serde(rename = "core+Blind75")]
    CoreAndBlind75,
}

impl ListType {
    pub const ALL: [ListType; 3] = [ListType::CoreAlgo, ListType::Blind75, ListType::CoreAndBlind75];

    pub const NAMES: &'static [&'static str] = &["coreAlgo", "blind75", "core+Blind75"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CoreAlgo => "coreAlgo",
            Self::Blind75 => "blind75",
            Self::CoreAndBlind75 => "core+Blind75",
        }
    }

    /// Parse an exact catalog spelling.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }

    /// Match a spelling that differs from a declared value only in ASCII case.
    ///
    /// Used by the validator to accept-and-flag spellings such as `Blind75`.
    #[must_use]
    pub fn parse_case_insensitive(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// =============================================================================
// LANGUAGE
// =============================================================================

/// Language of an implementation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "java")]
    Java,
    #[serde(rename = "typeScript")]
    TypeScript,
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "cpp")]
    Cpp,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Java,
        Language::TypeScript,
        Language::Python,
        Language::Cpp,
    ];

    pub const NAMES: &'static [&'static str] = &["java", "typeScript", "python", "cpp"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::TypeScript => "typeScript",
            Self::Python => "python",
            Self::Cpp => "cpp",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// =============================================================================
// EXPLANATION
// =============================================================================

/// Problem statement and walkthrough. Every part may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    #[serde(default)]
    pub problem_statement: String,
    /// Ordered solution steps.
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub use_case: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl Explanation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.problem_statement.is_empty()
            && self.steps.is_empty()
            && self.use_case.is_empty()
            && self.tips.is_empty()
    }
}

// =============================================================================
// IMPLEMENTATIONS
// =============================================================================

/// One code sample, tagged by its role (e.g. "optimize", "starter").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    pub code_type: String,
    pub code: String,
}

/// Per-language code sample set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implementation {
    pub lang: Language,
    #[serde(default)]
    pub code: Vec<CodeBlock>,
}

impl Implementation {
    /// Find the block with the given `codeType`.
    #[must_use]
    pub fn block(&self, code_type: &str) -> Option<&CodeBlock> {
        self.code.iter().find(|b| b.code_type == code_type)
    }
}

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// Advisory time/space complexity for a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComplexityExpectation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
}

impl ComplexityExpectation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_none() && self.space.is_none()
    }
}

/// A test fixture as authored.
///
/// Authored fixtures use either `output` or `expectedOutput`. After
/// normalization only `expectedOutput` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub input: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_expected: Option<ComplexityExpectation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TestCase {
    /// The asserted result, whichever field carries it.
    ///
    /// `expectedOutput` wins when an unnormalized fixture sets both.
    #[must_use]
    pub fn expected(&self) -> Option<&Value> {
        self.expected_output.as_ref().or(self.output.as_ref())
    }
}

/// Named, typed parameter of the function under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputParam {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

// =============================================================================
// PRACTICE LINKS
// =============================================================================

/// Link to a practice problem (internal page or third-party judge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemLink {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProblemsToSolve {
    #[serde(default)]
    pub internal: Vec<ProblemLink>,
    #[serde(default)]
    pub external: Vec<ProblemLink>,
}

// =============================================================================
// TUTORIALS
// =============================================================================

/// Chapter marker inside a video tutorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoChapter {
    pub timestamp: String,
    pub label: String,
}

/// Code excerpt shown alongside an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub lang: Language,
    pub code: String,
}

/// Input/output pair stepped through by an interactive visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkedExample {
    pub input: Value,
    pub output: Value,
}

/// Tutorial link. Each tutorial type carries its own `examples` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Tutorial {
    Video {
        title: String,
        url: String,
        #[serde(default)]
        examples: Vec<VideoChapter>,
    },
    Article {
        title: String,
        url: String,
        #[serde(default)]
        examples: Vec<CodeSnippet>,
    },
    Interactive {
        title: String,
        url: String,
        #[serde(default)]
        examples: Vec<WorkedExample>,
    },
}

impl Tutorial {
    /// Accepted `type` tags.
    pub const KINDS: &'static [&'static str] = &["video", "article", "interactive"];

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Video { .. } => "video",
            Self::Article { .. } => "article",
            Self::Interactive { .. } => "interactive",
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Video { title, .. } | Self::Article { title, .. } | Self::Interactive { title, .. } => {
                title
            }
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Video { url, .. } | Self::Article { url, .. } | Self::Interactive { url, .. } => url,
        }
    }
}

// =============================================================================
// ALGORITHM RECORD
// =============================================================================

/// One catalog entry describing a single algorithm topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmRecord {
    pub id: String,
    pub name: String,
    pub title: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub list_type: ListType,
    #[serde(default)]
    pub explanation: Explanation,
    #[serde(default)]
    pub implementations: Vec<Implementation>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_schema: Vec<InputParam>,
    #[serde(default)]
    pub problems_to_solve: ProblemsToSolve,
    #[serde(default)]
    pub tutorials: Vec<Tutorial>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub company_tags: Vec<String>,
    #[serde(default)]
    pub common_notes: Vec<String>,
    #[serde(flatten)]
    pub usage: UsageCounters,
    #[serde(default)]
    pub user_completion_graph_data: CompletionGraph,
}

impl AlgorithmRecord {
    /// Languages with an implementation, in declaration order.
    #[must_use]
    pub fn languages(&self) -> Vec<Language> {
        self.implementations.iter().map(|i| i.lang).collect()
    }

    /// Implementation for a language, if present.
    #[must_use]
    pub fn implementation(&self, lang: Language) -> Option<&Implementation> {
        self.implementations.iter().find(|i| i.lang == lang)
    }
}

// =============================================================================
// VALIDATION ERRORS & WARNINGS
// =============================================================================

/// A single reason a raw record was refused.
///
/// Field paths use `field[index].child` notation, e.g. `testCases[2].input`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// A required field is absent, null, or blank.
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    /// A field holds a value outside its enumerated set.
    #[error("invalid value `{value}` for `{field}` (allowed: {allowed:?})")]
    InvalidEnum {
        field: String,
        value: String,
        allowed: &'static [&'static str],
    },

    /// A field has a JSON shape that cannot be read as the declared type.
    #[error("`{field}` has the wrong shape: expected {expected}")]
    WrongType { field: String, expected: String },

    /// A fixture input does not agree with the declared `inputSchema`.
    #[error("`{field}` does not match inputSchema: {detail}")]
    SchemaMismatch { field: String, detail: String },

    /// Two raw records share an id. Only detectable across the whole catalog.
    #[error("duplicate id `{id}` at records {first_index} and {second_index}")]
    DuplicateId {
        id: String,
        first_index: usize,
        second_index: usize,
    },
}

/// A data-quality finding on a record that was still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// Fixture sets both `output` and `expectedOutput`.
    BothExpectedFields { fixture: usize },
    /// Fixture asserts no expected value at all.
    NoExpectedValue { fixture: usize },
    /// `listType` matched a declared value only after ignoring case.
    NonCanonicalListType { value: String, canonical: ListType },
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BothExpectedFields { fixture } => write!(
                f,
                "testCases[{fixture}] defines both output and expectedOutput"
            ),
            Self::NoExpectedValue { fixture } => {
                write!(f, "testCases[{fixture}] asserts no expected value")
            }
            Self::NonCanonicalListType { value, canonical } => write!(
                f,
                "listType `{value}` is not a declared value; read as `{canonical}`"
            ),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while loading or reading the catalog.
///
/// Per-record validation failures are not errors at this level; they are
/// collected in the load report. Only catalog-wide corruption aborts a load.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog as a whole is corrupt and no store was built.
    #[error("catalog load aborted: {0}")]
    LoadAborted(ValidationError),

    /// No record has the requested id.
    #[error("algorithm not found: {0}")]
    NotFound(String),

    /// The input holds more records than the store accepts.
    #[error("catalog holds {count} records, maximum is {max}")]
    TooManyRecords { count: usize, max: usize },

    /// The catalog document is not readable JSON of the expected outer shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// A serialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration could not be read or is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

// =============================================================================
// TESTS
// =============================================================================
