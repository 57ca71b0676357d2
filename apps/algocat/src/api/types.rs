//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//! Full records and fixture bundles are served in their core wire form.

use algocat_core::{
    AlgorithmRecord, CatalogFilter, CatalogStats, CategoryCount, Difficulty, Language, ListType,
    Pagination, primitives::DEFAULT_PAGE_SIZE,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Catalog status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub record_count: usize,
    pub category_count: usize,
    pub fixture_count: usize,
    pub implementation_count: usize,
    pub by_difficulty: BTreeMap<String, usize>,
    pub by_list_type: BTreeMap<String, usize>,
    /// Records dropped by validation when the catalog was loaded.
    pub rejected_count: usize,
    pub warning_count: usize,
}

impl StatusResponse {
    pub fn new(stats: CatalogStats, rejected_count: usize, warning_count: usize) -> Self {
        Self {
            record_count: stats.record_count,
            category_count: stats.category_count,
            fixture_count: stats.fixture_count,
            implementation_count: stats.implementation_count,
            by_difficulty: stats
                .by_difficulty
                .into_iter()
                .map(|(d, n)| (d.as_str().to_string(), n))
                .collect(),
            by_list_type: stats
                .by_list_type
                .into_iter()
                .map(|(l, n)| (l.as_str().to_string(), n))
                .collect(),
            rejected_count,
            warning_count,
        }
    }
}

// =============================================================================
// ALGORITHM LISTING
// =============================================================================

/// Query string of `GET /algorithms`.
///
/// Unknown enum values are passed through and yield an empty page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    #[serde(rename = "listType", alias = "list_type")]
    pub list_type: Option<String>,
    pub tag: Option<String>,
    pub q: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    /// A filter key appeared more than once; the page is empty.
    #[serde(skip)]
    pub malformed: bool,
}

impl ListParams {
    /// Build from raw query pairs. Never fails.
    ///
    /// Unknown keys are ignored. A repeated filter key marks the params
    /// malformed. Paging values that do not parse as `usize` keep their
    /// default.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut params.category,
                "difficulty" => &mut params.difficulty,
                "listType" | "list_type" => &mut params.list_type,
                "tag" => &mut params.tag,
                "q" => &mut params.q,
                "offset" => {
                    params.offset = value.trim().parse().ok().or(params.offset);
                    continue;
                }
                "limit" => {
                    params.limit = value.trim().parse().ok().or(params.limit);
                    continue;
                }
                _ => continue,
            };
            if slot.replace(value).is_some() {
                params.malformed = true;
            }
        }
        params
    }

    pub fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            category: self.category.clone(),
            difficulty: self.difficulty.clone(),
            list_type: self.list_type.clone(),
            tag: self.tag.clone(),
            text: self.q.clone(),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.offset.unwrap_or(0),
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// Compact view of a record for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub list_type: ListType,
    pub languages: Vec<Language>,
    pub company_tags: Vec<String>,
    pub fixture_count: usize,
}

impl From<&AlgorithmRecord> for AlgorithmSummary {
    fn from(record: &AlgorithmRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            category: record.category.clone(),
            difficulty: record.difficulty,
            list_type: record.list_type,
            languages: record.languages(),
            company_tags: record.company_tags.clone(),
            fixture_count: record.test_cases.len(),
        }
    }
}

/// One page of `GET /algorithms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub items: Vec<AlgorithmSummary>,
}

impl ListResponse {
    /// A page with no matches.
    pub fn empty(pagination: Pagination) -> Self {
        Self {
            total: 0,
            offset: pagination.offset,
            limit: pagination.limit,
            items: Vec::new(),
        }
    }
}

// =============================================================================
// CATEGORIES / HASH / ERROR
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub category: String,
    pub count: usize,
}

impl From<CategoryCount> for CategoryEntry {
    fn from(c: CategoryCount) -> Self {
        Self {
            category: c.category,
            count: c.count,
        }
    }
}

/// Fingerprint of the canonical export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashResponse {
    pub record_count: usize,
    pub checksum: u64,
    pub blake3: String,
}

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
