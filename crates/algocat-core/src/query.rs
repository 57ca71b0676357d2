//! # Query Module
//!
//! Filtered, ranked, paginated reads over a `CatalogStore`.
//!
//! - Filters compose by intersection of index postings
//! - Ordering is relevance first, then id
//! - Unknown or malformed filter values match nothing; a query never fails

use crate::primitives::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MAX_QUERY_TEXT_LENGTH};
use crate::store::CatalogStore;
use crate::types::{AlgorithmRecord, Difficulty, ListType};
use serde::Serialize;

/// Composable record filter. Unset fields do not constrain the result.
///
/// Values are kept as the caller wrote them; parsing happens at query time
/// so a bad value narrows to empty instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    /// Exact, case-sensitive category name.
    pub category: Option<String>,
    /// Exact catalog spelling, e.g. `easy`.
    pub difficulty: Option<String>,
    /// Exact catalog spelling, e.g. `blind75`.
    pub list_type: Option<String>,
    /// Company tag, case-insensitive.
    pub tag: Option<String>,
    /// Free text, matched case-insensitively against title and problem statement.
    pub text: Option<String>,
}

impl CatalogFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    #[must_use]
    pub fn list_type(mut self, list_type: impl Into<String>) -> Self {
        self.list_type = Some(list_type.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Page window over an ordered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl Pagination {
    /// `limit` is clamped to `1..=MAX_PAGE_SIZE`; 0 selects `DEFAULT_PAGE_SIZE`.
    #[must_use]
    pub fn new(offset: usize, limit: usize) -> Self {
        let limit = if limit == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            limit.min(MAX_PAGE_SIZE)
        };
        Self { offset, limit }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// How well a record matched the free-text term. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    ExactTitle,
    TitleContains,
    StatementContains,
    /// No text filter was given.
    Unranked,
}

/// One page of query results.
#[derive(Debug, Clone, Serialize)]
pub struct QueryPage<'a> {
    /// Matching records before pagination.
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub records: Vec<&'a AlgorithmRecord>,
}

/// Runs filters against one store.
pub struct QueryEngine<'a> {
    store: &'a CatalogStore,
}

impl<'a> QueryEngine<'a> {
    #[must_use]
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    /// Run a query. Same store, filter and page always give the same page.
    #[must_use]
    pub fn query(&self, filter: &CatalogFilter, page: Pagination) -> QueryPage<'a> {
        let ranked = self.ranked(filter);
        let total = ranked.len();
        let records = ranked
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .filter_map(|(_, pos)| self.store.record_at(pos))
            .collect();

        QueryPage {
            total,
            offset: page.offset,
            limit: page.limit,
            records,
        }
    }

    /// Count matches without materializing a page.
    #[must_use]
    pub fn count(&self, filter: &CatalogFilter) -> usize {
        self.ranked(filter).len()
    }

    /// All matching arena positions with their relevance, in result order.
    fn ranked(&self, filter: &CatalogFilter) -> Vec<(Relevance, usize)> {
        let Some(candidates) = self.candidates(filter) else {
            return Vec::new();
        };

        let text = filter
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let mut ranked: Vec<(Relevance, usize)> = match text {
            None => candidates
                .into_iter()
                .map(|pos| (Relevance::Unranked, pos))
                .collect(),
            Some(text) if text.len() > MAX_QUERY_TEXT_LENGTH => return Vec::new(),
            Some(text) => {
                let needle = text.to_lowercase();
                candidates
                    .into_iter()
                    .filter_map(|pos| {
                        let record = self.store.record_at(pos)?;
                        relevance(record, &needle).map(|r| (r, pos))
                    })
                    .collect()
            }
        };

        // Arena positions follow id order, so this ties on id.
        ranked.sort_unstable();
        ranked
    }

    /// Arena positions passing every index filter, ascending.
    ///
    /// `None` means some filter value is unknown and nothing can match.
    fn candidates(&self, filter: &CatalogFilter) -> Option<Vec<usize>> {
        let mut postings: Vec<&[usize]> = Vec::new();

        if let Some(category) = filter.category.as_deref() {
            postings.push(self.store.category_postings(category)?);
        }
        if let Some(difficulty) = filter.difficulty.as_deref() {
            postings.push(self.store.difficulty_postings(Difficulty::parse(difficulty)?));
        }
        if let Some(list_type) = filter.list_type.as_deref() {
            postings.push(self.store.list_type_postings(ListType::parse(list_type)?));
        }
        if let Some(tag) = filter.tag.as_deref() {
            postings.push(self.store.tag_postings(tag)?);
        }

        if postings.is_empty() {
            return Some((0..self.store.len()).collect());
        }

        postings.sort_by_key(|p| p.len());
        let (shortest, rest) = postings.split_first()?;
        Some(
            shortest
                .iter()
                .copied()
                .filter(|pos| rest.iter().all(|p| p.binary_search(pos).is_ok()))
                .collect(),
        )
    }
}

/// Rank a record against a lowercased needle. `None` if it does not match.
fn relevance(record: &AlgorithmRecord, needle: &str) -> Option<Relevance> {
    let title = record.title.to_lowercase();
    if title.trim() == needle {
        Some(Relevance::ExactTitle)
    } else if title.contains(needle) {
        Some(Relevance::TitleContains)
    } else if record
        .explanation
        .problem_statement
        .to_lowercase()
        .contains(needle)
    {
        Some(Relevance::StatementContains)
    } else {
        None
    }
}

impl CatalogStore {
    /// Shorthand for `QueryEngine::new(self).query(filter, page)`.
    #[must_use]
    pub fn query(&self, filter: &CatalogFilter, page: Pagination) -> QueryPage<'_> {
        QueryEngine::new(self).query(filter, page)
    }
}

// =============================================================================
// TESTS
// =============================================================================
