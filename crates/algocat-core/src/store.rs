//! # Catalog Store
//!
//! The immutable, indexed in-memory collection of validated records.
//!
//! Records live in an arena sorted by id. Every index maps a key to an
//! ascending list of arena positions, so walking any posting list visits
//! records in id order. Nothing here mutates after `CatalogStore::build`;
//! a dataset change means building a new store.

use crate::primitives::MAX_CATALOG_RECORDS;
use crate::types::{AlgorithmRecord, CatalogError, Difficulty, ListType, ValidationError};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Ascending arena positions.
type Postings = Vec<usize>;

/// The immutable catalog.
///
/// Only the id lookup is hashed, for constant-time `get`; it is never
/// iterated. Secondary indices are `BTreeMap`s and iterate in key order.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    /// Arena of records, sorted by id.
    records: Vec<AlgorithmRecord>,
    by_id: HashMap<String, usize>,
    by_category: BTreeMap<String, Postings>,
    by_difficulty: BTreeMap<Difficulty, Postings>,
    by_list_type: BTreeMap<ListType, Postings>,
    /// Keyed by lowercased company tag.
    by_tag: BTreeMap<String, Postings>,
}

/// Number of records in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Aggregate counts over the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub record_count: usize,
    pub category_count: usize,
    pub fixture_count: usize,
    pub implementation_count: usize,
    pub by_difficulty: BTreeMap<Difficulty, usize>,
    pub by_list_type: BTreeMap<ListType, usize>,
}

impl CatalogStore {
    /// Build the store and all indices from validated, normalized records.
    ///
    /// Fails with `LoadAborted(DuplicateId)` if two records share an id, and
    /// with `TooManyRecords` above `MAX_CATALOG_RECORDS`.
    pub fn build(mut records: Vec<AlgorithmRecord>) -> Result<Self, CatalogError> {
        if records.len() > MAX_CATALOG_RECORDS {
            return Err(CatalogError::TooManyRecords {
                count: records.len(),
                max: MAX_CATALOG_RECORDS,
            });
        }

        let mut first_seen: BTreeMap<&str, usize> = BTreeMap::new();
        for (index, record) in records.iter().enumerate() {
            if let Some(&first_index) = first_seen.get(record.id.as_str()) {
                return Err(CatalogError::LoadAborted(ValidationError::DuplicateId {
                    id: record.id.clone(),
                    first_index,
                    second_index: index,
                }));
            }
            first_seen.insert(&record.id, index);
        }

        records.sort_by(|a, b| a.id.cmp(&b.id));

        let mut store = Self {
            by_id: HashMap::with_capacity(records.len()),
            ..Self::default()
        };
        for (pos, record) in records.iter().enumerate() {
            store.by_id.insert(record.id.clone(), pos);
            store
                .by_category
                .entry(record.category.clone())
                .or_default()
                .push(pos);
            store
                .by_difficulty
                .entry(record.difficulty)
                .or_default()
                .push(pos);
            store
                .by_list_type
                .entry(record.list_type)
                .or_default()
                .push(pos);

            let mut tags: Vec<String> = record
                .company_tags
                .iter()
                .map(|t| tag_key(t))
                .filter(|t| !t.is_empty())
                .collect();
            tags.sort();
            tags.dedup();
            for tag in tags {
                store.by_tag.entry(tag).or_default().push(pos);
            }
        }
        store.records = records;

        Ok(store)
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Result<&AlgorithmRecord, CatalogError> {
        self.by_id
            .get(id)
            .and_then(|&pos| self.records.get(pos))
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmRecord> {
        self.records.iter()
    }

    /// Ids of records in a category, in id order.
    pub fn ids_in_category<'s>(&'s self, category: &str) -> impl Iterator<Item = &'s str> {
        self.resolve(self.category_postings(category).unwrap_or_default())
            .map(|r| r.id.as_str())
    }

    /// Ids of records with a difficulty, in id order.
    pub fn ids_with_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &str> {
        self.resolve(self.difficulty_postings(difficulty))
            .map(|r| r.id.as_str())
    }

    /// Ids of records on a list, in id order.
    pub fn ids_on_list(&self, list_type: ListType) -> impl Iterator<Item = &str> {
        self.resolve(self.list_type_postings(list_type))
            .map(|r| r.id.as_str())
    }

    /// Ids of records carrying a company tag (case-insensitive), in id order.
    pub fn ids_with_tag<'s>(&'s self, tag: &str) -> impl Iterator<Item = &'s str> {
        self.resolve(self.tag_postings(tag).unwrap_or_default())
            .map(|r| r.id.as_str())
    }

    /// Categories with their record counts, sorted by category name.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryCount> {
        self.by_category
            .iter()
            .map(|(category, postings)| CategoryCount {
                category: category.clone(),
                count: postings.len(),
            })
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            record_count: self.records.len(),
            category_count: self.by_category.len(),
            fixture_count: self.records.iter().map(|r| r.test_cases.len()).sum(),
            implementation_count: self.records.iter().map(|r| r.implementations.len()).sum(),
            by_difficulty: self
                .by_difficulty
                .iter()
                .map(|(d, postings)| (*d, postings.len()))
                .collect(),
            by_list_type: self
                .by_list_type
                .iter()
                .map(|(l, postings)| (*l, postings.len()))
                .collect(),
        }
    }

    // -------------------------------------------------------------------------
    // Index access for the query engine
    // -------------------------------------------------------------------------

    pub(crate) fn record_at(&self, pos: usize) -> Option<&AlgorithmRecord> {
        self.records.get(pos)
    }

    /// `None` when the category is unknown.
    pub(crate) fn category_postings(&self, category: &str) -> Option<&[usize]> {
        self.by_category.get(category).map(Vec::as_slice)
    }

    pub(crate) fn difficulty_postings(&self, difficulty: Difficulty) -> &[usize] {
        self.by_difficulty
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn list_type_postings(&self, list_type: ListType) -> &[usize] {
        self.by_list_type
            .get(&list_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `None` when no record carries the tag.
    pub(crate) fn tag_postings(&self, tag: &str) -> Option<&[usize]> {
        self.by_tag.get(&tag_key(tag)).map(Vec::as_slice)
    }

    fn resolve<'s>(&'s self, postings: &'s [usize]) -> impl Iterator<Item = &'s AlgorithmRecord> {
        postings.iter().filter_map(|&pos| self.records.get(pos))
    }
}

/// Tag index key: trimmed and lowercased.
fn tag_key(tag: &str) -> String {
    tag.trim().to_lowercase()
}

// =============================================================================
// TESTS
// =============================================================================
