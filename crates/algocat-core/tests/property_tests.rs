//! # Property-Based Tests
//!
//! Determinism and correctness invariants of the load pipeline and queries,
//! checked over generated catalogs.

use algocat_core::{
    CatalogError, CatalogFilter, CatalogLoader, DataQualityWarning, Difficulty, Normalizer,
    Pagination, ValidationError, Validator,
};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use serde_json::{Value, json};
use std::collections::BTreeSet;

// =============================================================================
// STRATEGIES
// =============================================================================

fn difficulty() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["easy", "intermediate", "advance", "MandatoryTODO"])
}

fn list_type() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["coreAlgo", "blind75", "core+Blind75", "Blind75"])
}

fn category() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["Arrays & Strings", "Graphs", "Trees"])
}

fn tag() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["Amazon", "amazon", "Google", "Meta"])
}

/// Small URL pool so duplicates are common.
fn link() -> impl Strategy<Value = Value> {
    (0u8..4, any::<bool>(), "[A-Za-z ]{1,12}").prop_map(|(n, slash, title)| {
        let url = format!(
            "https://leetcode.com/problems/p{n}{}",
            if slash { "/" } else { "" }
        );
        json!({"type": "leetcode", "url": url, "title": title})
    })
}

fn test_case() -> impl Strategy<Value = Value> {
    (
        vec(-100i64..100, 0..4),
        option::of(-100i64..100),
        option::of(-100i64..100),
    )
        .prop_map(|(nums, output, expected)| {
            let mut case = json!({"input": {"nums": nums}});
            if let Some(output) = output {
                case["output"] = json!(output);
            }
            if let Some(expected) = expected {
                case["expectedOutput"] = json!(expected);
            }
            case
        })
}

fn raw_record(id: String) -> impl Strategy<Value = Value> {
    (
        "[A-Za-z][A-Za-z ]{0,19}",
        category(),
        difficulty(),
        list_type(),
        vec(tag(), 0..5),
        vec(link(), 0..6),
        vec(test_case(), 0..4),
        0u64..1000,
    )
        .prop_map(
            move |(title, category, difficulty, list_type, tags, links, cases, likes)| {
                json!({
                    "id": id.clone(),
                    "name": title.clone(),
                    "title": title,
                    "category": category,
                    "difficulty": difficulty,
                    "listType": list_type,
                    "explanation": {"problemStatement": "Search the array."},
                    "implementations": [{"lang": "python", "code": []}],
                    "inputSchema": [{"name": "nums", "type": "number[]"}],
                    "testCases": cases,
                    "problemsToSolve": {"internal": [], "external": links},
                    "companyTags": tags,
                    "likes": likes
                })
            },
        )
}

/// A catalog of records with distinct ids.
fn raw_catalog() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::btree_set("[a-z][a-z0-9-]{0,10}", 0..12)
        .prop_flat_map(|ids| ids.into_iter().map(raw_record).collect::<Vec<_>>())
}

fn filter() -> impl Strategy<Value = CatalogFilter> {
    (
        option::of(category()),
        option::of(difficulty()),
        option::of(tag()),
        option::of(prop::sample::select(vec!["search", "a", "zzz", ""])),
    )
        .prop_map(|(category, difficulty, tag, text)| CatalogFilter {
            category: category.map(str::to_string),
            difficulty: difficulty.map(str::to_string),
            list_type: None,
            tag: tag.map(str::to_string),
            text: text.map(str::to_string),
        })
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Normalizing twice is the same as normalizing once.
    #[test]
    fn normalization_is_idempotent(raw in raw_record("topic".to_string())) {
        let record = Validator::validate(&raw).expect("generated record is valid").record;
        let once = Normalizer::normalize(record);
        let twice = Normalizer::normalize(once.clone());
        prop_assert_eq!(once, twice);
    }

    /// A validated record survives serialize-then-validate unchanged.
    ///
    /// Fixture warnings describe the record and survive. A listType spelling
    /// warning describes the raw input only and is gone after one pass.
    #[test]
    fn validated_record_round_trips(raw in raw_record("topic".to_string())) {
        let first = Validator::validate(&raw).expect("generated record is valid");
        let serialized = serde_json::to_value(&first.record).expect("serialize");
        let second = Validator::validate(&serialized).expect("still valid");

        let spelled_canonically = !first
            .warnings
            .iter()
            .any(|w| matches!(w, DataQualityWarning::NonCanonicalListType { .. }));
        if spelled_canonically {
            prop_assert_eq!(&first, &second);
        } else {
            let record_warnings: Vec<_> = first
                .warnings
                .iter()
                .filter(|w| !matches!(w, DataQualityWarning::NonCanonicalListType { .. }))
                .cloned()
                .collect();
            prop_assert_eq!(&first.record, &second.record);
            prop_assert_eq!(record_warnings, second.warnings);
        }
    }

    /// Normalized links are unique by URL and fixtures carry only expectedOutput.
    #[test]
    fn normalized_records_are_canonical(raws in raw_catalog()) {
        let store = CatalogLoader::load(&raws).expect("load").store;
        for record in store.iter() {
            let urls: BTreeSet<_> = record
                .problems_to_solve
                .external
                .iter()
                .map(|l| l.url.trim_end_matches('/'))
                .collect();
            prop_assert_eq!(urls.len(), record.problems_to_solve.external.len());
            prop_assert!(record.test_cases.iter().all(|c| c.output.is_none()));
        }
    }

    /// Every generated record is accepted and findable by id.
    #[test]
    fn every_valid_record_is_stored(raws in raw_catalog()) {
        let outcome = CatalogLoader::load(&raws).expect("load");
        prop_assert!(outcome.report.is_complete());
        prop_assert_eq!(outcome.store.len(), raws.len());
        for raw in &raws {
            let id = raw["id"].as_str().expect("id");
            prop_assert!(outcome.store.get(id).is_ok());
        }
    }

    /// Repeating any id anywhere in the input aborts the load.
    #[test]
    fn repeated_id_aborts_load(raws in raw_catalog(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!raws.is_empty());
        let mut raws = raws;
        let copy = raws[pick.index(raws.len())].clone();
        raws.push(copy);

        let result = CatalogLoader::load(&raws);
        let is_duplicate_abort = matches!(
            result,
            Err(CatalogError::LoadAborted(ValidationError::DuplicateId { .. }))
        );
        prop_assert!(is_duplicate_abort);
    }

    /// Same store, filter and page always give the same page.
    #[test]
    fn query_is_deterministic(
        raws in raw_catalog(),
        filter in filter(),
        offset in 0usize..10,
        limit in 0usize..10,
    ) {
        let store = CatalogLoader::load(&raws).expect("load").store;
        let page = Pagination::new(offset, limit);

        let first: Vec<_> = store.query(&filter, page).records.iter().map(|r| r.id.clone()).collect();
        let second: Vec<_> = store.query(&filter, page).records.iter().map(|r| r.id.clone()).collect();
        prop_assert_eq!(first, second);
    }

    /// Every returned record satisfies the index filters, and the unranked order is by id.
    #[test]
    fn query_results_satisfy_filters(raws in raw_catalog(), filter in filter()) {
        let store = CatalogLoader::load(&raws).expect("load").store;
        let unranked = CatalogFilter { text: None, ..filter };
        let result = store.query(&unranked, Pagination::new(0, 100));

        prop_assert_eq!(result.total, result.records.len());
        for record in &result.records {
            if let Some(category) = &unranked.category {
                prop_assert_eq!(&record.category, category);
            }
            if let Some(difficulty) = &unranked.difficulty {
                prop_assert_eq!(Some(record.difficulty), Difficulty::parse(difficulty));
            }
            if let Some(tag) = &unranked.tag {
                prop_assert!(record.company_tags.iter().any(|t| t.eq_ignore_ascii_case(tag)));
            }
        }
        let ids: Vec<_> = result.records.iter().map(|r| r.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        prop_assert_eq!(ids, sorted);
    }
}
