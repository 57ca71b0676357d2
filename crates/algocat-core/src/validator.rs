//! # Validator Module
//!
//! Pure load-time checks that turn one raw JSON record into a typed
//! `AlgorithmRecord`, or into the full list of reasons it was refused.
//!
//! - Required-field presence
//! - Enum membership (`difficulty`, `listType`, `implementations[].lang`, tutorial `type`)
//! - Fixture input arity against `inputSchema`
//! - Catalog-wide id uniqueness (`Validator::check_unique_ids`)
//!
//! Every error in a record is collected; validation never stops at the first.

use crate::primitives::MAX_ID_LENGTH;
use crate::types::{
    AlgorithmRecord, CodeBlock, ComplexityExpectation, DataQualityWarning, Difficulty, Explanation,
    Implementation, InputParam, Language, ListType, ProblemsToSolve, TestCase, Tutorial,
    ValidationError,
};
use crate::usage::{CompletionGraph, UsageCounters};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A record that passed validation, plus any data-quality findings.
///
/// Fixture warnings describe the record and are found again when the record
/// is serialized and validated a second time. `NonCanonicalListType`
/// describes the raw spelling only; the typed record always serializes the
/// declared spelling, so that warning does not survive a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecord {
    pub record: AlgorithmRecord,
    pub warnings: Vec<DataQualityWarning>,
}

/// The Validator checks raw records against the catalog schema.
pub struct Validator;

impl Validator {
    /// Validate one raw record.
    ///
    /// Returns the typed record when every check passes, otherwise every
    /// `ValidationError` found, in field order.
    pub fn validate(raw: &Value) -> Result<ValidRecord, Vec<ValidationError>> {
        let Some(obj) = raw.as_object() else {
            return Err(vec![ValidationError::WrongType {
                field: "record".to_string(),
                expected: "object".to_string(),
            }]);
        };

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut reader = FieldReader::root(obj, &mut errors);

        let id = reader
            .required_string("id")
            .and_then(|id| reader.checked_id(id));
        let name = reader.required_string("name");
        let title = reader.required_string("title");
        let category = reader.required_string("category");
        let difficulty = reader.enum_field("difficulty", Difficulty::parse, Difficulty::NAMES);
        let list_type = reader.list_type(&mut warnings);

        let explanation: Explanation =
            reader.optional("explanation", "object with problemStatement, steps, useCase, tips");

        let mut implementations = Vec::new();
        for (_, path, item) in reader.each_object("implementations") {
            let mut item = reader.nested(item, path);
            let lang = item.enum_field("lang", Language::parse, Language::NAMES);
            let code: Vec<CodeBlock> = item.optional("code", "array of {codeType, code}");
            if let Some(lang) = lang {
                implementations.push(Implementation { lang, code });
            }
        }

        let mut fixtures = Vec::new();
        for (index, path, item) in reader.each_object("testCases") {
            let mut item = reader.nested(item, path);
            let input = item.required_value("input");
            let output = item.optional_value("output").cloned();
            let expected_output = item.optional_value("expectedOutput").cloned();
            let complexity_expected: Option<ComplexityExpectation> =
                item.optional("complexityExpected", "object with time, space");
            let description: Option<String> = item.optional("description", "string");

            match (&output, &expected_output) {
                (Some(_), Some(_)) => {
                    warnings.push(DataQualityWarning::BothExpectedFields { fixture: index });
                }
                (None, None) => warnings.push(DataQualityWarning::NoExpectedValue { fixture: index }),
                _ => {}
            }

            if let Some(input) = input {
                fixtures.push((
                    index,
                    TestCase {
                        input: input.clone(),
                        output,
                        expected_output,
                        complexity_expected,
                        description,
                    },
                ));
            }
        }

        let input_schema: Vec<InputParam> =
            reader.optional("inputSchema", "array of {name, type}");
        if !input_schema.is_empty() {
            for (index, case) in &fixtures {
                if let Err(detail) = check_arity(&input_schema, &case.input) {
                    reader.push(ValidationError::SchemaMismatch {
                        field: format!("testCases[{index}].input"),
                        detail,
                    });
                }
            }
        }

        let problems_to_solve: ProblemsToSolve = reader.optional(
            "problemsToSolve",
            "object with internal and external link arrays",
        );

        let mut tutorials = Vec::new();
        for (_, path, item) in reader.each_object("tutorials") {
            let mut item = reader.nested(item, path);
            if let Some(tutorial) = item.tutorial() {
                tutorials.push(tutorial);
            }
        }

        let image_urls: Vec<String> = reader.optional("imageUrls", "array of strings");
        let company_tags: Vec<String> = reader.optional("companyTags", "array of strings");
        let common_notes: Vec<String> = reader.optional("commonNotes", "array of strings");
        let usage = UsageCounters {
            likes: reader.optional("likes", "non-negative integer"),
            dislikes: reader.optional("dislikes", "non-negative integer"),
            share_count: reader.optional("shareCount", "non-negative integer"),
        };
        let user_completion_graph_data: CompletionGraph = reader.optional(
            "userCompletionGraphData",
            "object with attempted, completed",
        );

        match (id, name, title, category, difficulty, list_type) {
            (Some(id), Some(name), Some(title), Some(category), Some(difficulty), Some(list_type))
                if errors.is_empty() =>
            {
                Ok(ValidRecord {
                    record: AlgorithmRecord {
                        id,
                        name,
                        title,
                        category,
                        difficulty,
                        list_type,
                        explanation,
                        implementations,
                        test_cases: fixtures.into_iter().map(|(_, case)| case).collect(),
                        input_schema,
                        problems_to_solve,
                        tutorials,
                        image_urls,
                        company_tags,
                        common_notes,
                        usage,
                        user_completion_graph_data,
                    },
                    warnings,
                })
            }
            _ => Err(errors),
        }
    }

    /// Check that no two raw records share an id.
    ///
    /// Records without a readable string id are skipped here; per-record
    /// validation reports them. The first repeated id found is returned.
    pub fn check_unique_ids(raws: &[Value]) -> Result<(), ValidationError> {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for (index, raw) in raws.iter().enumerate() {
            let Some(id) = raw.get("id").and_then(Value::as_str) else {
                continue;
            };
            if let Some(&first_index) = seen.get(id) {
                return Err(ValidationError::DuplicateId {
                    id: id.to_string(),
                    first_index,
                    second_index: index,
                });
            }
            seen.insert(id, index);
        }
        Ok(())
    }
}

/// Compare a fixture input against the declared parameters.
///
/// - Single declared parameter: any value is that argument. An object is
///   read as named arguments only when its one key is the parameter name
/// - Object input: named arguments; keys must be exactly the parameter names
/// - Array input: positional arguments; length must match
fn check_arity(schema: &[InputParam], input: &Value) -> Result<(), String> {
    let declared = schema.len();
    let mismatch =
        |found: usize| format!("input has {found} argument(s), inputSchema declares {declared}");

    match input {
        _ if declared == 1 => Ok(()),
        Value::Object(args) => {
            if args.len() != declared {
                return Err(mismatch(args.len()));
            }
            match schema.iter().find(|p| !args.contains_key(&p.name)) {
                Some(param) => Err(format!("input is missing parameter `{}`", param.name)),
                None => Ok(()),
            }
        }
        Value::Array(args) if args.len() == declared => Ok(()),
        Value::Array(args) => Err(mismatch(args.len())),
        _ => Err(mismatch(1)),
    }
}

// =============================================================================
// FIELD READER
// =============================================================================

/// Reads fields of one JSON object, recording errors against full field paths.
struct FieldReader<'a, 'e> {
    obj: &'a Map<String, Value>,
    path: String,
    errors: &'e mut Vec<ValidationError>,
}

impl<'a, 'e> FieldReader<'a, 'e> {
    fn root(obj: &'a Map<String, Value>, errors: &'e mut Vec<ValidationError>) -> Self {
        Self {
            obj,
            path: String::new(),
            errors,
        }
    }

    /// Reader for a child object sharing this reader's error list.
    fn nested<'r>(&'r mut self, obj: &'a Map<String, Value>, path: String) -> FieldReader<'a, 'r> {
        FieldReader {
            obj,
            path,
            errors: &mut *self.errors,
        }
    }

    fn field(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    fn missing(&mut self, key: &str) {
        let field = self.field(key);
        self.push(ValidationError::MissingField { field });
    }

    fn wrong_type(&mut self, key: &str, expected: &str) {
        let field = self.field(key);
        self.push(ValidationError::WrongType {
            field,
            expected: expected.to_string(),
        });
    }

    /// Present, non-null value.
    fn optional_value(&self, key: &str) -> Option<&'a Value> {
        self.obj.get(key).filter(|v| !v.is_null())
    }

    fn required_value(&mut self, key: &str) -> Option<&'a Value> {
        let value = self.optional_value(key);
        if value.is_none() {
            self.missing(key);
        }
        value
    }

    /// Present, non-blank string.
    fn required_string(&mut self, key: &str) -> Option<String> {
        match self.optional_value(key) {
            None => {
                self.missing(key);
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.missing(key);
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.wrong_type(key, "string");
                None
            }
        }
    }

    /// Absent or null fields read as the type's default.
    fn optional<T: DeserializeOwned + Default>(&mut self, key: &str, expected: &str) -> T {
        match self.optional_value(key) {
            None => T::default(),
            Some(value) => match T::deserialize(value) {
                Ok(parsed) => parsed,
                Err(_) => {
                    self.wrong_type(key, expected);
                    T::default()
                }
            },
        }
    }

    fn enum_field<E>(
        &mut self,
        key: &str,
        parse: impl Fn(&str) -> Option<E>,
        allowed: &'static [&'static str],
    ) -> Option<E> {
        let value = self.required_string(key)?;
        let parsed = parse(&value);
        if parsed.is_none() {
            let field = self.field(key);
            self.push(ValidationError::InvalidEnum {
                field,
                value,
                allowed,
            });
        }
        parsed
    }

    /// `listType`: exact spellings pass, case-only variants pass with a warning.
    fn list_type(&mut self, warnings: &mut Vec<DataQualityWarning>) -> Option<ListType> {
        let value = self.required_string("listType")?;
        if let Some(list_type) = ListType::parse(&value) {
            return Some(list_type);
        }
        match ListType::parse_case_insensitive(&value) {
            Some(canonical) => {
                warnings.push(DataQualityWarning::NonCanonicalListType { value, canonical });
                Some(canonical)
            }
            None => {
                let field = self.field("listType");
                self.push(ValidationError::InvalidEnum {
                    field,
                    value,
                    allowed: ListType::NAMES,
                });
                None
            }
        }
    }

    fn checked_id(&mut self, id: String) -> Option<String> {
        if id.len() > MAX_ID_LENGTH || id.chars().any(char::is_whitespace) {
            self.wrong_type(
                "id",
                &format!("slug without whitespace, at most {MAX_ID_LENGTH} bytes"),
            );
            return None;
        }
        Some(id)
    }

    /// Object elements of an optional array, with their index and path.
    ///
    /// Non-object elements are reported and skipped.
    fn each_object(&mut self, key: &str) -> Vec<(usize, String, &'a Map<String, Value>)> {
        let items = match self.optional_value(key) {
            None => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.wrong_type(key, "array");
                return Vec::new();
            }
        };

        let mut objects = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let path = format!("{}[{index}]", self.field(key));
            match item.as_object() {
                Some(obj) => objects.push((index, path, obj)),
                None => self.push(ValidationError::WrongType {
                    field: path,
                    expected: "object".to_string(),
                }),
            }
        }
        objects
    }

    /// Read this object as a tagged tutorial.
    fn tutorial(&mut self) -> Option<Tutorial> {
        let kind = self.required_string("type")?;
        if !Tutorial::KINDS.contains(&kind.as_str()) {
            let field = self.field("type");
            self.push(ValidationError::InvalidEnum {
                field,
                value: kind,
                allowed: Tutorial::KINDS,
            });
            return None;
        }

        match Tutorial::deserialize(&Value::Object(self.obj.clone())) {
            Ok(tutorial) => Some(tutorial),
            Err(_) => {
                let field = self.path.clone();
                self.push(ValidationError::WrongType {
                    field,
                    expected: format!("{kind} tutorial with title, url and typed examples"),
                });
                None
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
