//! Raw catalog JSON -> validated `Catalog`.
//!
//! Design goals:
//! - **Strict schema**: any missing or mistyped field fails the whole load,
//!   naming the institution, program and the value actually found
//! - **One merge step**: heterogeneous documents are merged by institution
//!   name before any validation or scoring happens
//! - **Declaration order** of institutions and programs is preserved

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{
    AverageRange, Catalog, CoopOption, DataShapeWarning, InstitutionRecord, Program, ProgramRequirements,
};
use crate::error::MatchError;

const EC_QUALITY: &str = "ec_quality";
const COOP: [&str; 3] = ["co-op", "coop_options", "coopOptions"];
const PROGRAMS: &str = "programs";
const RECOMMENDED_AVERAGE: [&str; 2] = ["recommended_average", "recommendedAverage"];
const REQUIRED_COURSES: [&str; 2] = ["required_courses", "requiredCourses"];
const INTEREST_FIELDS: [&str; 2] = ["interest_fields", "interestFields"];

/// Parse catalog text: either one `{institution: record}` document or an array of them.
pub fn parse_catalog_str(text: &str) -> Result<Catalog, MatchError> {
    let root: Value = serde_json::from_str(text)
        .map_err(|e| MatchError::Configuration(format!("catalog is not valid JSON: {e}")))?;
    parse_catalog_value(root)
}

pub fn parse_catalog_value(root: Value) -> Result<Catalog, MatchError> {
    let documents = match root {
        Value::Array(docs) => docs,
        doc @ Value::Object(_) => vec![doc],
        other => {
            return Err(MatchError::Configuration(format!(
                "catalog must be an object or an array of documents, found {}",
                type_name(&other)
            )));
        }
    };

    let merged = merge_documents(documents)?;
    if merged.is_empty() {
        return Err(MatchError::Configuration(
            "catalog contains no institutions".to_string(),
        ));
    }

    let mut warnings = Vec::new();
    let mut institutions = Vec::with_capacity(merged.len());
    for (name, record) in &merged {
        institutions.push(parse_institution(name, record, &mut warnings)?);
    }

    for w in &warnings {
        warn!(institution = %w.institution, program = %w.program, "{w}");
    }

    Ok(Catalog {
        institutions,
        warnings,
    })
}

/// Merge documents by institution name.
///
/// Later documents replace earlier entries in place, so an institution keeps
/// the position where it was first declared. Keys starting with `_` are
/// store metadata (e.g. `_id`) and are dropped.
pub fn merge_documents(documents: Vec<Value>) -> Result<Vec<(String, Value)>, MatchError> {
    let mut merged: Vec<(String, Value)> = Vec::new();

    for (idx, doc) in documents.into_iter().enumerate() {
        let map = match doc {
            Value::Object(map) => map,
            other => {
                return Err(MatchError::Configuration(format!(
                    "catalog document {idx} is a {}, expected an object",
                    type_name(&other)
                )));
            }
        };

        for (key, value) in map {
            if key.starts_with('_') {
                continue;
            }
            match merged.iter_mut().find(|(name, _)| *name == key) {
                Some(slot) => {
                    debug!(institution = %key, document = idx, "replacing institution from later document");
                    slot.1 = value;
                }
                None => merged.push((key, value)),
            }
        }
    }

    Ok(merged)
}

fn parse_institution(
    name: &str,
    record: &Value,
    warnings: &mut Vec<DataShapeWarning>,
) -> Result<InstitutionRecord, MatchError> {
    let map = record
        .as_object()
        .ok_or_else(|| MatchError::schema(name, None, "<record>", found(record)))?;

    let ec_raw = require(map, &[EC_QUALITY], name, None)?;
    let ec_quality = ec_raw
        .as_u64()
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| MatchError::schema(name, None, EC_QUALITY, found(ec_raw)))?;

    let coop_raw = require(map, &COOP, name, None)?;
    let coop_options = parse_coop(coop_raw, name, None)?;

    let programs_raw = require(map, &[PROGRAMS], name, None)?;
    let programs_map = programs_raw
        .as_object()
        .filter(|m| !m.is_empty())
        .ok_or_else(|| MatchError::schema(name, None, PROGRAMS, found(programs_raw)))?;

    let mut programs = Vec::with_capacity(programs_map.len());
    for (program_name, details) in programs_map {
        let requirements = parse_program(name, program_name, details, warnings)?;
        programs.push(Program {
            name: program_name.clone(),
            requirements,
        });
    }

    Ok(InstitutionRecord {
        name: name.to_string(),
        ec_quality,
        coop_options,
        programs,
    })
}

fn parse_program(
    institution: &str,
    program: &str,
    details: &Value,
    warnings: &mut Vec<DataShapeWarning>,
) -> Result<ProgramRequirements, MatchError> {
    let map = details
        .as_object()
        .ok_or_else(|| MatchError::schema(institution, Some(program), "<record>", found(details)))?;

    let avg_raw = require(map, &RECOMMENDED_AVERAGE, institution, Some(program))?;
    let recommended_average = parse_average(avg_raw, institution, program, warnings)?;

    let courses_raw = require(map, &REQUIRED_COURSES, institution, Some(program))?;
    let required_courses = string_list(courses_raw, institution, program, REQUIRED_COURSES[0])?;

    let interests_raw = require(map, &INTEREST_FIELDS, institution, Some(program))?;
    let interest_fields = string_list(interests_raw, institution, program, INTEREST_FIELDS[0])?
        .into_iter()
        .collect();

    let coop_options = match lookup(map, &COOP) {
        Some(raw) => Some(parse_coop(raw, institution, Some(program))?),
        None => None,
    };

    Ok(ProgramRequirements {
        recommended_average,
        required_courses,
        interest_fields,
        coop_options,
    })
}

fn parse_average(
    raw: &Value,
    institution: &str,
    program: &str,
    warnings: &mut Vec<DataShapeWarning>,
) -> Result<AverageRange, MatchError> {
    let invalid = || MatchError::schema(institution, Some(program), RECOMMENDED_AVERAGE[0], found(raw));

    let numbers: Vec<f64> = match raw {
        Value::Number(n) => vec![n.as_f64().ok_or_else(invalid)?],
        Value::Array(items) => items
            .iter()
            .map(Value::as_f64)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };

    match numbers.as_slice() {
        [value] => {
            let range = AverageRange::around(*value).ok_or_else(invalid)?;
            warnings.push(DataShapeWarning {
                institution: institution.to_string(),
                program: program.to_string(),
                value: *value,
            });
            Ok(range)
        }
        [min, max] => AverageRange::new(*min, *max).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Non-empty list of "yes"/"no" streams.
fn parse_coop(raw: &Value, institution: &str, program: Option<&str>) -> Result<BTreeSet<CoopOption>, MatchError> {
    let invalid = || MatchError::schema(institution, program, COOP[0], found(raw));
    raw.as_array()
        .filter(|items| !items.is_empty())
        .ok_or_else(invalid)?
        .iter()
        .map(|v| v.as_str().and_then(CoopOption::parse).ok_or_else(invalid))
        .collect()
}

fn string_list(raw: &Value, institution: &str, program: &str, field: &str) -> Result<Vec<String>, MatchError> {
    let invalid = || MatchError::schema(institution, Some(program), field, found(raw));
    raw.as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|v| v.as_str().map(|s| s.trim().to_string()).ok_or_else(invalid))
        .collect()
}

fn lookup<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k))
}

fn require<'a>(
    map: &'a Map<String, Value>,
    keys: &[&str],
    institution: &str,
    program: Option<&str>,
) -> Result<&'a Value, MatchError> {
    lookup(map, keys).ok_or_else(|| MatchError::schema(institution, program, keys[0], "is missing"))
}

fn found(value: &Value) -> String {
    let mut shown = value.to_string();
    if shown.chars().count() > 60 {
        shown = shown.chars().take(59).collect::<String>() + "…";
    }
    format!("has unexpected {} value {shown}", type_name(value))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn program(avg: Value) -> Value {
        json!({
            "recommended_average": avg,
            "interest_fields": ["software", "ai"],
            "required_courses": ["MHF4U"]
        })
    }

    #[test]
    fn parses_institutions_in_declared_order() {
        let catalog = parse_catalog_value(json!({
            "Zeta University": {
                "ec_quality": 2, "co-op": ["yes", "no"],
                "programs": { "Physics": program(json!([80, 90])), "Art": program(json!([70, 75])) }
            },
            "Alpha College": {
                "ec_quality": 1, "co-op": ["no"],
                "programs": { "Nursing": program(json!([85, 90])) }
            }
        }))
        .unwrap();

        let names: Vec<_> = catalog.programs().map(|(i, p)| (i.name.as_str(), p.name.as_str())).collect();
        assert_eq!(
            names,
            vec![("Zeta University", "Physics"), ("Zeta University", "Art"), ("Alpha College", "Nursing")]
        );
        assert!(catalog.warnings.is_empty());
    }

    #[test]
    fn single_value_average_is_widened_with_warning() {
        let catalog = parse_catalog_value(json!({
            "U": { "ec_quality": 2, "co-op": ["yes"], "programs": { "P": program(json!([90])) } }
        }))
        .unwrap();
        let (_, p) = catalog.programs().next().unwrap();
        assert_eq!(p.requirements.recommended_average, AverageRange::new(88.0, 92.0).unwrap());
        assert_eq!(catalog.warnings.len(), 1);
        assert_eq!(catalog.warnings[0].program, "P");

        let bare = parse_catalog_value(json!({
            "U": { "ec_quality": 2, "co-op": ["yes"], "programs": { "P": program(json!(85)) } }
        }))
        .unwrap();
        assert_eq!(bare.warnings.len(), 1);
    }

    #[test]
    fn missing_average_names_program_and_institution() {
        let err = parse_catalog_value(json!({
            "McMaster University": {
                "ec_quality": 2, "co-op": ["yes"],
                "programs": { "Health Sciences": { "interest_fields": [], "required_courses": [] } }
            }
        }))
        .unwrap_err();
        match err {
            MatchError::Schema { institution, program, field, .. } => {
                assert_eq!(institution, "McMaster University");
                assert_eq!(program.as_deref(), Some("Health Sciences"));
                assert_eq!(field, "recommended_average");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_average_shapes_report_found_value() {
        for bad in [json!("90"), json!([95, 90]), json!([80, 85, 90]), json!([]), json!(["a", "b"])] {
            let err = parse_catalog_value(json!({
                "U": { "ec_quality": 2, "co-op": ["yes"], "programs": { "P": program(bad.clone()) } }
            }))
            .unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("recommended_average"), "{msg}");
            assert!(msg.contains(&bad.to_string()), "{msg}");
        }
    }

    #[test]
    fn institution_fields_are_required() {
        let missing_coop = parse_catalog_value(json!({
            "U": { "ec_quality": 2, "programs": { "P": program(json!([80, 90])) } }
        }));
        assert!(matches!(missing_coop, Err(MatchError::Schema { ref field, .. }) if field == "co-op"));

        let empty_programs = parse_catalog_value(json!({
            "U": { "ec_quality": 2, "co-op": ["yes"], "programs": {} }
        }));
        assert!(matches!(empty_programs, Err(MatchError::Schema { ref field, .. }) if field == "programs"));

        let bad_ec = parse_catalog_value(json!({
            "U": { "ec_quality": "high", "co-op": ["yes"], "programs": { "P": program(json!([80, 90])) } }
        }));
        assert!(matches!(bad_ec, Err(MatchError::Schema { ref field, .. }) if field == "ec_quality"));

        let bad_coop = parse_catalog_value(json!({
            "U": { "ec_quality": 2, "co-op": ["maybe"], "programs": { "P": program(json!([80, 90])) } }
        }));
        assert!(bad_coop.is_err());

        let empty_coop = parse_catalog_value(json!({
            "U": { "ec_quality": 2, "co-op": [], "programs": { "P": program(json!([80, 90])) } }
        }));
        assert!(matches!(empty_coop, Err(MatchError::Schema { ref field, .. }) if field == "co-op"));
    }

    #[test]
    fn empty_catalog_is_a_configuration_error() {
        assert!(matches!(parse_catalog_value(json!({})), Err(MatchError::Configuration(_))));
        assert!(matches!(parse_catalog_value(json!([])), Err(MatchError::Configuration(_))));
        assert!(matches!(parse_catalog_value(json!([{ "_id": "abc" }])), Err(MatchError::Configuration(_))));
        assert!(matches!(parse_catalog_str("not json"), Err(MatchError::Configuration(_))));
    }

    #[test]
    fn documents_merge_by_key_keeping_first_position() {
        let catalog = parse_catalog_value(json!([
            {
                "_id": "doc-1",
                "A": { "ec_quality": 1, "co-op": ["no"], "programs": { "Old": program(json!([70, 80])) } },
                "B": { "ec_quality": 2, "co-op": ["yes"], "programs": { "P": program(json!([80, 90])) } }
            },
            {
                "_id": "doc-2",
                "A": { "ec_quality": 3, "co-op": ["yes"], "programs": { "New": program(json!([90, 95])) } }
            }
        ]))
        .unwrap();

        assert_eq!(catalog.institutions.len(), 2);
        assert_eq!(catalog.institutions[0].name, "A");
        assert_eq!(catalog.institutions[0].ec_quality, 3);
        assert_eq!(catalog.institutions[0].programs[0].name, "New");
        assert_eq!(catalog.institutions[1].name, "B");
    }

    #[test]
    fn program_level_coop_overrides_institution() {
        let catalog = parse_catalog_value(json!({
            "U": {
                "ec_quality": 2, "co-op": ["yes"],
                "programs": {
                    "P": {
                        "recommended_average": [80, 90], "interest_fields": [], "required_courses": [],
                        "co-op": ["no"]
                    }
                }
            }
        }))
        .unwrap();
        let (inst, p) = catalog.programs().next().unwrap();
        assert_eq!(inst.coop_options_for(p), &BTreeSet::from([CoopOption::No]));
    }
}
