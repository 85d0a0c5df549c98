//! Query execution over a dataset.
//!
//! # Responsibilities
//! - Translate a `Query` into a matcher
//! - Apply first-match semantics for single-record queries
//! - Apply filter semantics for collection queries
//!
//! # Design Decisions
//! - Single-record queries return the first match in dataset order
//! - Empty collection results are success, never NotFound
//! - A field fault aborts the whole query

use serde_json::Value;
use thiserror::Error;

use crate::data::Record;
use crate::lookup::matcher::{
    AndMatcher, AnyMatcher, DobMatcher, FieldFault, IdMatcher, NameContainsMatcher, NidMatcher,
    RecordMatcher, Region, RegionMatcher,
};

/// Lookup failure kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// A required input was absent or empty.
    #[error("missing required input")]
    Validation,

    /// A single-record query matched nothing.
    #[error("no matching record")]
    NotFound,

    /// A record could not be evaluated.
    #[error(transparent)]
    Fault(#[from] FieldFault),
}

/// A lookup against the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    All,
    /// `None` is an id that did not parse; it matches nothing.
    ById(Option<i64>),
    ByNidAndDob { nid: String, dob: String },
    ByNidNumber(String),
    SearchByName(String),
    ByDistrict(String),
    ByDivision(String),
}

/// Result of a successful query.
#[derive(Debug, PartialEq)]
pub enum Outcome<'a> {
    Single(&'a Record),
    Many(Vec<&'a Record>),
}

impl Query {
    /// Build a by-id query from the raw path segment.
    pub fn by_id(raw: &str) -> Self {
        Query::ById(parse_id(raw))
    }

    /// Build a NID + date-of-birth query from untyped request fields.
    ///
    /// Absent, `null`, `false`, `0` and `""` all count as missing. Present values
    /// that are not strings cannot equal any record field and yield NotFound.
    pub fn nid_and_dob(nid: Option<&Value>, dob: Option<&Value>) -> Result<Self, LookupError> {
        if !is_present(nid) || !is_present(dob) {
            return Err(LookupError::Validation);
        }

        match (nid, dob) {
            (Some(Value::String(nid)), Some(Value::String(dob))) => Ok(Query::ByNidAndDob {
                nid: nid.clone(),
                dob: dob.clone(),
            }),
            _ => Err(LookupError::NotFound),
        }
    }

    /// Operation name used in logs and metrics.
    pub fn operation(&self) -> &'static str {
        match self {
            Query::All => "all",
            Query::ById(_) => "by_id",
            Query::ByNidAndDob { .. } => "by_nid_and_dob",
            Query::ByNidNumber(_) => "by_nid_number",
            Query::SearchByName(_) => "search_by_name",
            Query::ByDistrict(_) => "by_district",
            Query::ByDivision(_) => "by_division",
        }
    }

    /// Whether the query returns one record rather than a collection.
    pub fn is_single(&self) -> bool {
        matches!(
            self,
            Query::ById(_) | Query::ByNidAndDob { .. } | Query::ByNidNumber(_)
        )
    }

    fn matcher(&self) -> Box<dyn RecordMatcher> {
        match self {
            Query::All => Box::new(AnyMatcher),
            Query::ById(id) => Box::new(IdMatcher::new(*id)),
            Query::ByNidAndDob { nid, dob } => Box::new(AndMatcher::new(vec![
                Box::new(NidMatcher::new(nid.as_str())),
                Box::new(DobMatcher::new(dob.as_str())),
            ])),
            Query::ByNidNumber(nid) => Box::new(NidMatcher::new(nid.as_str())),
            Query::SearchByName(fragment) => Box::new(NameContainsMatcher::new(fragment.as_str())),
            Query::ByDistrict(district) => {
                Box::new(RegionMatcher::new(Region::District, district.as_str()))
            }
            Query::ByDivision(division) => {
                Box::new(RegionMatcher::new(Region::Division, division.as_str()))
            }
        }
    }
}

/// Run a query against a dataset.
pub fn execute<'a>(query: &Query, dataset: &'a [Record]) -> Result<Outcome<'a>, LookupError> {
    let matcher = query.matcher();

    if query.is_single() {
        for record in dataset {
            if matcher.matches(record)? {
                return Ok(Outcome::Single(record));
            }
        }
        return Err(LookupError::NotFound);
    }

    let mut matched = Vec::new();
    for record in dataset {
        if matcher.matches(record)? {
            matched.push(record);
        }
    }
    Ok(Outcome::Many(matched))
}

/// Parse an id the lenient way: leading whitespace, an optional sign, then a
/// decimal (or `0x` hexadecimal) digit run. Anything after the digits is ignored.
/// Returns `None` when no digits lead the text.
pub fn parse_id(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, text) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, text) = match text.get(..2) {
        Some("0x") | Some("0X") => (16, &text[2..]),
        _ => (10, text),
    };

    let end = text
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&text[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset() -> Vec<Record> {
        serde_json::from_value(json!([
            {
                "id": 1, "nid": "123", "name": "John Doe", "date_of_birth": "01/01/1990",
                "address": { "district": "Dhaka", "division": "Dhaka" }
            },
            {
                "id": 2, "nid": "456", "name": "Jane Roe", "date_of_birth": "15/08/1985",
                "address": { "district": "Gazipur", "division": "Dhaka" }
            },
            {
                "id": 3, "nid": "123", "name": "Johnny Dhar", "date_of_birth": "02/02/1992",
                "address": { "district": "Sylhet", "division": "Sylhet" }
            }
        ]))
        .unwrap()
    }

    fn ids(outcome: Outcome<'_>) -> Vec<i64> {
        match outcome {
            Outcome::Single(r) => vec![r.id().unwrap() as i64],
            Outcome::Many(rs) => rs.iter().map(|r| r.id().unwrap() as i64).collect(),
        }
    }

    #[test]
    fn test_all_keeps_order() {
        let data = dataset();
        assert_eq!(ids(execute(&Query::All, &data).unwrap()), vec![1, 2, 3]);
    }

    #[test]
    fn test_by_id() {
        let data = dataset();
        for id in 1..=3 {
            let outcome = execute(&Query::ById(Some(id)), &data).unwrap();
            assert_eq!(ids(outcome), vec![id]);
        }
        assert_eq!(execute(&Query::ById(Some(99)), &data), Err(LookupError::NotFound));
        assert_eq!(execute(&Query::by_id("abc"), &data), Err(LookupError::NotFound));
    }

    #[test]
    fn test_single_lookups_return_first_match() {
        let data = dataset();
        let outcome = execute(&Query::ByNidNumber("123".into()), &data).unwrap();
        assert_eq!(ids(outcome), vec![1]);
    }

    #[test]
    fn test_nid_and_dob() {
        let data = dataset();
        let query = Query::nid_and_dob(Some(&json!("123")), Some(&json!("02/02/1992"))).unwrap();
        assert_eq!(ids(execute(&query, &data).unwrap()), vec![3]);

        let query = Query::nid_and_dob(Some(&json!("123")), Some(&json!("15/08/1985"))).unwrap();
        assert_eq!(execute(&query, &data), Err(LookupError::NotFound));
    }

    #[test]
    fn test_nid_and_dob_validation() {
        let dob = json!("01/01/1990");
        assert_eq!(Query::nid_and_dob(None, Some(&dob)), Err(LookupError::Validation));
        assert_eq!(Query::nid_and_dob(Some(&json!("")), Some(&dob)), Err(LookupError::Validation));
        assert_eq!(Query::nid_and_dob(Some(&json!(null)), Some(&dob)), Err(LookupError::Validation));
        assert_eq!(Query::nid_and_dob(Some(&json!(0)), Some(&dob)), Err(LookupError::Validation));
        assert_eq!(Query::nid_and_dob(Some(&json!("123")), None), Err(LookupError::Validation));

        // Present but not text: cannot match, but is not a validation failure.
        assert_eq!(Query::nid_and_dob(Some(&json!(123)), Some(&dob)), Err(LookupError::NotFound));
    }

    #[test]
    fn test_search_by_name_is_case_insensitive_substring() {
        let data = dataset();
        let outcome = execute(&Query::SearchByName("JO".into()), &data).unwrap();
        assert_eq!(ids(outcome), vec![1, 3]);

        let outcome = execute(&Query::SearchByName("zzz".into()), &data).unwrap();
        assert_eq!(outcome, Outcome::Many(vec![]));
    }

    #[test]
    fn test_region_filters() {
        let data = dataset();
        assert_eq!(ids(execute(&Query::ByDivision("dhaka".into()), &data).unwrap()), vec![1, 2]);
        assert_eq!(ids(execute(&Query::ByDistrict("DHAKA".into()), &data).unwrap()), vec![1]);
        assert!(ids(execute(&Query::ByDistrict("dha".into()), &data).unwrap()).is_empty());
    }

    #[test]
    fn test_missing_field_faults_filter() {
        let mut data = dataset();
        data.push(Record::from(json!({ "id": 4 })));

        let err = execute(&Query::ByDistrict("sylhet".into()), &data).unwrap_err();
        assert!(matches!(err, LookupError::Fault(ref f) if f.field == "address.district"));

        // Single-record lookups skip over the incomplete record.
        assert_eq!(execute(&Query::ByNidNumber("nope".into()), &data), Err(LookupError::NotFound));
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let first = dataset();
        let second = dataset();
        let query = Query::SearchByName("o".into());

        assert_eq!(execute(&query, &first).unwrap(), execute(&query, &second).unwrap());
        assert_eq!(execute(&query, &first).unwrap(), execute(&query, &first).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_oddly_typed_records_are_served() {
        let data: Vec<Record> = serde_json::from_value(json!([
            { "id": 1 },
            { "id": "2" },
            { "id": 3.0 },
            { "nid": 1234567 }
        ]))
        .unwrap();

        match execute(&Query::All, &data).unwrap() {
            Outcome::Many(all) => assert_eq!(all.len(), 4),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(execute(&Query::by_id("3"), &data).unwrap(), Outcome::Single(&data[2]));
        assert_eq!(execute(&Query::by_id("2"), &data), Err(LookupError::NotFound));
        assert_eq!(execute(&Query::ByNidNumber("1234567".into()), &data), Err(LookupError::NotFound));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("  7"), Some(7));
        assert_eq!(parse_id("12abc"), Some(12));
        assert_eq!(parse_id("1.9"), Some(1));
        assert_eq!(parse_id("-3"), Some(-3));
        assert_eq!(parse_id("0x1A"), Some(26));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-"), None);
    }
}
