//! Record matching logic.
//!
//! # Responsibilities
//! - Exact match on id, NID number and date of birth
//! - Case-insensitive substring match on name
//! - Case-insensitive exact match on address district/division
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Exact matchers treat a missing or non-text field as "no match"
//! - Filters that must read a field report a `FieldFault` when it is missing or not text
//! - Ids compare numerically, so `3` and `3.0` are the same id
//! - Case folding is ASCII-only; no locale-aware collation

use thiserror::Error;

use crate::data::Record;

/// A record lacked a field a filter needed to read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {record} has no readable {field}")]
pub struct FieldFault {
    pub record: String,
    pub field: &'static str,
}

impl FieldFault {
    fn new(record: &Record, field: &'static str) -> Self {
        Self {
            record: record.label(),
            field,
        }
    }
}

/// Trait for matching records against a condition.
pub trait RecordMatcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the record matches this condition.
    fn matches(&self, record: &Record) -> Result<bool, FieldFault>;
}

/// Matches the record id.
#[derive(Debug, Clone)]
pub struct IdMatcher {
    id: Option<i64>,
}

impl IdMatcher {
    /// `None` stands for an id that did not parse; it matches nothing.
    pub fn new(id: Option<i64>) -> Self {
        Self { id }
    }
}

impl RecordMatcher for IdMatcher {
    fn matches(&self, record: &Record) -> Result<bool, FieldFault> {
        Ok(match (self.id, record.id()) {
            (Some(wanted), Some(id)) => id == wanted as f64,
            _ => false,
        })
    }
}

/// Matches the NID number exactly.
#[derive(Debug, Clone)]
pub struct NidMatcher {
    nid: String,
}

impl NidMatcher {
    pub fn new(nid: impl Into<String>) -> Self {
        Self { nid: nid.into() }
    }
}

impl RecordMatcher for NidMatcher {
    fn matches(&self, record: &Record) -> Result<bool, FieldFault> {
        Ok(record.nid() == Some(self.nid.as_str()))
    }
}

/// Matches the date of birth text exactly.
#[derive(Debug, Clone)]
pub struct DobMatcher {
    dob: String,
}

impl DobMatcher {
    pub fn new(dob: impl Into<String>) -> Self {
        Self { dob: dob.into() }
    }
}

impl RecordMatcher for DobMatcher {
    fn matches(&self, record: &Record) -> Result<bool, FieldFault> {
        Ok(record.date_of_birth() == Some(self.dob.as_str()))
    }
}

/// Matches records whose name contains a fragment, ignoring ASCII case.
#[derive(Debug, Clone)]
pub struct NameContainsMatcher {
    fragment: String,
}

impl NameContainsMatcher {
    /// The fragment is normalized to lowercase once, up front.
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into().to_ascii_lowercase(),
        }
    }
}

impl RecordMatcher for NameContainsMatcher {
    fn matches(&self, record: &Record) -> Result<bool, FieldFault> {
        let name = record
            .name()
            .ok_or_else(|| FieldFault::new(record, "name"))?;
        Ok(name.to_ascii_lowercase().contains(&self.fragment))
    }
}

/// Which address field a geographic matcher reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    District,
    Division,
}

impl Region {
    fn field(self) -> &'static str {
        match self {
            Region::District => "address.district",
            Region::Division => "address.division",
        }
    }

    fn read(self, record: &Record) -> Option<&str> {
        match self {
            Region::District => record.district(),
            Region::Division => record.division(),
        }
    }
}

/// Matches an address field exactly, ignoring ASCII case.
#[derive(Debug, Clone)]
pub struct RegionMatcher {
    region: Region,
    expected: String,
}

impl RegionMatcher {
    pub fn new(region: Region, expected: impl Into<String>) -> Self {
        Self {
            region,
            expected: expected.into().to_ascii_lowercase(),
        }
    }
}

impl RecordMatcher for RegionMatcher {
    fn matches(&self, record: &Record) -> Result<bool, FieldFault> {
        let value = self
            .region
            .read(record)
            .ok_or_else(|| FieldFault::new(record, self.region.field()))?;
        Ok(value.to_ascii_lowercase() == self.expected)
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn RecordMatcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn RecordMatcher>>) -> Self {
        Self { matchers }
    }
}

impl RecordMatcher for AndMatcher {
    fn matches(&self, record: &Record) -> Result<bool, FieldFault> {
        for matcher in &self.matchers {
            if !matcher.matches(record)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Matches every record.
#[derive(Debug, Clone, Default)]
pub struct AnyMatcher;

impl RecordMatcher for AnyMatcher {
    fn matches(&self, _record: &Record) -> Result<bool, FieldFault> {
        Ok(true)
    }
}
