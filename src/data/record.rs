//! NID record schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered sequence of records, in file order.
pub type Dataset = Vec<Record>;

/// One National ID entry, kept exactly as it appears in the backing file.
///
/// The file is not validated: any element of the top-level array is a record and is
/// written back unchanged. Known fields are read through accessors that yield `None`
/// when the field is absent or holds a value of another JSON type.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Numeric id. `3` and `3.0` are the same id; a textual id is no id at all.
    pub fn id(&self) -> Option<f64> {
        match self.0.get("id")? {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn nid(&self) -> Option<&str> {
        self.text("nid")
    }

    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    /// Day/month/year text. Compared verbatim, never parsed.
    pub fn date_of_birth(&self) -> Option<&str> {
        self.text("date_of_birth")
    }

    /// District of a structured address. Free-text addresses have none.
    pub fn district(&self) -> Option<&str> {
        self.0.get("address")?.get("district")?.as_str()
    }

    pub fn division(&self) -> Option<&str> {
        self.0.get("address")?.get("division")?.as_str()
    }

    /// Label used in diagnostics.
    pub fn label(&self) -> String {
        match self.0.get("id") {
            Some(id) => format!("id={}", id),
            None => "id=<missing>".to_string(),
        }
    }

    fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field)?.as_str()
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serializes_unchanged() {
        let raw = json!({
            "id": 7,
            "nid": "1990123456789",
            "name": "Rahim Uddin",
            "blood_group": "O+",
            "address": {
                "street": "12 Lake Road",
                "district": "Dhaka",
                "division": "Dhaka",
                "post_code": "1207"
            }
        });

        let record: Record = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.district(), Some("Dhaka"));
        assert_eq!(record.nid(), Some("1990123456789"));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_text_address_has_no_district() {
        let record = Record::from(json!({
            "id": 1,
            "address": "123 Main St, City, Country"
        }));

        assert_eq!(record.district(), None);
        assert_eq!(record.division(), None);
    }

    #[test]
    fn test_numeric_id_ignores_representation() {
        assert_eq!(Record::from(json!({ "id": 3 })).id(), Some(3.0));
        assert_eq!(Record::from(json!({ "id": 3.0 })).id(), Some(3.0));
        assert_eq!(Record::from(json!({ "id": "3" })).id(), None);
        assert_eq!(Record::from(json!({ "id": "3" })).label(), "id=\"3\"");
    }

    #[test]
    fn test_mistyped_fields_read_as_absent() {
        let record = Record::from(json!({ "nid": 1234567, "name": ["Karim"], "address": null }));
        assert_eq!(record.nid(), None);
        assert_eq!(record.name(), None);
        assert_eq!(record.district(), None);
        assert_eq!(record.label(), "id=<missing>");
    }

    #[test]
    fn test_non_object_element_is_kept() {
        let record: Record = serde_json::from_value(json!("stray")).unwrap();
        assert_eq!(record.id(), None);
        assert_eq!(serde_json::to_value(&record).unwrap(), json!("stray"));
    }
}
