//! Flat form records
//!
//! A [`FormRequest`] is what a form edits and what gets POSTed: a flat map of
//! field name to value. It serializes as a plain JSON object.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Value of a single form field
///
/// Numbers keep their JSON representation; checkboxes arrive as booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Empty text, an empty list, zero and `false` all count as "not filled in".
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Bool(checked) => !checked,
            Self::Number(n) => n.as_f64() == Some(0.0),
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whole-number reading of the value. `2.0` and numeric text (as sent by
    /// plain HTML inputs) are accepted; `2.5` is not.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
            Self::Text(s) => {
                let s = s.trim();
                s.parse().ok().or_else(|| s.parse::<f64>().ok().and_then(whole))
            }
            Self::Bool(_) | Self::List(_) => None,
        }
    }
}

fn whole(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then(|| f as i64)
}

impl From<bool> for FieldValue {
    fn from(checked: bool) -> Self {
        Self::Bool(checked)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Flat record of field values.
///
/// JSON `null` entries are dropped on the way in, so an explicit null and a
/// missing key read the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<FieldValue>>")]
pub struct FormRequest {
    fields: BTreeMap<String, FieldValue>,
}

impl From<BTreeMap<String, Option<FieldValue>>> for FormRequest {
    fn from(raw: BTreeMap<String, Option<FieldValue>>) -> Self {
        Self {
            fields: raw
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v)))
                .collect(),
        }
    }
}

impl Serialize for FormRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl FormRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).map_or(true, FieldValue::is_blank)
    }

    /// Shallow merge of a single field. Last write wins; nothing is validated.
    pub fn update_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder form of [`FormRequest::update_field`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.update_field(name, value);
        self
    }

    pub fn remove_field(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Add `option` to a multi-select field, or remove it if already chosen.
    ///
    /// A field that does not hold a list yet becomes a one-element list.
    /// Returns whether `option` is selected afterwards.
    pub fn toggle_option(&mut self, name: &str, option: &str) -> bool {
        match self.fields.get_mut(name) {
            Some(FieldValue::List(items)) => {
                if let Some(pos) = items.iter().position(|i| i == option) {
                    items.remove(pos);
                    false
                } else {
                    items.push(option.to_string());
                    true
                }
            }
            _ => {
                self.fields
                    .insert(name.to_string(), FieldValue::List(vec![option.to_string()]));
                true
            }
        }
    }

    /// Copy every field of `other` over this record.
    pub fn merge(&mut self, other: &FormRequest) {
        for (name, value) in &other.fields {
            self.fields.insert(name.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON body sent to the submission endpoint
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values() {
        assert!(FieldValue::from("   ").is_blank());
        assert!(FieldValue::from(0i64).is_blank());
        assert!(FieldValue::from(Vec::<String>::new()).is_blank());
        assert!(!FieldValue::from("Tashi").is_blank());
        assert!(!FieldValue::from(2i64).is_blank());
    }

    #[test]
    fn numeric_text_reads_as_number() {
        assert_eq!(FieldValue::from(" 4 ").as_number(), Some(4));
        assert_eq!(FieldValue::from("four").as_number(), None);
    }

    #[test]
    fn update_field_is_last_write_wins() {
        let mut record = FormRequest::new();
        record.update_field("name", "Pema");
        record.update_field("name", "Pema Wangmo");
        assert_eq!(record.text("name"), Some("Pema Wangmo"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn toggle_option_never_duplicates() {
        let mut record = FormRequest::new();
        assert!(record.toggle_option("interests", "Festivals"));
        assert!(record.toggle_option("interests", "Trekking"));
        assert!(!record.toggle_option("interests", "Festivals"));
        assert!(record.toggle_option("interests", "Festivals"));

        let items = record.get("interests").and_then(FieldValue::as_list).unwrap();
        assert_eq!(items, ["Trekking".to_string(), "Festivals".to_string()]);
    }

    #[test]
    fn serializes_as_flat_object() {
        let record = FormRequest::new()
            .with("name", "Karma")
            .with("groupSize", 3i64)
            .with("destinations", vec!["Paro".to_string(), "Bumthang".to_string()]);

        assert_eq!(
            record.to_json(),
            serde_json::json!({
                "name": "Karma",
                "groupSize": 3,
                "destinations": ["Paro", "Bumthang"]
            })
        );
    }

    #[test]
    fn checkbox_and_float_values_parse() {
        let record: FormRequest =
            serde_json::from_str(r#"{"name":"A","newsletter":true,"groupSize":2.0}"#).unwrap();

        assert_eq!(record.get("newsletter"), Some(&FieldValue::Bool(true)));
        assert_eq!(record.get("groupSize").and_then(FieldValue::as_number), Some(2));
        assert_eq!(record.to_json()["newsletter"], true);
    }

    #[test]
    fn fractional_numbers_are_not_whole() {
        let record: FormRequest = serde_json::from_str(r#"{"groupSize":2.5}"#).unwrap();
        assert_eq!(record.get("groupSize").and_then(FieldValue::as_number), None);
        assert_eq!(FieldValue::from("3.0").as_number(), Some(3));
        assert!(FieldValue::from(false).is_blank());
    }

    #[test]
    fn nulls_are_dropped_when_parsing() {
        let record: FormRequest =
            serde_json::from_str(r#"{"name":"Sonam","phone":null,"groupSize":"2"}"#).unwrap();
        assert_eq!(record.len(), 2);
        assert!(record.get("phone").is_none());
        assert_eq!(record.get("groupSize").and_then(FieldValue::as_number), Some(2));
    }
}
