use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Deref;
use std::sync::Arc;

//A single row of the dataset. Fields are kept as loaded, in their original order,
//so rows can be handed back to callers without knowing the full schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Record(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn class(&self) -> Option<&str> {
        self.get("class").and_then(Value::as_str)
    }

    pub fn region(&self) -> Option<&str> {
        self.get("region").and_then(Value::as_str)
    }

    // Integer and float JSON numbers both count as samples
    pub fn latency_ms(&self) -> Option<f64> {
        self.get("latency_ms").and_then(Value::as_f64)
    }

    pub fn uptime_pct(&self) -> Option<f64> {
        self.get("uptime_pct").and_then(Value::as_f64)
    }
}

/// The loaded dataset. Cloning is cheap and every clone sees the same rows;
/// there is no way to mutate a table once it has been built.
#[derive(Debug, Clone, Default)]
pub struct Table(Arc<Vec<Record>>);

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Table(Arc::new(records))
    }

    /// Rows whose `region` field equals `region`, in table order.
    pub fn in_region<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.0.iter().filter(move |r| r.region() == Some(region))
    }

    /// Rows whose `class` field is one of `classes`, in table order.
    /// An empty `classes` slice means no filter.
    pub fn with_classes<'a>(&'a self, classes: &'a [String]) -> Vec<&'a Record> {
        if classes.is_empty() {
            return self.0.iter().collect();
        }
        self.0
            .iter()
            .filter(|r| r.class().is_some_and(|c| classes.iter().any(|wanted| wanted == c)))
            .collect()
    }
}

impl Deref for Table {
    type Target = [Record];

    fn deref(&self) -> &[Record] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Record {
        match v {
            Value::Object(map) => Record::new(map),
            other => panic!("not an object: {other}"),
        }
    }

    fn table() -> Table {
        Table::new(vec![
            record(json!({"name": "a", "class": "1A", "region": "us", "latency_ms": 10})),
            record(json!({"name": "b", "class": "2B", "region": "eu", "latency_ms": 12.5})),
            record(json!({"name": "c", "class": "1A", "region": "us", "latency_ms": "n/a"})),
            record(json!({"name": "d"})),
        ])
    }

    fn names(rows: &[&Record]) -> Vec<String> {
        rows.iter()
            .map(|r| r.get("name").and_then(Value::as_str).unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn no_classes_returns_every_row_in_order() {
        let t = table();
        assert_eq!(names(&t.with_classes(&[])), ["a", "b", "c", "d"]);
    }

    #[test]
    fn class_filter_is_set_membership_and_keeps_order() {
        let t = table();
        let wanted = vec!["2B".to_string(), "1A".to_string()];
        assert_eq!(names(&t.with_classes(&wanted)), ["a", "b", "c"]);
    }

    #[test]
    fn class_filter_is_case_sensitive() {
        let t = table();
        assert!(t.with_classes(&["1a".to_string()]).is_empty());
    }

    #[test]
    fn numeric_accessors_accept_ints_and_reject_strings() {
        let t = table();
        assert_eq!(t[0].latency_ms(), Some(10.0));
        assert_eq!(t[1].latency_ms(), Some(12.5));
        assert_eq!(t[2].latency_ms(), None);
        assert_eq!(t[3].region(), None);
    }

    #[test]
    fn in_region_selects_matching_rows() {
        let t = table();
        assert_eq!(t.in_region("us").count(), 2);
        assert_eq!(t.in_region("ap").count(), 0);
    }

    #[test]
    fn serializes_fields_in_original_order() {
        let r = record(json!({"zeta": 1, "alpha": 2, "mid": null}));
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"zeta":1,"alpha":2,"mid":null}"#);
    }
}
