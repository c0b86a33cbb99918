use std::collections::HashMap;

use crate::common::value::Value;

/// One input row: column name to scalar value.
pub type Record = HashMap<String, Value>;

/// Builds a record from literal pairs.
pub fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Column names present in any of `records`, sorted.
pub fn column_names(records: &[Record]) -> Vec<String> {
    let mut names: Vec<String> = records
        .iter()
        .flat_map(|r| r.keys().cloned())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_can_store_values() {
        let r = record(&[("age", Value::Int64(30)), ("name", Value::from("Alice"))]);

        assert_eq!(r.get("age"), Some(&Value::Int64(30)));
        assert_eq!(r.get("name"), Some(&Value::from("Alice")));
        assert_eq!(r.get("missing"), None);
    }

    #[test]
    fn column_names_are_merged_and_sorted() {
        let rows = vec![
            record(&[("title", Value::from("Moby Dick"))]),
            record(&[("id", Value::Int64(1)), ("title", Value::from("Emma"))]),
        ];

        assert_eq!(column_names(&rows), vec!["id".to_string(), "title".to_string()]);
    }
}
