use std::fmt;

use crate::{
    common::{record::Record, value::Value},
    storage::btree::errors::{BuildError, BuildResult},
};

/// Ordered, non-empty list of key columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    columns: Vec<String>,
}

impl KeySpec {
    pub fn new<S: AsRef<str>>(columns: &[S]) -> BuildResult<Self> {
        if columns.is_empty() {
            return Err(BuildError::Configuration {
                reason: "at least one key column is required".into(),
            });
        }

        Ok(Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Projects `record` through the key columns, in order.
    ///
    /// `ordinal` is the record's input position, reported on failure.
    pub fn project(&self, record: &Record, ordinal: usize) -> BuildResult<CompositeKey> {
        self.columns
            .iter()
            .map(|col| {
                record
                    .get(col)
                    .cloned()
                    .ok_or_else(|| BuildError::MissingKeyColumn {
                        column: col.clone(),
                        record: ordinal,
                    })
            })
            .collect::<BuildResult<Vec<_>>>()
            .map(CompositeKey)
    }
}

/// Values of the key columns of one record.
///
/// Ordering is lexicographic: the first unequal column decides.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompositeKey(pub Vec<Value>);

impl CompositeKey {
    pub fn new(values: Vec<Value>) -> Self {
        CompositeKey(values)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

impl From<Value> for CompositeKey {
    fn from(v: Value) -> Self {
        CompositeKey(vec![v])
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{single}"),
            values => {
                let parts = values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{parts}]")
            }
        }
    }
}
