//! The record/table data model.
//!
//! This is the thin adapter boundary the host application is expected to
//! populate from whatever tabular representation it already has (a
//! dataframe, a SQL result set, a CSV reader). The core never loads, saves,
//! or otherwise manages the lifecycle of a `Table` -- that is out of scope.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{DebugBlockerError, Result};

/// A single cell value. Keys and non-key attributes share this type; keys
/// are expected to be `Text` or `Number`, non-key attributes may be any
/// variant including `Null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Number(f64),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Stringify a cell the way the tokenizer needs it: nulls become `""`,
    /// numbers round to an integer string (`30.7` -> `"31"`), text passes
    /// through unchanged.
    pub fn stringify(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Number(n) => format!("{:.0}", n),
            Value::Text(s) => s.clone(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.to_bits() == b.to_bits(),
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Value::Text(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            Value::Number(n) => {
                1u8.hash(state);
                n.to_bits().hash(state);
            }
            Value::Null => 2u8.hash(state),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stringify())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&JsonValue> for Value {
    /// Strings and numbers map directly; booleans stringify (`"true"`/
    /// `"false"`); arrays and objects stringify via their JSON rendering
    /// rather than being rejected, since a host adapter feeding records in
    /// from a JSON source should never fail on a field it merely doesn't
    /// specialize for.
    fn from(v: &JsonValue) -> Self {
        match v {
            JsonValue::Null => Value::Null,
            JsonValue::String(s) => Value::Text(s.clone()),
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            JsonValue::Bool(b) => Value::Text(b.to_string()),
            other => Value::Text(other.to_string()),
        }
    }
}

/// One row of a `Table`, positionally aligned with `Table::columns`.
pub type Row = Vec<Value>;

/// A record table: a column list, a designated key column, and row-major
/// data. This is the entire contract the core has with its host -- no
/// catalog metadata, no persistence, no foreign keys.
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub key: String,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        key: impl Into<String>,
        rows: Vec<Row>,
    ) -> Self {
        Self {
            name: name.into(),
            columns,
            key: key.into(),
            rows,
        }
    }

    /// Build a `Table` from row-major JSON objects, the shape a host adapter
    /// sitting on top of a JSON record source (a document store, a REST
    /// response) is most likely to have on hand. A field absent from a given
    /// record becomes `Value::Null` rather than failing the whole row.
    pub fn from_json_records(
        name: impl Into<String>,
        columns: Vec<String>,
        key: impl Into<String>,
        records: &[JsonValue],
    ) -> Self {
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| {
                        record
                            .get(c)
                            .map(Value::from)
                            .unwrap_or(Value::Null)
                    })
                    .collect()
            })
            .collect();
        Self::new(name, columns, key, rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| DebugBlockerError::UnknownColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn key_index(&self) -> Result<usize> {
        self.column_index(&self.key)
    }

    /// Build the key -> row-index map. When `strict` is `true` (the
    /// reference behavior), a duplicate key fails with `DuplicateKey`; when
    /// `false`, the first occurrence of a repeated key wins and later rows
    /// sharing it are unreachable by key (a caller opt-in, never the
    /// default -- see `JoinConfig::strict_duplicate_keys`).
    pub fn key_to_index_map(&self, strict: bool) -> Result<HashMap<Value, usize>> {
        let key_idx = self.key_index()?;
        let mut map = HashMap::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            let key_value = row[key_idx].clone();
            if map.contains_key(&key_value) {
                if strict {
                    return Err(DebugBlockerError::DuplicateKey {
                        table: self.name.clone(),
                        key: key_value.stringify(),
                    });
                }
                continue;
            }
            map.insert(key_value, i);
        }
        Ok(map)
    }

    /// Produce a new table retaining only the given columns, in the given
    /// order. The key column must be among them.
    pub fn project(&self, columns: &[String]) -> Self {
        let indices: Vec<usize> = columns
            .iter()
            .map(|c| self.columns.iter().position(|x| x == c).unwrap())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Table {
            name: self.name.clone(),
            columns: columns.to_vec(),
            key: self.key.clone(),
            rows,
        }
    }
}
