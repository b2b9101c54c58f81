use crate::error::{GridError, GridResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single typed field value.
///
/// Serialized untagged so snapshots and HTTP responses carry plain JSON numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl Value {
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Int(_) => FieldType::Int,
            Value::Text(_) => FieldType::Text,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            Value::Int(_) => None,
        }
    }

    /// Equality used by filters. `ignore_case` only affects text values.
    pub fn matches(&self, other: &Value, ignore_case: bool) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) if ignore_case => a.to_lowercase() == b.to_lowercase(),
            _ => self == other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Int,
    Text,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Int => f.write_str("integer"),
            FieldType::Text => f.write_str("string"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
}

/// Schema shared by every record of one cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordKind {
    pub name: String,
    /// Field holding the primary key. Always one of `fields`.
    pub key_field: String,
    pub fields: Vec<FieldDef>,
}

impl RecordKind {
    pub fn new(name: &str, key_field: &str, key_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            key_field: key_field.to_string(),
            fields: vec![FieldDef {
                name: key_field.to_string(),
                ty: key_type,
            }],
        }
    }

    pub fn with_field(mut self, name: &str, ty: FieldType) -> Self {
        self.fields.push(FieldDef {
            name: name.to_string(),
            ty,
        });
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn require_field(&self, name: &str) -> GridResult<&FieldDef> {
        self.field(name)
            .ok_or_else(|| GridError::unknown_field(&self.name, name))
    }

    pub fn key_type(&self) -> FieldType {
        self.field(&self.key_field)
            .map(|f| f.ty)
            .unwrap_or(FieldType::Int)
    }

    /// Checks that a key has the declared key type.
    pub fn check_key(&self, key: &Value) -> GridResult<()> {
        let expected = self.key_type();
        if key.field_type() != expected {
            return Err(GridError::mismatch(
                format!("{} key of type {}", self.name, expected),
                format!("key of type {}", key.field_type()),
            ));
        }
        Ok(())
    }

    /// Checks that `record` is of this kind: same kind name, exactly the declared
    /// fields, each with the declared type.
    pub fn validate(&self, record: &Record) -> GridResult<()> {
        if record.kind != self.name {
            return Err(GridError::mismatch(&self.name, &record.kind));
        }

        for def in &self.fields {
            match record.fields.get(&def.name) {
                Some(value) if value.field_type() == def.ty => {}
                Some(value) => {
                    return Err(GridError::mismatch(
                        format!("{}.{} of type {}", self.name, def.name, def.ty),
                        format!("{}", value.field_type()),
                    ));
                }
                None => {
                    return Err(GridError::mismatch(
                        format!("{}.{}", self.name, def.name),
                        "missing field",
                    ));
                }
            }
        }

        if let Some(extra) = record.fields.keys().find(|name| self.field(name).is_none()) {
            return Err(GridError::mismatch(
                self.name.clone(),
                format!("record with undeclared field '{}'", extra),
            ));
        }

        Ok(())
    }
}

/// A named tuple of typed fields, tagged with the name of its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub kind: String,
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}
