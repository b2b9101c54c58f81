//! Typed record kinds and their mapping onto generic [`Record`]s.

use super::types::{FieldType, Record, RecordKind, Value};
use crate::error::{GridError, GridResult};
use serde::{Deserialize, Serialize};

/// A Rust type that can be stored in a cache of its [`RecordKind`].
pub trait Entity: Sized {
    fn kind() -> RecordKind;
    fn key(&self) -> Value;
    fn to_record(&self) -> Record;
    fn from_record(record: &Record) -> GridResult<Self>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    /// Key of the [`Organization`] this person belongs to.
    pub org_id: i64,
}

impl Organization {
    pub const KIND: &'static str = "Organization";

    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

impl Person {
    pub const KIND: &'static str = "Person";
    pub const ORG_ID: &'static str = "orgId";

    pub fn new(id: i64, name: &str, org_id: i64) -> Self {
        Self {
            id,
            name: name.to_string(),
            org_id,
        }
    }
}

impl Entity for Organization {
    fn kind() -> RecordKind {
        RecordKind::new(Self::KIND, "id", FieldType::Int).with_field("name", FieldType::Text)
    }

    fn key(&self) -> Value {
        Value::Int(self.id)
    }

    fn to_record(&self) -> Record {
        Record::new(Self::KIND)
            .with("id", self.id)
            .with("name", self.name.as_str())
    }

    fn from_record(record: &Record) -> GridResult<Self> {
        Self::kind().validate(record)?;
        Ok(Self {
            id: int_field(record, "id")?,
            name: text_field(record, "name")?,
        })
    }
}

impl Entity for Person {
    fn kind() -> RecordKind {
        RecordKind::new(Self::KIND, "id", FieldType::Int)
            .with_field("name", FieldType::Text)
            .with_field(Self::ORG_ID, FieldType::Int)
    }

    fn key(&self) -> Value {
        Value::Int(self.id)
    }

    fn to_record(&self) -> Record {
        Record::new(Self::KIND)
            .with("id", self.id)
            .with("name", self.name.as_str())
            .with(Self::ORG_ID, self.org_id)
    }

    fn from_record(record: &Record) -> GridResult<Self> {
        Self::kind().validate(record)?;
        Ok(Self {
            id: int_field(record, "id")?,
            name: text_field(record, "name")?,
            org_id: int_field(record, Self::ORG_ID)?,
        })
    }
}

fn int_field(record: &Record, field: &str) -> GridResult<i64> {
    record
        .get(field)
        .and_then(Value::as_int)
        .ok_or_else(|| GridError::mismatch(format!("{}.{} integer", record.kind, field), "other"))
}

fn text_field(record: &Record, field: &str) -> GridResult<String> {
    record
        .get(field)
        .and_then(Value::as_text)
        .map(str::to_string)
        .ok_or_else(|| GridError::mismatch(format!("{}.{} string", record.kind, field), "other"))
}
