//! [`Record`] implementations for map-like JSON objects.

use serde_json::{Map, Value};

use crate::{Document, Field, Record};

impl Record for Map<String, Value> {
    fn type_name(&self) -> &str {
        "Map"
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        self.get(name).map(Field::Json)
    }

    fn to_document(&self) -> Option<Document> {
        Some(self.clone())
    }
}

impl Record for Value {
    fn type_name(&self) -> &str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        match self {
            Value::Object(map) => map.field(name),
            _ => None,
        }
    }

    fn to_document(&self) -> Option<Document> {
        match self {
            Value::Object(map) => Some(map.clone()),
            _ => None,
        }
    }
}
