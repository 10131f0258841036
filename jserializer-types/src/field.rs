use serde_json::Value;

use crate::Record;

/// A single field read off a [`Record`].
pub enum Field<'a> {
    /// Absent value (`nil` relation or optional scalar).
    Null,
    /// Owned JSON, typically a scalar computed from a struct field.
    Value(Value),
    /// JSON borrowed from a map-like record.
    Json(&'a Value),
    /// A single related record.
    One(&'a dyn Record),
    /// An ordered list of related records.
    Many(Vec<&'a dyn Record>),
}

impl<'a> Field<'a> {
    /// Owned JSON value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Optional to-one relation. `None` becomes [`Field::Null`].
    pub fn one<T: Record>(record: Option<&'a T>) -> Self {
        match record {
            Some(record) => Self::One(record),
            None => Self::Null,
        }
    }

    /// To-many relation over any iterator of records.
    pub fn many<T, I>(records: I) -> Self
    where
        T: Record,
        I: IntoIterator<Item = &'a T>,
    {
        Self::Many(records.into_iter().map(|r| r as &dyn Record).collect())
    }

    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Value(v) => v.is_null(),
            Self::Json(v) => v.is_null(),
            Self::One(_) | Self::Many(_) => false,
        }
    }

    /// Views this field as a relation.
    ///
    /// JSON objects act as to-one records and arrays of objects as to-many
    /// records. Any other JSON is [`Related::Plain`].
    pub fn related(&self) -> Related<'_> {
        match self {
            Self::Null => Related::Null,
            Self::Value(v) => Related::from_json(v),
            Self::Json(v) => Related::from_json(v),
            Self::One(record) => Related::One(*record),
            Self::Many(records) => Related::Many(records.clone()),
        }
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Json(v) => f.debug_tuple("Json").field(v).finish(),
            Self::One(r) => f.debug_tuple("One").field(&r.type_name()).finish(),
            Self::Many(rs) => f.debug_tuple("Many").field(&rs.len()).finish(),
        }
    }
}

/// A field seen as a relation to other records.
pub enum Related<'a> {
    Null,
    One(&'a dyn Record),
    Many(Vec<&'a dyn Record>),
    /// JSON that is not a record (scalars, arrays of scalars). Emitted as is.
    Plain(&'a Value),
}

impl<'a> Related<'a> {
    fn from_json(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Object(_) => Self::One(value),
            Value::Array(items) if items.iter().all(Value::is_object) => {
                Self::Many(items.iter().map(|v| v as &dyn Record).collect())
            }
            other => Self::Plain(other),
        }
    }
}
