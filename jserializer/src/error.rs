//! Error types for schema declaration and resolution.

use thiserror::Error;

use crate::association::RelationKind;

/// Result type for serializer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while declaring schemas or resolving them against objects.
///
/// Every variant aborts the current resolution; no partial document is
/// produced.
#[derive(Debug, Error)]
pub enum Error {
    /// A relation kind other than to-one / to-many was requested.
    #[error("unable to serialize association type: {0}")]
    UnsupportedRelationKind(String),

    /// No explicit, declared, or generic representation exists for a related object.
    #[error("unable to find serializer for {type_name}")]
    SchemaNotFound { type_name: String },

    /// A record has no field with the requested name.
    #[error("missing field `{field}` on {type_name}")]
    MissingField { field: String, type_name: String },

    /// A relation's value does not match its declared cardinality.
    #[error("association `{association}` is declared {expected} but holds a value of the other cardinality")]
    RelationShapeMismatch {
        association: String,
        expected: RelationKind,
    },

    /// Collection mode was requested for a single bound object.
    #[error("expected a collection, got a single {type_name}")]
    NotACollection { type_name: String },

    /// JSON encoding failed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration or schema definition could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn schema_not_found(type_name: impl Into<String>) -> Self {
        Self::SchemaNotFound {
            type_name: type_name.into(),
        }
    }

    pub(crate) fn shape_mismatch(association: impl Into<String>, expected: RelationKind) -> Self {
        Self::RelationShapeMismatch {
            association: association.into(),
            expected,
        }
    }

    pub(crate) fn missing_field(field: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            type_name: type_name.into(),
        }
    }
}
