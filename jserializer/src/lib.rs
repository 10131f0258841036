//! Schema-driven serializer for API response bodies.
//!
//! A [`Schema`] declares, per output type, which fields and relations of a
//! domain object become which keys of the output document. A [`Serializer`]
//! binds a schema to a live object (or a collection) and materializes it:
//! - plain attributes, optionally renamed
//! - to-one / to-many associations, embedded as documents or reduced to ids
//! - value overrides and inclusion predicates that can read a caller scope
//! - `only` / `except` attribute filters, root wrapping, metadata
//!
//! Objects are read through the [`Record`] contract from
//! `jserializer-types`; map-like JSON objects work out of the box.
//!
//! ```
//! use jserializer::{Schema, Serializer};
//! use serde_json::json;
//!
//! let schema = Schema::builder("PersonSerializer")
//!     .root("person")
//!     .attributes(["name", "age"])
//!     .attribute_as("gender", "type")
//!     .build();
//!
//! let person = json!({"name": "Sam", "age": 20, "gender": "M"});
//! let document = Serializer::new(&schema, &person).as_document().unwrap();
//! assert_eq!(document, json!({"person": {"name": "Sam", "age": 20, "type": "M"}}));
//! ```

mod association;
mod config;
mod context;
mod definition;
mod error;
mod lookup;
mod options;
mod schema;
mod serializer;

pub use association::{
    AccessPath, Association, AssociationOptions, EmbedMode, RelationKind, TargetSchema, singularize,
};
pub use config::{DEFAULT_ID_FIELD, SerializerConfig};
pub use context::Context;
pub use definition::{AssociationDefinition, AttributeDefinition, SchemaDefinition};
pub use error::{Error, Result};
pub use lookup::{GenericLookup, SchemaLookup, SchemaRegistry};
pub use options::{DEFAULT_META_KEY, Options, Root, Scope};
pub use schema::{Entry, EntryKind, IncludeFn, Schema, SchemaBuilder, ValueFn};
pub use serializer::Serializer;

pub use jserializer_types::{Document, Field, Record, Related};
