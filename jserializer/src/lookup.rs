//! Capability lookup: finding a schema for an arbitrary related object.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use jserializer_types::{Document, Record};
use tracing::debug;

use crate::Schema;

/// Strategy the engine consults when an association has no explicit target
/// schema.
pub trait SchemaLookup {
    /// Schema declared for this object's type, if any.
    fn declared_schema(&self, record: &dyn Record) -> Option<Arc<Schema>>;

    /// Generic document fallback for objects without a schema.
    fn generic_document(&self, record: &dyn Record) -> Option<Document> {
        record.to_document()
    }

    /// Schema registered under `name`, for associations that name their
    /// target instead of holding it.
    fn schema_named(&self, name: &str) -> Option<Arc<Schema>> {
        let _ = name;
        None
    }
}

/// Lookup with no declared schemas: only the generic fallback applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericLookup;

impl SchemaLookup for GenericLookup {
    fn declared_schema(&self, _record: &dyn Record) -> Option<Arc<Schema>> {
        None
    }
}

/// Schemas by name, and declared schemas by record type.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    by_name: HashMap<String, Arc<Schema>>,
    by_type: HashMap<TypeId, Arc<Schema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema under its own name. Replaces any previous schema
    /// with that name.
    pub fn register(&mut self, schema: Arc<Schema>) -> Arc<Schema> {
        debug!(schema = %schema.name(), "Schema registered");
        self.by_name
            .insert(schema.name().to_owned(), Arc::clone(&schema));
        schema
    }

    /// Declares `schema` as the serializer of record type `T`, and registers
    /// it by name.
    pub fn declare<T: Record>(&mut self, schema: Arc<Schema>) -> Arc<Schema> {
        debug!(
            schema = %schema.name(),
            record = std::any::type_name::<T>(),
            "Schema declared for record type"
        );
        self.by_type.insert(TypeId::of::<T>(), Arc::clone(&schema));
        self.register(schema)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.by_name.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl SchemaLookup for SchemaRegistry {
    fn declared_schema(&self, record: &dyn Record) -> Option<Arc<Schema>> {
        self.by_type.get(&record.as_any().type_id()).cloned()
    }

    fn schema_named(&self, name: &str) -> Option<Arc<Schema>> {
        self.get(name)
    }
}
