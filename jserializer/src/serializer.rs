//! The engine instance: one schema bound to one object (or a collection).

use std::any::Any;

use jserializer_types::{Document, Field, Record, Related};
use serde_json::Value;
use tracing::{debug, warn};

use crate::association::{AccessPath, Association, EmbedMode};
use crate::context::{Context, read_field};
use crate::lookup::{GenericLookup, SchemaLookup};
use crate::schema::Entry;
use crate::{Error, Options, Result, Schema};

static GENERIC_LOOKUP: GenericLookup = GenericLookup;

enum Subject<'a> {
    One(&'a dyn Record),
    Many(Vec<&'a dyn Record>),
}

/// Resolves a [`Schema`] against a live object.
///
/// Nothing is cached between calls: every resolution reads the object graph
/// as it is at that moment.
pub struct Serializer<'a> {
    schema: &'a Schema,
    subject: Subject<'a>,
    options: Options,
    lookup: &'a dyn SchemaLookup,
}

impl<'a> Serializer<'a> {
    pub fn new(schema: &'a Schema, object: &'a dyn Record) -> Self {
        Self {
            schema,
            subject: Subject::One(object),
            options: Options::default(),
            lookup: &GENERIC_LOOKUP,
        }
    }

    /// Binds a homogeneous collection.
    pub fn collection<T, I>(schema: &'a Schema, objects: I) -> Self
    where
        T: Record,
        I: IntoIterator<Item = &'a T>,
    {
        Self {
            schema,
            subject: Subject::Many(objects.into_iter().map(|o| o as &dyn Record).collect()),
            options: Options::default().collection(),
            lookup: &GENERIC_LOOKUP,
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Injects the capability lookup used for associations without an
    /// explicit target schema.
    pub fn with_lookup(mut self, lookup: &'a dyn SchemaLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Points this instance at another object of the same type.
    pub fn rebind(&mut self, object: &'a dyn Record) {
        self.subject = Subject::One(object);
    }

    pub fn schema(&self) -> &Schema {
        self.schema
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn scope<T: Any>(&self) -> Option<&T> {
        self.options.scope_value()?.downcast_ref::<T>()
    }

    /// Alias of [`Serializer::scope`].
    pub fn current_user<T: Any>(&self) -> Option<&T> {
        self.scope()
    }

    /// The mapping without root or metadata: an object, or an array of
    /// objects in collection mode.
    pub fn serializable_mapping(&self) -> Result<Value> {
        match &self.subject {
            Subject::One(object) if !self.options.is_collection() => {
                self.resolve(*object).map(Value::Object)
            }
            _ => {
                let items = self.serializable_collection()?;
                Ok(Value::Array(items.into_iter().map(Value::Object).collect()))
            }
        }
    }

    /// Resolves the bound objects as a collection, whatever the flag says.
    ///
    /// A single bound JSON array counts as a collection of its elements.
    pub fn serializable_collection(&self) -> Result<Vec<Document>> {
        let items: Vec<&dyn Record> = match &self.subject {
            Subject::Many(items) => items.clone(),
            Subject::One(object) => {
                let object: &dyn Record = *object;
                match object.as_any().downcast_ref::<Value>() {
                    Some(Value::Array(values)) => {
                        values.iter().map(|v| v as &dyn Record).collect()
                    }
                    _ => {
                        return Err(Error::NotACollection {
                            type_name: object.type_name().to_owned(),
                        });
                    }
                }
            }
        };

        debug!(schema = %self.schema.name(), count = items.len(), "Serializing collection");
        items.into_iter().map(|item| self.resolve(item)).collect()
    }

    /// The final document: the mapping nested under the resolved root, with
    /// metadata as a sibling.
    pub fn as_document(&self) -> Result<Value> {
        let mapping = self.serializable_mapping()?;
        let mut document = match self.options.root_name(self.schema.root()) {
            Some(root) => {
                let mut document = Document::new();
                document.insert(root.to_owned(), mapping);
                document
            }
            None => match mapping {
                Value::Object(document) => document,
                other => {
                    if self.options.meta_payload().is_some() {
                        warn!(
                            schema = %self.schema.name(),
                            "Metadata dropped: unrooted collection has no sibling slot"
                        );
                    }
                    return Ok(other);
                }
            },
        };

        if let Some(meta) = self.options.meta_payload() {
            let meta_key = self.options.resolved_meta_key();
            let replaced = document.insert(meta_key.to_owned(), Value::Object(meta.clone()));
            if replaced.is_some() {
                warn!(
                    schema = %self.schema.name(),
                    key = %meta_key,
                    "Metadata replaced an entry with the same key"
                );
            }
        }
        Ok(Value::Object(document))
    }

    /// [`Serializer::as_document`] encoded as JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.as_document()?)?)
    }

    fn resolve(&self, object: &dyn Record) -> Result<Document> {
        let ctx = Context::new(object, self.options.scope_value());
        let mut document = Document::new();
        for entry in self.schema.entries() {
            if !self.options.permits(entry.name()) || !entry.includes(&ctx) {
                continue;
            }
            let value = self.value_of(entry, &ctx)?;
            document.insert(entry.key().to_owned(), value);
        }
        Ok(document)
    }

    fn value_of(&self, entry: &Entry, ctx: &Context<'_>) -> Result<Value> {
        match entry.association() {
            None => self.plain(entry.read(ctx)?),
            Some(association) if association.embed() == EmbedMode::Ids => {
                self.ids(entry, association, ctx)
            }
            Some(association) => {
                let field = entry.read(ctx)?;
                association.serialize(field.related(), self.lookup, &self.options.nested())
            }
        }
    }

    /// Id-only embedding: raw ids read along the association's access path.
    fn ids(&self, entry: &Entry, association: &Association, ctx: &Context<'_>) -> Result<Value> {
        match association.access_path() {
            AccessPath::OwnerField(field) => self.plain(read_field(ctx.object(), field)?),
            AccessPath::RelationField { field, .. } => {
                let relation = entry.read(ctx)?;
                match relation.related() {
                    Related::Null => Ok(Value::Null),
                    Related::Plain(value) => Ok(value.clone()),
                    Related::One(target) => self.plain(read_field(target, field)?),
                    Related::Many(_) => Err(Error::shape_mismatch(
                        association.name(),
                        association.relation(),
                    )),
                }
            }
            AccessPath::Relation(_) => self.plain(entry.read(ctx)?),
        }
    }

    /// A plain attribute value. Records found in plain attributes fall back
    /// to their generic document.
    fn plain(&self, field: Field<'_>) -> Result<Value> {
        match field {
            Field::Null => Ok(Value::Null),
            Field::Value(value) => Ok(value),
            Field::Json(value) => Ok(value.clone()),
            Field::One(record) => self.generic(record).map(Value::Object),
            Field::Many(records) => records
                .into_iter()
                .map(|record| self.generic(record).map(Value::Object))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
        }
    }

    fn generic(&self, record: &dyn Record) -> Result<Document> {
        self.lookup
            .generic_document(record)
            .ok_or_else(|| Error::schema_not_found(record.type_name()))
    }
}
