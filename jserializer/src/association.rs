//! Association descriptors: how a relation on an owning type is embedded.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use jserializer_types::{Document, Record, Related};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::lookup::SchemaLookup;
use crate::{Error, Options, Result, Schema, Serializer};

/// Cardinality of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    HasOne,
    HasMany,
}

impl FromStr for RelationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "has_one" | "to_one" => Ok(Self::HasOne),
            "has_many" | "to_many" => Ok(Self::HasMany),
            other => Err(Error::UnsupportedRelationKind(other.to_owned())),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HasOne => f.write_str("has_one"),
            Self::HasMany => f.write_str("has_many"),
        }
    }
}

/// Whether a relation is embedded as full documents or reduced to ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedMode {
    #[default]
    #[serde(alias = "full")]
    Objects,
    #[serde(alias = "id_only")]
    Ids,
}

/// Explicit target schema of an association.
#[derive(Clone)]
pub enum TargetSchema {
    Schema(Arc<Schema>),
    /// Resolved through [`SchemaLookup::schema_named`] at serialization time.
    Named(String),
}

impl TargetSchema {
    pub fn name(&self) -> &str {
        match self {
            Self::Schema(schema) => schema.name(),
            Self::Named(name) => name,
        }
    }
}

impl fmt::Debug for TargetSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(schema) => f.debug_tuple("Schema").field(&schema.name()).finish(),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// Options accepted by `has_one` / `has_many`.
///
/// Everything left unset falls back to the owning schema's defaults.
#[derive(Debug, Clone, Default)]
pub struct AssociationOptions {
    serializer: Option<TargetSchema>,
    key: Option<String>,
    embed: Option<EmbedMode>,
    embed_key: Option<String>,
}

impl AssociationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize related objects with this schema.
    pub fn serializer(mut self, schema: &Arc<Schema>) -> Self {
        self.serializer = Some(TargetSchema::Schema(Arc::clone(schema)));
        self
    }

    /// Serialize related objects with the schema registered under `name`.
    pub fn serializer_named(mut self, name: impl Into<String>) -> Self {
        self.serializer = Some(TargetSchema::Named(name.into()));
        self
    }

    /// Output key override.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn embed(mut self, mode: EmbedMode) -> Self {
        self.embed = Some(mode);
        self
    }

    /// Field read off each target in id-only mode (default `id`).
    pub fn embed_key(mut self, field: impl Into<String>) -> Self {
        self.embed_key = Some(field.into());
        self
    }

    pub fn target(&self) -> Option<&TargetSchema> {
        self.serializer.as_ref()
    }

    pub fn explicit_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn explicit_embed(&self) -> Option<EmbedMode> {
        self.embed
    }
}

/// Where a relation's value is read from on the owning object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPath {
    /// The relation field itself.
    Relation(String),
    /// A pre-aggregated id list exposed by the owner, e.g. `post_ids`.
    OwnerField(String),
    /// The related object first, then its id field, e.g. `account.id`.
    RelationField { relation: String, field: String },
}

/// Strips one trailing `s`. No further morphology.
pub fn singularize(name: &str) -> &str {
    name.strip_suffix('s').unwrap_or(name)
}

/// Describes one relation of an owning type.
#[derive(Debug, Clone)]
pub struct Association {
    name: String,
    relation: RelationKind,
    options: AssociationOptions,
    embed: EmbedMode,
    id_field: String,
    id_key: String,
    access_path: AccessPath,
}

impl Association {
    /// Builds a descriptor, resolving the embed mode and id field against the
    /// given defaults and deriving the id-only key and access path.
    pub fn new(
        name: impl Into<String>,
        relation: RelationKind,
        options: AssociationOptions,
        default_embed: EmbedMode,
        default_id_field: &str,
    ) -> Self {
        let name = name.into();
        let embed = options.embed.unwrap_or(default_embed);
        let id_field = options
            .embed_key
            .clone()
            .unwrap_or_else(|| default_id_field.to_owned());

        let id_key = match relation {
            RelationKind::HasMany => format!("{}_{}s", singularize(&name), id_field),
            RelationKind::HasOne => format!("{name}_{id_field}"),
        };
        let access_path = match (embed, relation) {
            (EmbedMode::Objects, _) => AccessPath::Relation(name.clone()),
            (EmbedMode::Ids, RelationKind::HasMany) => AccessPath::OwnerField(id_key.clone()),
            (EmbedMode::Ids, RelationKind::HasOne) => AccessPath::RelationField {
                relation: name.clone(),
                field: id_field.clone(),
            },
        };

        Self {
            name,
            relation,
            options,
            embed,
            id_field,
            id_key,
            access_path,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn relation(&self) -> RelationKind {
        self.relation
    }

    pub fn embed(&self) -> EmbedMode {
        self.embed
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn access_path(&self) -> &AccessPath {
        &self.access_path
    }

    pub fn options(&self) -> &AssociationOptions {
        &self.options
    }

    /// Key emitted when no explicit key is given.
    pub fn default_key(&self) -> &str {
        match self.embed {
            EmbedMode::Ids => &self.id_key,
            EmbedMode::Objects => &self.name,
        }
    }

    /// Embeds an already-read related value as full documents.
    ///
    /// The target schema is resolved once per call and applied to every
    /// element of a to-many relation. A value whose shape disagrees with the
    /// declared cardinality is [`Error::RelationShapeMismatch`].
    pub fn serialize(
        &self,
        related: Related<'_>,
        lookup: &dyn SchemaLookup,
        options: &Options,
    ) -> Result<Value> {
        match (self.relation, related) {
            (_, Related::Null) => Ok(Value::Null),
            (_, Related::Plain(value)) => Ok(value.clone()),
            (RelationKind::HasOne, Related::One(child)) => {
                self.serialize_one(child, lookup, options)
            }
            (RelationKind::HasMany, Related::Many(children)) => {
                self.serialize_many(&children, lookup, options)
            }
            (expected, _) => Err(Error::shape_mismatch(self.name.as_str(), expected)),
        }
    }

    fn serialize_one(
        &self,
        child: &dyn Record,
        lookup: &dyn SchemaLookup,
        options: &Options,
    ) -> Result<Value> {
        match self.resolve_schema(child, lookup)? {
            Some(schema) => Serializer::new(&schema, child)
                .with_lookup(lookup)
                .with_options(options.clone())
                .serializable_mapping(),
            None => generic(child, lookup).map(Value::Object),
        }
    }

    fn serialize_many(
        &self,
        children: &[&dyn Record],
        lookup: &dyn SchemaLookup,
        options: &Options,
    ) -> Result<Value> {
        let Some(&first) = children.first() else {
            return Ok(Value::Array(Vec::new()));
        };

        let Some(schema) = self.resolve_schema(first, lookup)? else {
            return children
                .iter()
                .map(|&child| generic(child, lookup).map(Value::Object))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array);
        };

        // one serializer for the whole list, rebound per element
        let mut serializer = Serializer::new(&schema, first)
            .with_lookup(lookup)
            .with_options(options.clone());
        let mut items = Vec::with_capacity(children.len());
        for &child in children {
            serializer.rebind(child);
            items.push(serializer.serializable_mapping()?);
        }
        Ok(Value::Array(items))
    }

    fn resolve_schema(
        &self,
        sample: &dyn Record,
        lookup: &dyn SchemaLookup,
    ) -> Result<Option<Arc<Schema>>> {
        match &self.options.serializer {
            Some(TargetSchema::Schema(schema)) => Ok(Some(Arc::clone(schema))),
            Some(TargetSchema::Named(name)) => lookup
                .schema_named(name)
                .map(Some)
                .ok_or_else(|| Error::schema_not_found(name.as_str())),
            None => Ok(lookup.declared_schema(sample)),
        }
    }
}

fn generic(record: &dyn Record, lookup: &dyn SchemaLookup) -> Result<Document> {
    trace!(type_name = record.type_name(), "No schema found, using generic document");
    lookup
        .generic_document(record)
        .ok_or_else(|| Error::schema_not_found(record.type_name()))
}
