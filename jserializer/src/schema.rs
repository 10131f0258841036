//! Type schemas: the ordered table of entries a type serializes.
//!
//! A [`Schema`] is built once through a [`SchemaBuilder`] and is read-only
//! afterwards. Inheritance is a snapshot: [`Schema::extend`] copies the
//! parent's table into a new builder, so later changes on either side never
//! leak into the other.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jserializer_types::Field;
use tracing::{debug, warn};

use crate::association::{Association, AssociationOptions, EmbedMode, RelationKind};
use crate::config::{DEFAULT_ID_FIELD, SerializerConfig};
use crate::context::Context;
use crate::Result;

/// Value override: computes an entry's value instead of reading the field.
pub type ValueFn = Arc<dyn for<'a> Fn(&Context<'a>) -> Result<Field<'a>> + Send + Sync>;

/// Inclusion predicate: the entry is skipped when it returns `false`.
pub type IncludeFn = Arc<dyn Fn(&Context<'_>) -> bool + Send + Sync>;

#[derive(Debug, Clone)]
pub enum EntryKind {
    Plain,
    Association(Association),
}

/// One row of a schema.
#[derive(Clone)]
pub struct Entry {
    name: String,
    key: Option<String>,
    output_key: String,
    kind: EntryKind,
    value: Option<ValueFn>,
    include: Option<IncludeFn>,
}

impl Entry {
    fn new(name: String, key: Option<String>, kind: EntryKind) -> Self {
        Self {
            output_key: key.clone().unwrap_or_else(|| name.clone()),
            name,
            key,
            kind,
            value: None,
            include: None,
        }
    }

    /// Logical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key emitted in the output document.
    pub fn key(&self) -> &str {
        &self.output_key
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn association(&self) -> Option<&Association> {
        match &self.kind {
            EntryKind::Association(association) => Some(association),
            EntryKind::Plain => None,
        }
    }

    pub fn has_value_override(&self) -> bool {
        self.value.is_some()
    }

    pub fn has_include_override(&self) -> bool {
        self.include.is_some()
    }

    pub(crate) fn includes(&self, ctx: &Context<'_>) -> bool {
        self.include.as_ref().is_none_or(|include| include(ctx))
    }

    /// Reads the entry's raw value: the override if one is defined, else the
    /// field of the same name.
    pub(crate) fn read<'a>(&self, ctx: &Context<'a>) -> Result<Field<'a>> {
        match &self.value {
            Some(value) => value(ctx),
            None => ctx.field(&self.name),
        }
    }

    fn resolve(&mut self, type_embed: EmbedMode, id_field: &str) {
        if let EntryKind::Association(association) = &self.kind {
            let resolved = Association::new(
                association.name(),
                association.relation(),
                association.options().clone(),
                type_embed,
                id_field,
            );
            self.output_key = self
                .key
                .clone()
                .unwrap_or_else(|| resolved.default_key().to_owned());
            self.kind = EntryKind::Association(resolved);
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("key", &self.output_key)
            .field("kind", &self.kind)
            .field("value_override", &self.value.is_some())
            .field("include_override", &self.include.is_some())
            .finish()
    }
}

/// Defaults a schema was built with. Carried into subtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Defaults {
    embed: EmbedMode,
    id_field: String,
}

impl Defaults {
    fn from_config(config: &SerializerConfig) -> Self {
        Self {
            embed: config.embed,
            id_field: config.id_field.clone(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            embed: EmbedMode::default(),
            id_field: DEFAULT_ID_FIELD.to_owned(),
        }
    }
}

/// An immutable, ordered serialization schema for one output type.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    root: Option<String>,
    embed: Option<EmbedMode>,
    defaults: Defaults,
    entries: Vec<Entry>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name, Defaults::default())
    }

    /// Builder whose global defaults come from `config`.
    pub fn builder_with(name: impl Into<String>, config: &SerializerConfig) -> SchemaBuilder {
        SchemaBuilder::new(name, Defaults::from_config(config))
    }

    /// Snapshot-inherits this schema into a new builder for a subtype.
    pub fn extend(&self, name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            root: self.root.clone(),
            embed: self.embed,
            defaults: self.defaults.clone(),
            entries: self.entries.clone(),
            values: HashMap::new(),
            includes: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared root key.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Type-level embed default, if declared.
    pub fn embed(&self) -> Option<EmbedMode> {
        self.embed
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Output keys in schema order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Registration surface for a [`Schema`].
///
/// ```
/// use jserializer::{AssociationOptions, Schema};
///
/// let author = Schema::builder("AuthorSerializer").attribute("name").build();
/// let post = Schema::builder("PostSerializer")
///     .attributes(["title", "content"])
///     .has_one("author", AssociationOptions::new().serializer(&author))
///     .build();
///
/// assert_eq!(post.keys().collect::<Vec<_>>(), ["title", "content", "author"]);
/// ```
pub struct SchemaBuilder {
    name: String,
    root: Option<String>,
    embed: Option<EmbedMode>,
    defaults: Defaults,
    entries: Vec<Entry>,
    values: HashMap<String, ValueFn>,
    includes: HashMap<String, IncludeFn>,
}

impl SchemaBuilder {
    fn new(name: impl Into<String>, defaults: Defaults) -> Self {
        Self {
            name: name.into(),
            root: None,
            embed: None,
            defaults,
            entries: Vec::new(),
            values: HashMap::new(),
            includes: HashMap::new(),
        }
    }

    pub fn attribute(self, name: impl Into<String>) -> Self {
        let entry = Entry::new(name.into(), None, EntryKind::Plain);
        self.register(entry)
    }

    /// Plain attribute emitted under `key`.
    pub fn attribute_as(self, name: impl Into<String>, key: impl Into<String>) -> Self {
        let entry = Entry::new(name.into(), Some(key.into()), EntryKind::Plain);
        self.register(entry)
    }

    pub fn attributes<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(self, |builder, name| builder.attribute(name))
    }

    pub fn has_one(self, name: impl Into<String>, options: AssociationOptions) -> Self {
        self.associate(name, RelationKind::HasOne, options)
    }

    pub fn has_many(self, name: impl Into<String>, options: AssociationOptions) -> Self {
        self.associate(name, RelationKind::HasMany, options)
    }

    pub fn associate(
        self,
        name: impl Into<String>,
        relation: RelationKind,
        options: AssociationOptions,
    ) -> Self {
        let name = name.into();
        let key = options.explicit_key().map(str::to_owned);
        let association = Association::new(
            name.as_str(),
            relation,
            options,
            self.type_embed(),
            &self.defaults.id_field,
        );
        let entry = Entry::new(name, key, EntryKind::Association(association));
        self.register(entry)
    }

    /// Type-level root key.
    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.root = Some(name.into());
        self
    }

    /// Type-level embed default for associations without their own mode.
    pub fn embed(mut self, mode: EmbedMode) -> Self {
        self.embed = Some(mode);
        self
    }

    /// Overrides how the value of `name` is computed.
    pub fn value<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: for<'a> Fn(&Context<'a>) -> Result<Field<'a>> + Send + Sync + 'static,
    {
        self.values.insert(name.into(), Arc::new(f));
        self
    }

    /// Includes `name` only when `f` returns `true`.
    pub fn include_if<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context<'_>) -> bool + Send + Sync + 'static,
    {
        self.includes.insert(name.into(), Arc::new(f));
        self
    }

    pub fn build(self) -> Arc<Schema> {
        let Self {
            name,
            root,
            embed,
            defaults,
            mut entries,
            mut values,
            mut includes,
        } = self;

        let type_embed = embed.unwrap_or(defaults.embed);
        for entry in &mut entries {
            entry.resolve(type_embed, &defaults.id_field);
            if let Some(value) = values.remove(&entry.name) {
                entry.value = Some(value);
            }
            if let Some(include) = includes.remove(&entry.name) {
                entry.include = Some(include);
            }
        }
        for unknown in values.keys().chain(includes.keys()) {
            warn!(schema = %name, entry = %unknown, "Override for unknown entry ignored");
        }

        debug!(schema = %name, entries = entries.len(), root = ?root, "Schema built");
        Arc::new(Schema {
            name,
            root,
            embed,
            defaults,
            entries,
        })
    }

    fn type_embed(&self) -> EmbedMode {
        self.embed.unwrap_or(self.defaults.embed)
    }

    /// Last write wins; a replaced entry keeps its position and its overrides.
    fn register(mut self, mut entry: Entry) -> Self {
        match self.entries.iter().position(|e| e.name == entry.name) {
            Some(index) => {
                let previous = &self.entries[index];
                entry.value = entry.value.take().or_else(|| previous.value.clone());
                entry.include = entry.include.take().or_else(|| previous.include.clone());
                self.entries[index] = entry;
            }
            None => self.entries.push(entry),
        }
        self
    }
}
