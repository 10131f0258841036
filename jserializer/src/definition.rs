//! Declarative schema definitions, for schemas described in TOML or JSON
//! instead of code.
//!
//! ```toml
//! name = "BlogSerializer"
//! root = "blog"
//! attributes = ["name", { name = "url", key = "link" }]
//!
//! [[associations]]
//! name = "posts"
//! relation = "has_many"
//! serializer = "PostSerializer"
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::association::{AssociationOptions, EmbedMode, RelationKind};
use crate::config::SerializerConfig;
use crate::lookup::SchemaRegistry;
use crate::{Error, Result, Schema};

/// One schema, as written in a definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub name: String,
    /// Parent schema name; its entries are snapshot-inherited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed: Option<EmbedMode>,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
    #[serde(default)]
    pub associations: Vec<AssociationDefinition>,
}

/// A bare attribute name, or a name with an output key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeDefinition {
    Name(String),
    Keyed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationDefinition {
    pub name: String,
    /// `has_one` / `to_one` or `has_many` / `to_many`.
    pub relation: String,
    /// Target schema name, resolved against the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serializer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed: Option<EmbedMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_key: Option<String>,
}

impl AssociationDefinition {
    fn options(&self, registry: &SchemaRegistry) -> AssociationOptions {
        let mut options = AssociationOptions::new();
        if let Some(name) = &self.serializer {
            // resolve now when possible, else by name at serialization time
            options = match registry.get(name) {
                Some(schema) => options.serializer(&schema),
                None => options.serializer_named(name.as_str()),
            };
        }
        if let Some(key) = &self.key {
            options = options.key(key.as_str());
        }
        if let Some(embed) = self.embed {
            options = options.embed(embed);
        }
        if let Some(embed_key) = &self.embed_key {
            options = options.embed_key(embed_key.as_str());
        }
        options
    }
}

impl SchemaRegistry {
    /// Builds and registers a schema from its definition.
    pub fn define(&mut self, definition: SchemaDefinition) -> Result<Arc<Schema>> {
        self.define_with(definition, &SerializerConfig::default())
    }

    /// Like [`SchemaRegistry::define`], with global defaults from `config`.
    /// Ignored when the definition extends a parent.
    pub fn define_with(
        &mut self,
        definition: SchemaDefinition,
        config: &SerializerConfig,
    ) -> Result<Arc<Schema>> {
        let mut builder = match &definition.extends {
            Some(parent) => self
                .get(parent)
                .ok_or_else(|| Error::schema_not_found(parent.as_str()))?
                .extend(definition.name.as_str()),
            None => Schema::builder_with(definition.name.as_str(), config),
        };

        if let Some(root) = &definition.root {
            builder = builder.root(root.as_str());
        }
        if let Some(embed) = definition.embed {
            builder = builder.embed(embed);
        }
        for attribute in &definition.attributes {
            builder = match attribute {
                AttributeDefinition::Name(name)
                | AttributeDefinition::Keyed { name, key: None } => builder.attribute(name.as_str()),
                AttributeDefinition::Keyed {
                    name,
                    key: Some(key),
                } => builder.attribute_as(name.as_str(), key.as_str()),
            };
        }
        for association in &definition.associations {
            let relation: RelationKind = association.relation.parse()?;
            builder = builder.associate(
                association.name.as_str(),
                relation,
                association.options(self),
            );
        }

        Ok(self.register(builder.build()))
    }

    /// Parses a TOML definition and defines it.
    pub fn define_toml(&mut self, contents: &str) -> Result<Arc<Schema>> {
        let definition: SchemaDefinition = toml::from_str(contents)?;
        self.define(definition)
    }
}
