//! Per-call serialization options.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use jserializer_types::Document;

/// Key metadata is emitted under when no `meta_key` is given.
pub const DEFAULT_META_KEY: &str = "meta";

/// Opaque caller value passed through to overrides and predicates.
pub type Scope = Arc<dyn Any + Send + Sync>;

/// Root wrapping requested by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Root {
    /// Use the schema's declared root, if any.
    #[default]
    Inherit,
    /// Never wrap.
    Disabled,
    Named(String),
}

/// Options for one serialization call. All optional.
#[derive(Clone, Default)]
pub struct Options {
    root: Root,
    meta: Option<Document>,
    meta_key: Option<String>,
    scope: Option<Scope>,
    only: Option<Vec<String>>,
    except: Option<Vec<String>>,
    is_collection: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.root = Root::Named(name.into());
        self
    }

    pub fn without_root(mut self) -> Self {
        self.root = Root::Disabled;
        self
    }

    pub fn meta(mut self, meta: Document) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn meta_key(mut self, key: impl Into<String>) -> Self {
        self.meta_key = Some(key.into());
        self
    }

    pub fn scope<T: Any + Send + Sync>(mut self, scope: T) -> Self {
        self.scope = Some(Arc::new(scope));
        self
    }

    /// Alias of [`Options::scope`].
    pub fn current_user<T: Any + Send + Sync>(self, user: T) -> Self {
        self.scope(user)
    }

    /// Shares an already-allocated scope value.
    pub fn shared_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Allow-list of logical names. Takes precedence over `except`.
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Deny-list of logical names. Ignored when `only` is set.
    pub fn except<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn collection(mut self) -> Self {
        self.is_collection = true;
        self
    }

    pub fn is_collection(&self) -> bool {
        self.is_collection
    }

    pub fn root_option(&self) -> &Root {
        &self.root
    }

    /// Root key for this call given the schema's declared root.
    pub fn root_name<'a>(&'a self, declared: Option<&'a str>) -> Option<&'a str> {
        match &self.root {
            Root::Inherit => declared,
            Root::Disabled => None,
            Root::Named(name) => Some(name.as_str()),
        }
    }

    pub fn meta_payload(&self) -> Option<&Document> {
        self.meta.as_ref()
    }

    pub fn resolved_meta_key(&self) -> &str {
        self.meta_key.as_deref().unwrap_or(DEFAULT_META_KEY)
    }

    pub fn scope_value(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.scope.as_deref()
    }

    /// Whether the attribute filters let `name` through.
    pub fn permits(&self, name: &str) -> bool {
        if let Some(only) = &self.only {
            return only.iter().any(|n| n == name);
        }
        match &self.except {
            Some(except) => !except.iter().any(|n| n == name),
            None => true,
        }
    }

    /// Options handed to nested serializers: no root, same scope.
    pub(crate) fn nested(&self) -> Self {
        Self {
            root: Root::Disabled,
            scope: self.scope.clone(),
            ..Self::default()
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("root", &self.root)
            .field("meta", &self.meta)
            .field("meta_key", &self.meta_key)
            .field("scope", &self.scope.is_some())
            .field("only", &self.only)
            .field("except", &self.except)
            .field("is_collection", &self.is_collection)
            .finish()
    }
}
