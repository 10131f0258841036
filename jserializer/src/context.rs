use std::any::Any;

use jserializer_types::{Field, Record};

use crate::{Error, Result};

/// What value overrides and inclusion predicates see: the bound object and
/// the caller's scope.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    object: &'a dyn Record,
    scope: Option<&'a (dyn Any + Send + Sync)>,
}

impl<'a> Context<'a> {
    pub fn new(object: &'a dyn Record, scope: Option<&'a (dyn Any + Send + Sync)>) -> Self {
        Self { object, scope }
    }

    pub fn object(&self) -> &'a dyn Record {
        self.object
    }

    /// The bound object downcast to its concrete type.
    pub fn object_as<T: Record>(&self) -> Option<&'a T> {
        self.object.as_any().downcast_ref::<T>()
    }

    /// The caller-supplied scope, if it has type `T`.
    pub fn scope<T: Any>(&self) -> Option<&'a T> {
        self.scope.and_then(|scope| scope.downcast_ref::<T>())
    }

    /// Alias of [`Context::scope`].
    pub fn current_user<T: Any>(&self) -> Option<&'a T> {
        self.scope()
    }

    /// Reads a field off the bound object. Absent fields are an error.
    pub fn field(&self, name: &str) -> Result<Field<'a>> {
        read_field(self.object, name)
    }
}

pub(crate) fn read_field<'a>(object: &'a dyn Record, name: &str) -> Result<Field<'a>> {
    object
        .field(name)
        .ok_or_else(|| Error::missing_field(name, object.type_name()))
}
