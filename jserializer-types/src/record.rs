use std::any::Any;

use crate::{Document, Field};

/// Upcast helper so trait objects can be downcast to their concrete type.
///
/// Implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An in-memory domain object the serializer can read fields from.
///
/// Implementations map a logical field name to a [`Field`]. Returning `None`
/// means the object has no such field; the engine reports that as an error
/// rather than emitting `null`.
///
/// ```
/// use jserializer_types::{Field, Record};
///
/// struct Author {
///     name: String,
/// }
///
/// impl Record for Author {
///     fn field(&self, name: &str) -> Option<Field<'_>> {
///         match name {
///             "name" => Some(Field::value(self.name.as_str())),
///             _ => None,
///         }
///     }
/// }
///
/// let author = Author { name: "Sam".into() };
/// assert!(author.field("name").is_some());
/// assert!(author.field("email").is_none());
/// ```
pub trait Record: AsAny {
    /// Name used in error messages. Defaults to the Rust type name.
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Reads the field with the given logical name.
    fn field(&self, name: &str) -> Option<Field<'_>>;

    /// Generic document representation, used when no schema is declared for
    /// this object. Most records have none.
    fn to_document(&self) -> Option<Document> {
        None
    }
}
