//! Domain-object contract for jserializer.
//!
//! The serializer engine never knows the concrete types it formats. It reads
//! them through a small contract defined here:
//! - [`Record`]: named field access on any in-memory object
//! - [`Field`]: what a record hands back for one field (JSON, a related record, a list of records)
//! - [`Related`]: a field viewed as a relation, ready to be embedded
//! - [`Document`]: the insertion-ordered output mapping
//!
//! Map-like objects (`serde_json::Map` and `serde_json::Value`) implement
//! [`Record`] out of the box, so JSON payloads can be serialized through the
//! same schemas as plain structs.

mod field;
mod json;
mod record;

pub use field::{Field, Related};
pub use record::{AsAny, Record};

/// The output mapping. Key order is insertion order.
pub type Document = serde_json::Map<String, serde_json::Value>;
