// SPDX-License-Identifier: Apache-2.0
//! Glue between [`Document`], the self-describing value type,
//! and the [`ShapeSerializer`]/[`ShapeDeserializer`] visitor traits.
//!
//! A document carries its own shape information per-value, so unlike a
//! schema-driven structure, recursing into a document's children reuses
//! the same schema position for every nested value — there's no member
//! schema to hand the serializer for, say, array element 3.

use smithy_schema::SchemaRef;
use smithy_types::Document;

use crate::{SerializableShape, ShapeSerializer};

/// Write `document` through `serializer` at `schema`'s position,
/// dispatching on the document's own runtime variant — a document
/// carries enough information to self-serialize without a schema
/// describing its contents.
pub fn serialize_document<S: ShapeSerializer>(
    schema: &dyn SchemaRef,
    document: &Document,
    serializer: &mut S,
) -> Result<(), S::Error> {
    match document {
        Document::Null => serializer.write_null(schema),
        Document::Boolean(b) => serializer.write_boolean(schema, *b),
        Document::Number(n) => serializer.write_number(schema, n.clone()),
        Document::String(s) => serializer.write_string(schema, s),
        Document::Blob(b) => serializer.write_blob(schema, b),
        Document::Timestamp(t) => serializer.write_timestamp(schema, *t),
        Document::Array(items) => serializer.write_list(schema, items.len(), &mut |ser| {
            for item in items {
                serialize_document(schema, item, ser)?;
            }
            Ok(())
        }),
        Document::Map(entries) => serializer.write_map(schema, entries.len(), &mut |ser| {
            for (key, value) in entries {
                ser.write_map_key(schema, key)?;
                serialize_document(schema, value, ser)?;
            }
            Ok(())
        }),
        Document::Structure {
            members,
            ..
        } => serializer.write_struct(schema, &mut |ser| {
            for (name, value) in members {
                ser.write_map_key(schema, name)?;
                serialize_document(schema, value, ser)?;
            }
            Ok(())
        }),
    }
}

impl SerializableShape for Document {
    fn serialize<S: ShapeSerializer>(&self, schema: &dyn SchemaRef, serializer: &mut S) -> Result<(), S::Error> {
        serialize_document(schema, self, serializer)
    }
}
