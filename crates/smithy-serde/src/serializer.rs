// SPDX-License-Identifier: Apache-2.0
//! The [`ShapeSerializer`] trait: a visitor that a schema-driven value
//! walks itself onto. Grounded directly on the real
//! `ShapeSerializer` trait in the retrieval pack
//! (`other_examples/*smithy-types-src-schema-serde-serializer.rs.rs`):
//! one associated `Error` type, one `write_*` method per shape category,
//! every method given a default body so a narrow projection serializer
//! (e.g. one that only ever writes a single header value) need not
//! implement the rest.

use smithy_schema::SchemaRef;
use smithy_types::{BigDecimal, BigInteger, Blob, DateTime, Document, Number};

use crate::SerializationError;

/// A type that knows how to serialize itself against a schema position,
/// by calling back into a [`ShapeSerializer`].
///
/// Analogous to the pack's `SerializableStruct`, but not limited to
/// structures: any shape-shaped value implements this.
pub trait SerializableShape {
    /// Emit `self` through `serializer` at the position described by `schema`.
    fn serialize<S: ShapeSerializer>(&self, schema: &dyn SchemaRef, serializer: &mut S) -> Result<(), S::Error>;
}

/// A payload that streams raw bytes outside the normal member tree
/// ("data streams ... bypass the schema's own member
/// encoding and are instead written directly to the wire").
pub trait DataStreamPayload {
    /// Access to the stream's bytes is intentionally not modeled further
    /// here — HTTP binding (component D) reads the underlying body
    /// directly rather than going through this trait's methods.
    fn content_length_hint(&self) -> Option<u64>;
}

/// A payload that is itself a sequence of framed events, tying into the
/// event-stream framing layer.
pub trait EventStreamPayload {
    /// A human name for the stream's event shape, for diagnostics only.
    fn event_shape_name(&self) -> &str;
}

/// Visitor over one schema position's worth of value. Every method
/// defaults to [`SerializationError::Unsupported`] so concrete
/// serializers only implement what they actually accept — a narrow
/// serializer subtype refuses every other call.
pub trait ShapeSerializer {
    /// The error type produced by this serializer; must be constructible
    /// from [`SerializationError`] so the default method bodies compile.
    type Error: From<SerializationError>;

    /// Write a boolean value at `schema`.
    fn write_boolean(&mut self, schema: &dyn SchemaRef, _value: bool) -> Result<(), Self::Error> {
        Err(SerializationError::unsupported("write_boolean", schema.id().clone()).into())
    }

    /// Write any numeric value at `schema`. `Number` unifies
    /// byte/short/integer/long/float/double.
    fn write_number(&mut self, schema: &dyn SchemaRef, _value: Number) -> Result<(), Self::Error> {
        Err(SerializationError::unsupported("write_number", schema.id().clone()).into())
    }

    /// Write an arbitrary-precision integer at `schema`.
    fn write_big_integer(&mut self, schema: &dyn SchemaRef, _value: &BigInteger) -> Result<(), Self::Error> {
        Err(SerializationError::unsupported("write_big_integer", schema.id().clone()).into())
    }

    /// Write an arbitrary-precision decimal at `schema`.
    fn write_big_decimal(&mut self, schema: &dyn SchemaRef, _value: &BigDecimal) -> Result<(), Self::Error> {
        Err(SerializationError::unsupported("write_big_decimal", schema.id().clone()).into())
    }

    /// Write a UTF-8 string at `schema` (also used for enum string values).
    fn write_string(&mut self, schema: &dyn SchemaRef, _value: &str) -> Result<(), Self::Error> {
        Err(SerializationError::unsupported("write_string", schema.id().clone()).into())
    }

    /// Write opaque bytes at `schema`.
    fn write_blob(&mut self, schema: &dyn SchemaRef, _value: &Blob) -> Result<(), Self::Error> {
        Err(SerializationError::unsupported("write_blob", schema.id().clone()).into())
    }

    /// Write a point-in-time value at `schema`.
    fn write_timestamp(&mut self, schema: &dyn SchemaRef, _value: DateTime) -> Result<(), Self::Error> {
        Err(SerializationError::unsupported("write_timestamp", schema.id().clone()).into())
    }

    /// Write an explicit null at `schema` (distinct from omitting the
    /// member entirely; only meaningful for codecs that distinguish the
    /// two, e.g. JSON).
    fn write_null(&mut self, schema: &dyn SchemaRef) -> Result<(), Self::Error> {
        Err(SerializationError::unsupported("write_null", schema.id().clone()).into())
    }

    /// Write a self-describing [`Document`] value at `schema`.
    fn write_document(&mut self, schema: &dyn SchemaRef, _value: &Document) -> Result<(), Self::Error> {
        Err(SerializationError::unsupported("write_document", schema.id().clone()).into())
    }

    /// Write a structure or union by invoking `emit_members`, which calls
    /// back into `self` for each present member in turn. The caller (not
    /// this trait) decides which members are present and in what order;
    /// this method's job is purely to frame the structure (e.g. open and
    /// close a JSON object).
    fn write_struct(
        &mut self,
        schema: &dyn SchemaRef,
        emit_members: &mut dyn FnMut(&mut Self) -> Result<(), Self::Error>,
    ) -> Result<(), Self::Error> {
        let _ = emit_members;
        Err(SerializationError::unsupported("write_struct", schema.id().clone()).into())
    }

    /// Write a list by invoking `emit_elements` once, which is expected
    /// to call back into `self` once per element.
    fn write_list(
        &mut self,
        schema: &dyn SchemaRef,
        size_hint: usize,
        emit_elements: &mut dyn FnMut(&mut Self) -> Result<(), Self::Error>,
    ) -> Result<(), Self::Error> {
        let _ = (size_hint, emit_elements);
        Err(SerializationError::unsupported("write_list", schema.id().clone()).into())
    }

    /// Write a string-keyed map by invoking `emit_entries` once; for each
    /// entry the caller must call [`Self::write_map_key`] followed by a
    /// `write_*` for the value, in that order.
    fn write_map(
        &mut self,
        schema: &dyn SchemaRef,
        size_hint: usize,
        emit_entries: &mut dyn FnMut(&mut Self) -> Result<(), Self::Error>,
    ) -> Result<(), Self::Error> {
        let _ = (size_hint, emit_entries);
        Err(SerializationError::unsupported("write_map", schema.id().clone()).into())
    }

    /// Write one map entry's key. Must be called immediately before the
    /// corresponding value write, inside a [`Self::write_map`] callback.
    fn write_map_key(&mut self, schema: &dyn SchemaRef, _key: &str) -> Result<(), Self::Error> {
        Err(SerializationError::unsupported("write_map_key", schema.id().clone()).into())
    }

    /// Write a raw byte stream payload at `schema`. Bypasses the normal
    /// member tree; HTTP binding is expected to special-case
    /// members carrying this trait rather than routing through a codec.
    fn write_data_stream(&mut self, schema: &dyn SchemaRef, _value: &dyn DataStreamPayload) -> Result<(), Self::Error> {
        Err(SerializationError::unsupported("write_data_stream", schema.id().clone()).into())
    }

    /// Write an event stream payload at `schema`. Also bypasses the
    /// normal member tree; frame encoding is component C's job.
    fn write_event_stream(
        &mut self,
        schema: &dyn SchemaRef,
        _value: &dyn EventStreamPayload,
    ) -> Result<(), Self::Error> {
        Err(SerializationError::unsupported("write_event_stream", schema.id().clone()).into())
    }
}
