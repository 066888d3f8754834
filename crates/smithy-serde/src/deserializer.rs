// SPDX-License-Identifier: Apache-2.0
//! The [`ShapeDeserializer`] trait: the read-side mirror of
//! [`crate::ShapeSerializer`], grounded on the real
//! `ShapeDeserializer` trait in the retrieval pack
//! (`other_examples/*smithy-schema-src-schema-serde-deserializer.rs.rs`).

use smithy_schema::{MemberSchema, Schema, SchemaRef};
use smithy_types::{BigDecimal, BigInteger, Blob, DateTime, Document, Number};

use crate::DeserializationError;

/// Visitor over one schema position's worth of input. Every method
/// defaults to [`DeserializationError::Unsupported`], mirroring
/// [`crate::ShapeSerializer`]'s default-refuse posture.
pub trait ShapeDeserializer {
    /// The error type produced by this deserializer.
    type Error: From<DeserializationError>;

    /// Read a boolean value described by `schema`.
    fn read_boolean(&mut self, schema: &dyn SchemaRef) -> Result<bool, Self::Error> {
        Err(DeserializationError::unsupported("read_boolean", schema.id().clone()).into())
    }

    /// Read any numeric value described by `schema`.
    fn read_number(&mut self, schema: &dyn SchemaRef) -> Result<Number, Self::Error> {
        Err(DeserializationError::unsupported("read_number", schema.id().clone()).into())
    }

    /// Read an arbitrary-precision integer described by `schema`.
    fn read_big_integer(&mut self, schema: &dyn SchemaRef) -> Result<BigInteger, Self::Error> {
        Err(DeserializationError::unsupported("read_big_integer", schema.id().clone()).into())
    }

    /// Read an arbitrary-precision decimal described by `schema`.
    fn read_big_decimal(&mut self, schema: &dyn SchemaRef) -> Result<BigDecimal, Self::Error> {
        Err(DeserializationError::unsupported("read_big_decimal", schema.id().clone()).into())
    }

    /// Read a UTF-8 string described by `schema`.
    fn read_string(&mut self, schema: &dyn SchemaRef) -> Result<String, Self::Error> {
        Err(DeserializationError::unsupported("read_string", schema.id().clone()).into())
    }

    /// Read opaque bytes described by `schema`.
    fn read_blob(&mut self, schema: &dyn SchemaRef) -> Result<Blob, Self::Error> {
        Err(DeserializationError::unsupported("read_blob", schema.id().clone()).into())
    }

    /// Read a point-in-time value described by `schema`.
    fn read_timestamp(&mut self, schema: &dyn SchemaRef) -> Result<DateTime, Self::Error> {
        Err(DeserializationError::unsupported("read_timestamp", schema.id().clone()).into())
    }

    /// Read a self-describing [`Document`] value described by `schema`.
    fn read_document(&mut self, schema: &dyn SchemaRef) -> Result<Document, Self::Error> {
        Err(DeserializationError::unsupported("read_document", schema.id().clone()).into())
    }

    /// Whether the value at the current position is an explicit null,
    /// without consuming it. Codecs that can't represent null (most
    /// binary formats) simply never call this; it defaults to `false`
    /// so callers that do check it behave safely on such codecs.
    fn is_null(&mut self) -> bool {
        false
    }

    /// A size hint for the current list/map position, when the codec can
    /// supply one cheaply (e.g. a length-prefixed format). `None` means
    /// "unknown ahead of time", which every streaming/self-describing
    /// codec (e.g. JSON) will return.
    fn container_size(&mut self) -> Option<usize> {
        None
    }

    /// Read a structure or union by repeatedly calling `read_member` with
    /// the next present member's schema until the codec signals there
    /// are no more. `state` threads caller-owned accumulator state (e.g.
    /// a builder) through each call without requiring a closure capture.
    ///
    /// Takes the owning [`Schema`] rather than `&dyn SchemaRef`, since
    /// resolving a field name to its [`MemberSchema`] needs the full
    /// member list, not just this position's own identity.
    ///
    /// `unknown_member` is invoked instead of `read_member` when the
    /// codec encounters a field name that doesn't resolve to any member
    /// of `schema` ("an explicit hook for unknown members,
    /// distinct from the the normal member consumer, so callers can
    /// choose to error strictly or skip permissively").
    fn read_struct<T>(
        &mut self,
        schema: &Schema,
        state: T,
        read_member: &mut dyn FnMut(T, &MemberSchema, &mut Self) -> Result<T, Self::Error>,
        unknown_member: &mut dyn FnMut(T, &str, &mut Self) -> Result<T, Self::Error>,
    ) -> Result<T, Self::Error> {
        let _ = (state, read_member, unknown_member);
        Err(DeserializationError::unsupported("read_struct", schema.id().clone()).into())
    }

    /// Read a list by repeatedly calling `read_element` until exhausted.
    fn read_list<T>(
        &mut self,
        schema: &dyn SchemaRef,
        state: T,
        read_element: &mut dyn FnMut(T, &mut Self) -> Result<T, Self::Error>,
    ) -> Result<T, Self::Error> {
        let _ = (state, read_element);
        Err(DeserializationError::unsupported("read_list", schema.id().clone()).into())
    }

    /// Read a string-keyed map by repeatedly calling `read_entry` with
    /// each entry's key until exhausted.
    fn read_map<T>(
        &mut self,
        schema: &dyn SchemaRef,
        state: T,
        read_entry: &mut dyn FnMut(T, &str, &mut Self) -> Result<T, Self::Error>,
    ) -> Result<T, Self::Error> {
        let _ = (state, read_entry);
        Err(DeserializationError::unsupported("read_map", schema.id().clone()).into())
    }
}
