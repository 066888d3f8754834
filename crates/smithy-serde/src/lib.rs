// SPDX-License-Identifier: Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! The serde kernel: a codec-agnostic visitor pair
//! ([`ShapeSerializer`]/[`ShapeDeserializer`]) that schema-driven values
//! walk themselves onto or out of.
//!
//! This crate defines the kernel and one reference codec ([`json`]); it
//! deliberately does not know about HTTP, event streams, or signing —
//! those are [`smithy_http_binding`](../smithy_http_binding/index.html),
//! [`smithy_eventstream`](../smithy_eventstream/index.html), and
//! [`sigv4`](../sigv4/index.html) respectively, each of which projects a
//! narrow [`ShapeSerializer`]/[`ShapeDeserializer`] of its own onto a
//! subset of a structure's members.

mod deserializer;
mod document;
mod error;
pub mod json;
mod serializer;

pub use deserializer::ShapeDeserializer;
pub use document::serialize_document;
pub use error::{DeserializationError, SerializationError};
pub use serializer::{DataStreamPayload, EventStreamPayload, SerializableShape, ShapeSerializer};
