// SPDX-License-Identifier: Apache-2.0
//! Error taxonomy for the serde kernel ("Serialization").

use smithy_types::ShapeId;
use thiserror::Error;

/// A serialization-side failure: the schema/value shape didn't match, or
/// the target codec doesn't support the operation being asked of it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// A concrete serializer was asked to write something it doesn't
    /// support — either because the codec genuinely can't represent it,
    /// or (for a narrow projection serializer like `HostLabelSerializer`)
    /// because this call was never meant to reach it.
    #[error("`{operation}` is not supported while serializing `{shape}`")]
    Unsupported {
        /// The `write_*` method that was called.
        operation: &'static str,
        /// The shape being written at the time.
        shape: ShapeId,
    },
    /// The value being written doesn't match what `shape` describes
    /// (e.g. writing a string where the schema says integer).
    #[error("cannot write value of kind `{value_kind}` for schema `{shape}` at `{path}`")]
    ShapeMismatch {
        /// The shape that rejected the value.
        shape: ShapeId,
        /// A human name for the value's actual kind.
        value_kind: &'static str,
        /// Dotted member-name breadcrumb locating the mismatch.
        path: String,
    },
    /// The underlying codec (e.g. `serde_json`) failed.
    #[error("codec error: {0}")]
    Codec(String),
}

impl SerializationError {
    /// Build an [`SerializationError::Unsupported`] for `operation` at `shape`.
    #[must_use]
    pub fn unsupported(operation: &'static str, shape: ShapeId) -> Self {
        Self::Unsupported { operation, shape }
    }
}

/// A deserialization-side failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeserializationError {
    /// The concrete deserializer doesn't support reading this shape type
    /// at all (narrow projection deserializers refuse everything but
    /// what they need).
    #[error("`{operation}` is not supported while deserializing `{shape}`")]
    Unsupported {
        /// The `read_*` method that was called.
        operation: &'static str,
        /// The shape being read at the time.
        shape: ShapeId,
    },
    /// A required member was absent and validation is enabled —
    /// deserializers only fail on missing required members when
    /// validation is turned on by the calling layer.
    #[error("required member `{member}` of `{shape}` is missing at `{path}`")]
    MissingRequiredMember {
        /// The structure's shape id.
        shape: ShapeId,
        /// The missing member's name.
        member: String,
        /// Dotted member-name breadcrumb locating the mismatch.
        path: String,
    },
    /// An unknown union member or enum value was encountered while
    /// strictness is enabled.
    #[error("unknown member `{member}` of `{shape}` at `{path}`")]
    UnknownMember {
        /// The structure/union's shape id.
        shape: ShapeId,
        /// The unrecognized member name.
        member: String,
        /// Dotted member-name breadcrumb locating the mismatch.
        path: String,
    },
    /// The underlying codec failed to parse its input.
    #[error("codec error: {0}")]
    Codec(String),
}

impl DeserializationError {
    /// Build a [`DeserializationError::Unsupported`] for `operation` at `shape`.
    #[must_use]
    pub fn unsupported(operation: &'static str, shape: ShapeId) -> Self {
        Self::Unsupported { operation, shape }
    }
}
