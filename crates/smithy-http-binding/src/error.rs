// SPDX-License-Identifier: Apache-2.0
//! Binding failures ("framing and signing errors are
//! fatal and non-recoverable locally").

use smithy_serde::{DeserializationError, SerializationError};
use thiserror::Error;

/// A request or response could not be assembled from / projected onto a
/// schema position.
#[derive(Debug, Error)]
pub enum BindingError {
    /// A `httpLabel` member required by the URI pattern was not set.
    #[error("missing required label `{0}`")]
    MissingLabel(String),
    /// A URI pattern referenced a label with no corresponding segment,
    /// or a segment referenced no label — a malformed operation schema.
    #[error("malformed URI pattern `{0}`")]
    MalformedPattern(String),
    /// A response status code did not fit `u16`.
    #[error("status code `{0}` is out of range")]
    StatusOutOfRange(i64),
    /// The scalar (de)serializer's underlying codec failed.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    /// The scalar (de)serializer's underlying codec failed.
    #[error(transparent)]
    Deserialization(#[from] DeserializationError),
}
