// SPDX-License-Identifier: Apache-2.0
//! Errors produced while wiring the schema, serde, binding, signing,
//! and interceptor components together into one `invoke` path.

use thiserror::Error;

/// Everything that can go wrong invoking the demo operation end to end.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// HTTP binding assembly or projection failed.
    #[error(transparent)]
    Binding(#[from] smithy_http_binding::BindingError),
    /// SigV4 signing failed.
    #[error(transparent)]
    Signing(#[from] sigv4::SigningError),
    /// The codec could not write the shape.
    #[error(transparent)]
    Serialization(#[from] smithy_serde::SerializationError),
    /// The codec could not read the shape.
    #[error(transparent)]
    Deserialization(#[from] smithy_serde::DeserializationError),
    /// An interceptor hook failed.
    #[error(transparent)]
    Interceptor(#[from] smithy_interceptor::InterceptorError),
    /// The injected transport failed to produce a response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// A body that should have been materialized bytes was a stream.
    #[error("response body was a stream, not buffered bytes")]
    UnexpectedStreamedBody,
    /// The response body was not valid JSON.
    #[error("response body was not valid JSON: {0}")]
    Codec(String),
}
