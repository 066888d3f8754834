// SPDX-License-Identifier: Apache-2.0
//! State threaded through one operation invocation's hook points.

use smithy_http_binding::{HttpRequest, HttpResponse};

/// Mutable state visible to every hook during one operation invocation.
/// Populated incrementally as the invocation advances: the orchestrator
/// (the facade crate's `invoke` path) fills in `request` after
/// serialization, `response` after transmit, and `output` after
/// deserialization; interceptors may read or rewrite any field already
/// populated for their lifecycle point.
pub struct InterceptorContext<I, O> {
    /// The operation input, as the caller supplied it.
    pub input: I,
    /// The serialized request, once serialization has run.
    pub request: Option<HttpRequest>,
    /// The raw transport response, once transmit has run.
    pub response: Option<HttpResponse>,
    /// The deserialized operation output, once deserialization has run.
    pub output: Option<O>,
    /// The current attempt number, starting at 1.
    pub attempt: u32,
    /// The error that caused the pipeline to jump to completion, if any:
    /// a `modify_*` hook failure aborts the attempt and short-circuits
    /// straight to `modify_before_completion` with the raised error.
    /// Kept as a rendered message rather than the original error, since
    /// the error itself is also returned to the invocation's caller and
    /// a `source` boxing a trait object can't be duplicated into both
    /// places.
    pub failure: Option<String>,
}

impl<I, O> InterceptorContext<I, O> {
    /// Start a fresh context for `input`, before any hook has run.
    #[must_use]
    pub fn new(input: I) -> Self {
        Self { input, request: None, response: None, output: None, attempt: 1, failure: None }
    }
}
