// SPDX-License-Identifier: Apache-2.0
//! The transport seam: this crate never sends a byte over a socket
//! itself — `invoke` is handed a [`Transport`] implementation instead,
//! so the whole pipeline can be exercised against an in-memory fake.

use smithy_http_binding::{HttpRequest, HttpResponse};

use crate::error::RuntimeError;

/// Sends one already-signed request and returns the raw response.
///
/// Deliberately synchronous: every other step of `invoke` (binding,
/// signing, interceptor firing) is synchronous too, so a `Transport`
/// implementation is free to bridge to an async client internally
/// (e.g. `futures::executor::block_on`) without forcing a runtime on
/// every caller of this crate.
pub trait Transport: Send + Sync {
    /// Send `request`, returning the response or a transport failure.
    fn transmit(&self, request: &HttpRequest) -> Result<HttpResponse, RuntimeError>;
}
