// SPDX-License-Identifier: Apache-2.0
//! The error a single interceptor hook may raise, plus what the pipeline
//! wraps it into.

use thiserror::Error;

/// What a hook implementation returns on failure. Any ordinary error
/// type works; the pipeline only needs its [`std::error::Error`] impl
/// to report which interceptor and hook point failed.
pub type HookResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// A hook failure, attributed to the interceptor that raised it.
#[derive(Debug, Error)]
#[error("interceptor `{name}` failed: {source}")]
pub struct InterceptorError {
    /// [`super::Interceptor::name`] of the interceptor that failed.
    pub name: String,
    /// The underlying error it raised.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}
