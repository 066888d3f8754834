// SPDX-License-Identifier: Apache-2.0
//! Signing failures ("Signing ... Fatal for the call;
//! caller-visible as a configuration error").

use thiserror::Error;

/// A request could not be signed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// A property required to sign (region, service, credentials) was
    /// not supplied.
    #[error("missing required signing property `{0}`")]
    MissingProperty(&'static str),
    /// The request's URI could not be parsed into path/query components.
    #[error("illegal request URI: {0}")]
    IllegalUri(String),
}
