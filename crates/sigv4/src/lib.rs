// SPDX-License-Identifier: Apache-2.0
//! AWS SigV4 request signing: canonical-request construction,
//! signing-key derivation and caching, and the final header injection
//! consumed by the HTTP binding layer (`smithy-http-binding`) before
//! transmit.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod canonical;
mod error;
mod key;
mod signer;

pub use canonical::{canonical_request, payload_hash, IGNORED_HEADERS, UNSIGNED_PAYLOAD};
pub use error::SigningError;
pub use key::{derive_signing_key, SigningKeyCache, DEFAULT_CACHE_CAPACITY};
pub use signer::{ContentSha256Policy, Credentials, SignableRequest, SignedHeaders, Signer, SigningParams};
