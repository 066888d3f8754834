// SPDX-License-Identifier: Apache-2.0
//! Schema-directed HTTP binding: classifies operation-input
//! members into path/query/header/status/payload/body slots, resolves
//! URI templates and host prefixes, and assembles/reads the minimal
//! in-house [`request::HttpRequest`]/[`request::HttpResponse`] types
//! this workspace uses in place of the `http` crate.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod binder;
pub mod classify;
mod error;
pub mod event_stream;
pub mod request;
pub mod scalar;
pub mod traits;
pub mod uri;

pub use binder::{apply_empty_payload_policy, assemble_request, error_response, ContentTypePriority, RequestProjections};
pub use classify::{classify, Binding};
pub use error::BindingError;
pub use event_stream::decode_buffered_event_stream;
pub use request::{HeaderMultiMap, HttpBody, HttpRequest, HttpResponse};
pub use scalar::{ScalarDeserializer, ScalarSerializer};
pub use uri::{resolve_host_prefix, UriTemplate};
