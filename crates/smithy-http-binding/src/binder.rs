// SPDX-License-Identifier: Apache-2.0
//! Request/response assembly: writing a request, reading a response,
//! building error responses, and applying the empty-payload policy.
//!
//! Per-member value extraction — walking a concrete input/output shape's
//! fields, running each through [`crate::classify::classify`], and
//! feeding the right accumulator — is generated code's job; there is no
//! generator here (mirrors the scoping note in `smithy_eventstream::shape`).
//! What this module provides is what that generated code would call:
//! URI/query/header accumulation, the empty-payload policy, content-type
//! resolution, and the error-response shape.

use std::collections::HashMap;

use crate::error::BindingError;
use crate::request::{HeaderMultiMap, HttpBody, HttpRequest, HttpResponse};
use crate::uri::UriTemplate;

/// The error-type header name ("`X-Amzn-Errortype`, carrying
/// the shape name").
pub const ERROR_TYPE_HEADER: &str = "X-Amzn-Errortype";

/// Everything needed to resolve the `content-type` header exactly once,
/// in priority order.
#[derive(Debug, Clone, Default)]
pub struct ContentTypePriority<'a> {
    /// (i) An explicit payload media type from a schema trait.
    pub explicit: Option<&'a str>,
    /// (ii) A data stream payload's own declared content type.
    pub stream_content_type: Option<&'a str>,
    /// (iii) The body codec's default media type (e.g. `application/json`).
    pub codec_default: &'a str,
}

impl ContentTypePriority<'_> {
    /// Resolve to the single content-type value to send.
    #[must_use]
    pub fn resolve(&self) -> String {
        self.explicit
            .or(self.stream_content_type)
            .unwrap_or(self.codec_default)
            .to_string()
    }
}

/// Applies the empty-payload policy ("if the operation's body
/// has no members bound to BODY/PAYLOAD and `omitEmptyPayload=true`,
/// suppress the content-type header and send no body").
///
/// Returns the body to actually send and whether the content-type
/// header should be suppressed.
#[must_use]
pub fn apply_empty_payload_policy(
    has_body_or_payload_member: bool,
    omit_empty_payload: bool,
    body: HttpBody,
) -> (HttpBody, bool) {
    if !has_body_or_payload_member && omit_empty_payload {
        (HttpBody::Empty, true)
    } else {
        (body, false)
    }
}

/// Accumulated non-body projections for one request: labels for the URI
/// template, query parameters (explicit `httpQuery` entries plus
/// flattened `httpQueryParams` map entries), and headers (explicit
/// `httpHeader` entries plus flattened `httpPrefixHeaders` entries).
/// A per-operation caller fills this in member by member, driven by
/// [`crate::classify::classify`].
#[derive(Debug, Clone, Default)]
pub struct RequestProjections {
    /// URI template label values.
    pub labels: HashMap<String, String>,
    /// Query key/value pairs, in the order they should be sent.
    pub query: Vec<(String, String)>,
    /// Header name/value pairs, in the order they should be sent.
    pub headers: Vec<(String, String)>,
}

/// Assemble the final request: resolve the URI, build the query string,
/// push headers, and set `content-type` — minus actual body
/// serialization, which the caller already performed into `body`.
///
/// # Errors
///
/// Returns [`BindingError::MissingLabel`] if the URI template requires a
/// label not present in `projections.labels`.
pub fn assemble_request(
    method: &str,
    uri_template: &UriTemplate,
    projections: &RequestProjections,
    body: HttpBody,
    content_type: Option<&ContentTypePriority<'_>>,
) -> Result<HttpRequest, BindingError> {
    let uri_path = uri_template.resolve(&projections.labels)?;
    let uri_query = projections
        .query
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode_component(k), percent_encode_component(v)))
        .collect::<Vec<_>>()
        .join("&");

    let mut headers = HeaderMultiMap::new();
    for (name, value) in &projections.headers {
        headers.push(name.clone(), value.clone());
    }
    if !body.is_empty() {
        if let Some(priority) = content_type {
            headers.set("content-type", priority.resolve());
        }
    }

    Ok(HttpRequest { method: method.to_string(), uri_path, uri_query, headers, body })
}

fn percent_encode_component(value: &str) -> String {
    const SET: &percent_encoding::AsciiSet = &percent_encoding::NON_ALPHANUMERIC
        .remove(b'-')
        .remove(b'_')
        .remove(b'.')
        .remove(b'~');
    percent_encoding::utf8_percent_encode(value, SET).to_string()
}

/// Build an error response: set `X-Amzn-Errortype` to the error shape
/// name, status to the error's HTTP code, body via the codec.
#[must_use]
pub fn error_response(shape_name: &str, status: u16, body: Vec<u8>, content_type: Option<&str>) -> HttpResponse {
    let mut headers = HeaderMultiMap::new();
    headers.push(ERROR_TYPE_HEADER, shape_name);
    let body = if body.is_empty() {
        HttpBody::Empty
    } else {
        if let Some(content_type) = content_type {
            headers.set("content-type", content_type);
        }
        HttpBody::Bytes(body)
    };
    HttpResponse { status, headers, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_assembly_resolves_labels_query_and_content_type() {
        let template = UriTemplate::parse("/items/{id}");
        let mut projections = RequestProjections::default();
        projections.labels.insert("id".to_string(), "42".to_string());
        projections.query.push(("filter".to_string(), "a b".to_string()));
        projections.headers.push(("X-Trace".to_string(), "abc".to_string()));

        let priority = ContentTypePriority { explicit: None, stream_content_type: None, codec_default: "application/json" };
        let request = assemble_request(
            "GET",
            &template,
            &projections,
            HttpBody::Bytes(b"{}".to_vec()),
            Some(&priority),
        )
        .unwrap();

        assert_eq!(request.uri_path, "/items/42");
        assert_eq!(request.uri_query, "filter=a%20b");
        assert_eq!(request.headers.get("X-Trace"), Some("abc"));
        assert_eq!(request.headers.get("content-type"), Some("application/json"));
    }

    #[test]
    fn empty_body_suppresses_content_type() {
        let template = UriTemplate::parse("/health");
        let projections = RequestProjections::default();
        let priority = ContentTypePriority { explicit: None, stream_content_type: None, codec_default: "application/json" };
        let request =
            assemble_request("GET", &template, &projections, HttpBody::Empty, Some(&priority)).unwrap();
        assert_eq!(request.headers.get("content-type"), None);
    }

    #[test]
    fn empty_payload_policy_suppresses_body_and_content_type() {
        let (body, suppress) = apply_empty_payload_policy(false, true, HttpBody::Bytes(b"{}".to_vec()));
        assert_eq!(body, HttpBody::Empty);
        assert!(suppress);
    }

    #[test]
    fn empty_payload_policy_keeps_body_when_policy_not_set() {
        let (body, suppress) = apply_empty_payload_policy(false, false, HttpBody::Bytes(b"{}".to_vec()));
        assert_eq!(body, HttpBody::Bytes(b"{}".to_vec()));
        assert!(!suppress);
    }

    #[test]
    fn error_response_sets_error_type_header_and_status() {
        let response = error_response("ValidationException", 400, b"{\"message\":\"bad\"}".to_vec(), Some("application/json"));
        assert_eq!(response.status, 400);
        assert_eq!(response.headers.get(ERROR_TYPE_HEADER), Some("ValidationException"));
        assert_eq!(response.headers.get("content-type"), Some("application/json"));
    }

    #[test]
    fn content_type_priority_prefers_explicit_over_stream_over_default() {
        let priority = ContentTypePriority {
            explicit: Some("text/plain"),
            stream_content_type: Some("application/octet-stream"),
            codec_default: "application/json",
        };
        assert_eq!(priority.resolve(), "text/plain");

        let priority = ContentTypePriority { explicit: None, stream_content_type: Some("application/octet-stream"), codec_default: "application/json" };
        assert_eq!(priority.resolve(), "application/octet-stream");

        let priority = ContentTypePriority { explicit: None, stream_content_type: None, codec_default: "application/json" };
        assert_eq!(priority.resolve(), "application/json");
    }
}
