// SPDX-License-Identifier: Apache-2.0
//! Minimal in-house HTTP request/response types: the engine stays
//! transport-agnostic, so it does not pull in the `http` crate — there
//! is none in this workspace's dependency family, and the engine only
//! ever *produces*/*consumes* a request, never sends one.

/// An HTTP request or response body. A streamed body wires directly to
/// the transport body rather than being buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpBody {
    /// No body at all, per the empty-payload policy.
    Empty,
    /// A fully materialized body, produced by the codec serializer.
    Bytes(Vec<u8>),
    /// A data or event stream payload. The engine never buffers this —
    /// it is a marker that a caller wires the underlying stream (from
    /// `smithy-flow`/`smithy-eventstream`) directly to the transport.
    Streamed,
}

impl HttpBody {
    /// `true` for [`HttpBody::Empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, HttpBody::Empty)
    }
}

/// Header name/value pairs in wire order. Names are compared
/// case-insensitively by [`Self::get`]/[`Self::get_all`] but stored
/// verbatim so a caller that cares about exact casing (e.g. a test
/// asserting on wire bytes) can still see it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMultiMap {
    entries: Vec<(String, String)>,
}

impl HeaderMultiMap {
    /// An empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one header, preserving insertion order and any existing
    /// value under the same (case-insensitive) name.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// The first value for `name`, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }

    /// All values for `name`, case-insensitively, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter().filter(move |(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }

    /// Every `(name, value)` pair in insertion order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.entries.iter()
    }

    /// Replace every existing value for `name` with a single new one,
    /// appending if absent — used to set a header like `content-type`
    /// exactly once.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.entries.push((name, value.into()));
    }
}

/// A request the binding engine has assembled from an input shape,
/// ready to be signed (component E) and sent by a transport this crate
/// never touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method, e.g. `GET`.
    pub method: String,
    /// Resolved, percent-encoded request path.
    pub uri_path: String,
    /// Resolved, percent-encoded query string (no leading `?`), or empty.
    pub uri_query: String,
    /// Request headers.
    pub headers: HeaderMultiMap,
    /// Request body.
    pub body: HttpBody,
}

/// A response the binding engine will project onto an output (or
/// modeled error) shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMultiMap,
    /// Response body.
    pub body: HttpBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HeaderMultiMap::new();
        headers.push("Content-Type", "application/json");
        assert_eq!(headers.get("content-type"), Some("application/json"));
    }

    #[test]
    fn set_replaces_all_prior_values() {
        let mut headers = HeaderMultiMap::new();
        headers.push("X-Multi", "a");
        headers.push("X-Multi", "b");
        headers.set("x-multi", "c");
        assert_eq!(headers.get_all("X-Multi").collect::<Vec<_>>(), vec!["c"]);
    }
}
