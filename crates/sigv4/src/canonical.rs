// SPDX-License-Identifier: Apache-2.0
//! Canonical request construction: path, query, headers, and payload
//! hash normalized into the exact form the signature is computed over.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use sha2::{Digest, Sha256};

/// Headers SigV4 never signs, regardless of casing.
pub const IGNORED_HEADERS: [&str; 4] = ["connection", "x-amzn-trace-id", "user-agent", "expect"];

/// RFC 3986 unreserved set is `A-Za-z0-9-_.~`; everything else gets
/// percent-encoded in a path segment.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'|')
    .add(b'\\')
    .add(b'!')
    .add(b'$')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'=')
    .add(b':')
    .add(b'@');

/// Same as [`PATH_ENCODE_SET`] but also escapes `/`, for query keys,
/// values, and non-greedy URI labels.
const COMPONENT_ENCODE_SET: &AsciiSet = &PATH_ENCODE_SET.add(b'/');

fn percent_encode(input: &str, set: &'static AsciiSet) -> String {
    utf8_percent_encode(input, set).to_string()
}

/// Percent-encode one path segment, preserving `/` — shared with greedy
/// URI label encoding, which also preserves `/`.
#[must_use]
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment, PATH_ENCODE_SET)
}

/// Percent-encode a query key or value, or a non-greedy URI label —
/// `/` is also escaped here, since only greedy labels preserve it.
#[must_use]
pub fn encode_component(component: &str) -> String {
    percent_encode(component, COMPONENT_ENCODE_SET)
}

/// Canonical path: the URI's normalized raw path, `/` if empty, each
/// segment percent-encoded without re-encoding `/`.
#[must_use]
pub fn canonical_path(raw_path: &str) -> String {
    if raw_path.is_empty() {
        return "/".to_string();
    }
    raw_path
        .split('/')
        .map(encode_path_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Canonical query string: no query produces an empty string, never the
/// literal `"null"`.
#[must_use]
pub fn canonical_query(raw_query: &str) -> String {
    if raw_query.is_empty() {
        return String::new();
    }
    let mut pairs: Vec<(String, String)> = raw_query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (encode_component(k), encode_component(v)),
            None => (encode_component(pair), String::new()),
        })
        .collect();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn trim_header_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical headers block and signed-headers string together: computed
/// in one pass since both are derived from the same sorted, filtered,
/// lower-cased header list.
#[must_use]
pub fn canonical_headers_and_signed_headers(headers: &[(String, String)]) -> (String, String) {
    let mut by_name: std::collections::BTreeMap<String, Vec<String>> = std::collections::BTreeMap::new();
    for (name, value) in headers {
        let lower = name.to_ascii_lowercase();
        if IGNORED_HEADERS.contains(&lower.as_str()) {
            continue;
        }
        by_name.entry(lower).or_default().push(trim_header_value(value.trim()));
    }

    let mut canonical = String::new();
    let mut signed = Vec::with_capacity(by_name.len());
    for (name, values) in &by_name {
        canonical.push_str(name);
        canonical.push(':');
        canonical.push_str(&values.join(","));
        canonical.push('\n');
        signed.push(name.clone());
    }
    (canonical, signed.join(";"))
}

/// Hex-encoded SHA-256 of `body`.
#[must_use]
pub fn payload_hash(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}

/// Sentinel payload hash for bodies whose content is intentionally not
/// signed, e.g. streaming bodies of unknown length at signing time.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// Assemble the canonical request: method, canonical path,
/// canonical query, canonical headers, signed-headers, payload hash —
/// newline-joined in that order.
#[must_use]
pub fn canonical_request(
    method: &str,
    canonical_path: &str,
    canonical_query: &str,
    canonical_headers: &str,
    signed_headers: &str,
    payload_hash: &str,
) -> String {
    format!("{method}\n{canonical_path}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\n{payload_hash}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_query_is_empty_for_no_query_not_literal_null() {
        assert_eq!(canonical_query(""), "");
    }

    #[test]
    fn canonical_query_sorts_by_encoded_key() {
        assert_eq!(canonical_query("b=2&a=1"), "a=1&b=2");
    }

    #[test]
    fn canonical_query_keys_without_values_produce_trailing_equals() {
        assert_eq!(canonical_query("flag"), "flag=");
    }

    #[test]
    fn canonical_headers_ignores_reserved_set_case_insensitively() {
        let headers = vec![
            ("Host".to_string(), "example.com".to_string()),
            ("User-Agent".to_string(), "test/1.0".to_string()),
            ("X-Amzn-Trace-Id".to_string(), "abc".to_string()),
        ];
        let (canonical, signed) = canonical_headers_and_signed_headers(&headers);
        assert_eq!(canonical, "host:example.com\n");
        assert_eq!(signed, "host");
    }

    #[test]
    fn canonical_headers_reordering_input_produces_identical_output() {
        let a = vec![("Host".to_string(), "x".to_string()), ("X-Z".to_string(), "1".to_string())];
        let b = vec![("X-Z".to_string(), "1".to_string()), ("Host".to_string(), "x".to_string())];
        assert_eq!(canonical_headers_and_signed_headers(&a), canonical_headers_and_signed_headers(&b));
    }

    #[test]
    fn canonical_headers_collapses_internal_whitespace() {
        let headers = vec![("X-Custom".to_string(), "  a   b  c ".to_string())];
        let (canonical, _) = canonical_headers_and_signed_headers(&headers);
        assert_eq!(canonical, "x-custom:a b c\n");
    }

    #[test]
    fn canonical_path_preserves_slash_and_encodes_space() {
        assert_eq!(canonical_path("/items/a b"), "/items/a%20b");
    }

    #[test]
    fn empty_path_becomes_root() {
        assert_eq!(canonical_path(""), "/");
    }
}
