// SPDX-License-Identifier: Apache-2.0
//! URI template parsing and resolution, and host-prefix resolution.

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::BindingError;

/// RFC 3986 unreserved set is `A-Za-z0-9-_.~`; escape everything else in
/// a single path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
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

/// Same as [`SEGMENT_ENCODE_SET`] but also escapes `/`, for non-greedy
/// labels whose value must not introduce extra path segments.
const COMPONENT_ENCODE_SET: &AsciiSet = &SEGMENT_ENCODE_SET.add(b'/');

/// One piece of a parsed URI template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Label { name: String, greedy: bool },
}

/// A URI template split into literal and label segments, ready to be
/// resolved against a set of label values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    segments: Vec<Segment>,
}

impl UriTemplate {
    /// Parse a pattern like `/items/{id}/sub/{part+}`. Each `/`-delimited
    /// piece is either verbatim literal text or a `{name}`/`{name+}`
    /// label; the leading/trailing `/` structure of the pattern is
    /// preserved by re-joining with `/` on resolve.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .map(|piece| {
                if let Some(inner) = piece.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                    if let Some(name) = inner.strip_suffix('+') {
                        Segment::Label { name: name.to_string(), greedy: true }
                    } else {
                        Segment::Label { name: inner.to_string(), greedy: false }
                    }
                } else {
                    Segment::Literal(piece.to_string())
                }
            })
            .collect();
        Self { segments }
    }

    /// Resolve every label against `values`, percent-encoding each value
    /// — preserving `/` only for greedy labels.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::MissingLabel`] if a label in the pattern
    /// has no entry in `values`.
    pub fn resolve(&self, values: &HashMap<String, String>) -> Result<String, BindingError> {
        let mut rendered = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push(text.clone()),
                Segment::Label { name, greedy } => {
                    let value = values.get(name).ok_or_else(|| BindingError::MissingLabel(name.clone()))?;
                    let set = if *greedy { SEGMENT_ENCODE_SET } else { COMPONENT_ENCODE_SET };
                    rendered.push(utf8_percent_encode(value, set).to_string());
                }
            }
        }
        Ok(rendered.join("/"))
    }
}

/// Resolve an `@endpoint` host-prefix pattern against a member-name to
/// value map of `@hostLabel` members, substituting them into the
/// template segments and prepending the result to `host`.
///
/// Host-prefix labels are never greedy (hosts have no `/`), so every
/// label is encoded with [`COMPONENT_ENCODE_SET`].
#[must_use]
pub fn resolve_host_prefix(pattern: &str, host_labels: &HashMap<String, String>, host: &str) -> String {
    let mut resolved = String::new();
    let mut rest = pattern;
    while let Some(start) = rest.find('{') {
        resolved.push_str(&rest[..start]);
        rest = &rest[start + 1..];
        let end = rest.find('}').unwrap_or(rest.len());
        let name = &rest[..end];
        if let Some(value) = host_labels.get(name) {
            resolved.push_str(&utf8_percent_encode(value, COMPONENT_ENCODE_SET).to_string());
        }
        rest = rest.get(end + 1..).unwrap_or("");
    }
    resolved.push_str(rest);
    format!("{resolved}{host}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greedy_label_preserves_slash_non_greedy_escapes_it() {
        let template = UriTemplate::parse("/items/{id}/sub/{part+}");
        let mut values = HashMap::new();
        values.insert("id".to_string(), "a b".to_string());
        values.insert("part".to_string(), "x/y z".to_string());
        assert_eq!(template.resolve(&values).unwrap(), "/items/a%20b/sub/x/y%20z");
    }

    #[test]
    fn missing_label_is_rejected() {
        let template = UriTemplate::parse("/items/{id}");
        let err = template.resolve(&HashMap::new()).unwrap_err();
        assert!(matches!(err, BindingError::MissingLabel(name) if name == "id"));
    }

    #[test]
    fn literal_only_pattern_round_trips() {
        let template = UriTemplate::parse("/health");
        assert_eq!(template.resolve(&HashMap::new()).unwrap(), "/health");
    }

    #[test]
    fn host_prefix_substitutes_and_prepends() {
        let mut labels = HashMap::new();
        labels.insert("accountId".to_string(), "123".to_string());
        assert_eq!(resolve_host_prefix("{accountId}.", &labels, "example.com"), "123.example.com");
    }
}
