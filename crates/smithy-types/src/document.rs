// SPDX-License-Identifier: Apache-2.0
//! [`Document`]: the polymorphic, self-describing value type.

use std::collections::BTreeMap;

use crate::{Blob, DateTime, Number, ShapeId};

/// A polymorphic in-memory value produced or consumed by the serde
/// kernel, independent of which codec (JSON/CBOR/XML) produced it.
///
/// Equality is defined by value: two documents built from
/// different codecs but carrying the same logical data compare equal,
/// including numeric promotion via [`Number`]'s `PartialEq`.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// The Smithy `null` value.
    Null,
    /// A boolean.
    Boolean(bool),
    /// Any numeric shape, from `byte` through `bigDecimal`.
    Number(Number),
    /// A string.
    String(String),
    /// A blob (opaque bytes).
    Blob(Blob),
    /// A timestamp.
    Timestamp(DateTime),
    /// A list of documents.
    Array(Vec<Document>),
    /// A string-keyed map of documents.
    Map(BTreeMap<String, Document>),
    /// A structure or union value, carrying the schema id that produced
    /// it and — for polymorphic document fields — a discriminator shape
    /// id used to pick the concrete type on deserialization.
    Structure {
        /// The shape id of the structure/union schema.
        schema_id: ShapeId,
        /// The discriminator used to resolve a polymorphic document.
        discriminator: Option<ShapeId>,
        /// Member values, keyed by member name.
        members: BTreeMap<String, Document>,
    },
}

impl Document {
    /// Build a structure-shaped document with no discriminator.
    #[must_use]
    pub fn structure(schema_id: ShapeId, members: BTreeMap<String, Document>) -> Self {
        Self::Structure {
            schema_id,
            discriminator: None,
            members,
        }
    }

    /// `true` for [`Document::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    /// Look up a member by name, for `Map` and `Structure` variants.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Document> {
        match self {
            Document::Map(m) => m.get(key),
            Document::Structure { members, .. } => members.get(key),
            _ => None,
        }
    }

    /// View as a string, if this document holds one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    /// View as an array, if this document holds one.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Document]> {
        match self {
            Document::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Document::String(s.to_string())
    }
}

impl From<bool> for Document {
    fn from(b: bool) -> Self {
        Document::Boolean(b)
    }
}

impl From<i32> for Document {
    fn from(v: i32) -> Self {
        Document::Number(Number::Integer(v))
    }
}

impl From<i64> for Document {
    fn from(v: i64) -> Self {
        Document::Number(Number::Long(v))
    }
}

impl From<f64> for Document {
    fn from(v: f64) -> Self {
        Document::Number(Number::Double(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_value_based_across_numeric_promotion() {
        let a = Document::Number(Number::Integer(1));
        let b = Document::Number(Number::Double(1.0));
        assert_eq!(a, b);
    }

    #[test]
    fn map_and_structure_both_support_get() {
        let mut members = BTreeMap::new();
        members.insert("a".to_string(), Document::from(1i32));
        let doc = Document::structure(ShapeId::new("ns#S"), members);
        assert_eq!(doc.get("a"), Some(&Document::from(1i32)));
        assert_eq!(doc.get("missing"), None);
    }

    #[test]
    fn nested_structures_compare_by_value() {
        let mut inner_a = BTreeMap::new();
        inner_a.insert("x".into(), Document::from(1i64));
        let mut inner_b = BTreeMap::new();
        inner_b.insert("x".into(), Document::from(1i64));
        let a = Document::structure(ShapeId::new("ns#A"), inner_a);
        let b = Document::structure(ShapeId::new("ns#A"), inner_b);
        assert_eq!(a, b);
    }
}
