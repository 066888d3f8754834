// SPDX-License-Identifier: Apache-2.0
//! Stable shape identifiers (`namespace#Name`).

use std::fmt;

/// A Smithy shape identifier, e.g. `com.example#Widget`.
///
/// Schemas are immutable, constructed at startup, and keyed by
/// `ShapeId` for their whole process lifetime, so this type is cheap to
/// clone and compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(String);

impl ShapeId {
    /// Build a shape id from its full `namespace#name` text.
    #[must_use]
    pub fn new(full_id: impl Into<String>) -> Self {
        Self(full_id.into())
    }

    /// The full `namespace#name` text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The shape name, without namespace — what `X-Amzn-Errortype` and
    /// event-stream `:exception-type` headers carry.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.split('#').next_back().unwrap_or(&self.0)
    }

    /// The namespace portion, if present.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once('#').map(|(ns, _)| ns)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_strips_namespace() {
        let id = ShapeId::new("com.example#ThrottlingException");
        assert_eq!(id.name(), "ThrottlingException");
        assert_eq!(id.namespace(), Some("com.example"));
    }

    #[test]
    fn name_without_namespace_is_whole_string() {
        let id = ShapeId::new("Widget");
        assert_eq!(id.name(), "Widget");
        assert_eq!(id.namespace(), None);
    }
}
