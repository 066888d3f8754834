// SPDX-License-Identifier: Apache-2.0
//! [`SchemaBuilder`]: the only way to construct a [`Schema`], so its
//! invariants can be checked once, at build time, rather than
//! defensively on every read.

use std::sync::Arc;

use smithy_types::ShapeId;
use thiserror::Error;

use crate::{EnumValues, MemberSchema, MemberTarget, Schema, ShapeType, TraitMap, MAX_BITFIELD_MEMBERS};

/// A schema construction failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A member's target schema is itself a member shape (invariant i).
    #[error("member `{member}` targets another member shape, which is not allowed")]
    TargetIsMember {
        /// The offending member's name.
        member: String,
    },
    /// Two members share the same name.
    #[error("duplicate member name `{0}`")]
    DuplicateMemberName(String),
}

/// Builds a [`Schema`], validating its invariants before returning one.
pub struct SchemaBuilder {
    id: ShapeId,
    shape_type: ShapeType,
    traits: TraitMap,
    members: Vec<MemberSchema>,
    enum_values: Option<EnumValues>,
}

impl SchemaBuilder {
    /// Start building a structure shape.
    #[must_use]
    pub fn structure(id: ShapeId) -> Self {
        Self::new(id, ShapeType::Structure)
    }

    /// Start building a union shape.
    #[must_use]
    pub fn union(id: ShapeId) -> Self {
        Self::new(id, ShapeType::Union)
    }

    /// Start building any shape type, with no members yet.
    #[must_use]
    pub fn new(id: ShapeId, shape_type: ShapeType) -> Self {
        Self {
            id,
            shape_type,
            traits: TraitMap::new(),
            members: Vec::new(),
            enum_values: None,
        }
    }

    /// Build and immediately return a simple (non-aggregate) schema with
    /// no members and no traits — a convenience for target shapes like
    /// `string`/`integer` in tests and small examples.
    #[must_use]
    pub fn simple(id: ShapeId, shape_type: ShapeType) -> Schema {
        Schema {
            id,
            shape_type,
            traits: TraitMap::new(),
            members: Vec::new(),
            required_structure_member_bitfield: 0,
            enum_values: None,
        }
    }

    /// Attach a trait value to the shape under construction.
    #[must_use]
    pub fn with_trait<T: Send + Sync + 'static>(mut self, key: crate::TraitKey<T>, value: T) -> Self {
        self.traits.insert(key, value);
        self
    }

    /// Set the permitted enum string values (for `ShapeType::Enum`).
    #[must_use]
    pub fn enum_strings(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(EnumValues::Strings(values));
        self
    }

    /// Set the permitted enum integer values (for `ShapeType::IntEnum`).
    #[must_use]
    pub fn enum_integers(mut self, values: Vec<i32>) -> Self {
        self.enum_values = Some(EnumValues::Integers(values));
        self
    }

    /// Append a member. Indices are assigned densely in call order
    /// (invariant ii). `target` must not itself be a member shape
    /// (invariant i), checked here rather than trusted from the caller.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::TargetIsMember`] if `target` is a member
    /// shape, or [`SchemaError::DuplicateMemberName`] if `name` repeats.
    pub fn try_add_member(
        mut self,
        name: impl Into<String>,
        target: Arc<Schema>,
        required: bool,
        traits: TraitMap,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        if target.shape_type == ShapeType::Member {
            return Err(SchemaError::TargetIsMember { member: name });
        }
        if self.members.iter().any(|m| m.name == name) {
            return Err(SchemaError::DuplicateMemberName(name));
        }
        let index = self.members.len();
        self.members.push(MemberSchema {
            name,
            index,
            target: MemberTarget::new(target),
            traits,
            required_by_validation: required,
        });
        Ok(self)
    }

    /// Infallible convenience wrapper over [`Self::try_add_member`] for
    /// callers that already guarantee the invariants hold (tests,
    /// hand-built fixtures); panics on violation.
    #[must_use]
    pub fn add_member(
        self,
        name: impl Into<String>,
        target: Arc<Schema>,
        required: bool,
        traits: TraitMap,
    ) -> Self {
        self.try_add_member(name, target, required, traits)
            .expect("invalid member in SchemaBuilder::add_member")
    }

    /// Finish building, checking the required-bitfield invariant
    /// (invariant iii) along the way.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if a prior `try_add_member` call would
    /// have failed but was bypassed (not reachable through the public
    /// API, retained for forward-compatibility with deserialized model
    /// data that hasn't been validated yet).
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut bitfield: u64 = 0;
        if self.members.len() <= MAX_BITFIELD_MEMBERS {
            for m in &self.members {
                if m.required_by_validation {
                    bitfield |= 1 << m.index;
                }
            }
        }
        Ok(Schema {
            id: self.id,
            shape_type: self.shape_type,
            traits: self.traits,
            members: self.members,
            required_structure_member_bitfield: bitfield,
            enum_values: self.enum_values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_targeting_a_member_is_rejected() {
        let inner_target = Arc::new(SchemaBuilder::simple(ShapeId::new("ns#Str"), ShapeType::String));
        let member_shaped = Arc::new(
            SchemaBuilder::new(ShapeId::new("ns#S$m"), ShapeType::Member)
                .add_member("inner", inner_target, false, TraitMap::new())
                .build()
                .unwrap(),
        );
        let err = SchemaBuilder::structure(ShapeId::new("ns#Bad"))
            .try_add_member("m", member_shaped, false, TraitMap::new())
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::TargetIsMember {
                member: "m".to_string()
            }
        );
    }

    #[test]
    fn duplicate_member_name_is_rejected() {
        let target = Arc::new(SchemaBuilder::simple(ShapeId::new("ns#Str"), ShapeType::String));
        let err = SchemaBuilder::structure(ShapeId::new("ns#S"))
            .add_member("a", target.clone(), false, TraitMap::new())
            .try_add_member("a", target, false, TraitMap::new())
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateMemberName("a".to_string()));
    }

    #[test]
    fn required_bitfield_is_or_of_member_flags() {
        let target = Arc::new(SchemaBuilder::simple(ShapeId::new("ns#Str"), ShapeType::String));
        let schema = SchemaBuilder::structure(ShapeId::new("ns#S"))
            .add_member("a", target.clone(), true, TraitMap::new())
            .add_member("b", target.clone(), false, TraitMap::new())
            .add_member("c", target, true, TraitMap::new())
            .build()
            .unwrap();
        assert_eq!(schema.required_structure_member_bitfield(), Some(0b101));
    }
}
