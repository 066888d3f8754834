// SPDX-License-Identifier: Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Compile-time description of Smithy shapes: the "Schema & Trait model"
//! component.
//!
//! A [`Schema`] is immutable once built and is meant to live for the
//! whole process lifetime — `Schema::build_*` constructors
//! return an owned value that callers typically wrap in an `Arc` (or a
//! `&'static` via `Box::leak`/`OnceLock`) and share from there.

mod builder;
pub mod traits;

pub use builder::{SchemaBuilder, SchemaError};
pub use traits::{TraitKey, TraitMap};

use smithy_types::ShapeId;

/// The maximum member count for which a structure's required-member
/// bitfield is valid — it only holds a meaningful value when the member
/// count is at most 64.
pub const MAX_BITFIELD_MEMBERS: usize = 64;

/// The closed set of Smithy shape type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// Opaque bytes.
    Blob,
    /// `true`/`false`.
    Boolean,
    /// 8-bit signed integer.
    Byte,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Arbitrary precision integer.
    BigInteger,
    /// Arbitrary precision decimal.
    BigDecimal,
    /// UTF-8 text.
    String,
    /// Point in time.
    Timestamp,
    /// Homogeneous ordered collection.
    List,
    /// String-keyed homogeneous collection.
    Map,
    /// Named, ordered collection of members.
    Structure,
    /// Tagged choice of members.
    Union,
    /// Self-describing polymorphic value.
    Document,
    /// Closed set of string values.
    Enum,
    /// Closed set of integer values.
    IntEnum,
    /// A service definition.
    Service,
    /// An operation definition.
    Operation,
    /// A member of an aggregate shape.
    Member,
}

impl ShapeType {
    /// `true` for the types that carry an ordered member list
    /// (structure, union; list/map conceptually have one synthetic
    /// member each, but are excluded here since callers of `members()`
    /// care about named members specifically).
    #[must_use]
    pub fn is_aggregate_with_named_members(self) -> bool {
        matches!(self, ShapeType::Structure | ShapeType::Union)
    }
}

/// A resolved pointer from a member schema to its target shape.
///
/// Invariant: a member schema's target is never itself a member —
/// enforced by [`SchemaBuilder`], never by this type, since by the time
/// a `MemberTarget` exists the invariant must already hold.
#[derive(Debug, Clone)]
pub struct MemberTarget(std::sync::Arc<Schema>);

impl MemberTarget {
    pub(crate) fn new(schema: std::sync::Arc<Schema>) -> Self {
        Self(schema)
    }

    /// Borrow the resolved target schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.0
    }
}

/// One member of an aggregate shape.
#[derive(Debug, Clone)]
pub struct MemberSchema {
    name: String,
    index: usize,
    target: MemberTarget,
    traits: TraitMap,
    /// Bit set in the owning structure's required bitfield iff this
    /// member is `@required`.
    required_by_validation: bool,
}

impl MemberSchema {
    /// The member's name, as it appears in the Smithy model.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The member's 0-based, dense, stable index within its owner.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The resolved shape this member points to.
    #[must_use]
    pub fn target(&self) -> &Schema {
        self.target.schema()
    }

    /// This member's trait map.
    #[must_use]
    pub fn traits(&self) -> &TraitMap {
        &self.traits
    }

    /// Look up a trait value by its [`TraitKey`].
    #[must_use]
    pub fn get_trait<T: Send + Sync + 'static>(&self, key: TraitKey<T>) -> Option<&T> {
        self.traits.get(key)
    }

    /// Whether this member contributes to its owner's required bitfield.
    #[must_use]
    pub fn is_required_by_validation(&self) -> bool {
        self.required_by_validation
    }
}

/// Enum shape member values: either a closed set of strings (`enum`) or
/// integers (`intEnum`).
#[derive(Debug, Clone)]
pub enum EnumValues {
    /// Permitted string values, in declaration order.
    Strings(Vec<String>),
    /// Permitted integer values, in declaration order.
    Integers(Vec<i32>),
}

/// A read-only view over either a [`Schema`] or a [`MemberSchema`],
/// implemented by both, so serializer/deserializer calls can accept
/// "whatever schema-like thing describes this position" the same way
/// the reference serializer trait (`other_examples/*smithy*serializer.rs`
/// in the retrieval pack) accepts `&dyn Schema` for both shapes and
/// members. Object-safe so it can be passed as `&dyn SchemaRef`.
pub trait SchemaRef {
    /// The shape id this position ultimately resolves to (a member's
    /// target id, or the shape's own id).
    fn id(&self) -> &ShapeId;
    /// The shape type this position ultimately resolves to.
    fn shape_type(&self) -> ShapeType;
    /// The member name, when this position is a structure/union member
    /// (used by name-driven codecs like JSON to choose the field key).
    fn member_name(&self) -> Option<&str> {
        None
    }
    /// The traits attached at this position: a shape's own traits, or
    /// (for a member) the member's traits — which is what HTTP binding
    /// classification (`httpHeader`, `httpLabel`, ...) reads from.
    fn traits(&self) -> &TraitMap;
}

impl SchemaRef for Schema {
    fn id(&self) -> &ShapeId {
        &self.id
    }
    fn shape_type(&self) -> ShapeType {
        self.shape_type
    }
    fn traits(&self) -> &TraitMap {
        &self.traits
    }
}

impl SchemaRef for MemberSchema {
    fn id(&self) -> &ShapeId {
        self.target().id()
    }
    fn shape_type(&self) -> ShapeType {
        self.target().shape_type()
    }
    fn member_name(&self) -> Option<&str> {
        Some(&self.name)
    }
    fn traits(&self) -> &TraitMap {
        &self.traits
    }
}

/// An immutable description of one Smithy shape.
#[derive(Debug, Clone)]
pub struct Schema {
    id: ShapeId,
    shape_type: ShapeType,
    traits: TraitMap,
    members: Vec<MemberSchema>,
    required_structure_member_bitfield: u64,
    enum_values: Option<EnumValues>,
}

impl Schema {
    /// This shape's stable identifier.
    #[must_use]
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// This shape's type tag.
    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    /// Look up a member by name. `O(n)` in member count; member counts
    /// for real-world shapes are small enough that this beats a hash
    /// map's constant-factor overhead, matching the array-indexed trait
    /// lookup philosophy used elsewhere in this crate.
    #[must_use]
    pub fn member_by_name(&self, name: &str) -> Option<&MemberSchema> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Look up a member by its 0-based index.
    #[must_use]
    pub fn member_by_index(&self, index: usize) -> Option<&MemberSchema> {
        self.members.get(index)
    }

    /// All members, in declaration order.
    #[must_use]
    pub fn members(&self) -> &[MemberSchema] {
        &self.members
    }

    /// Members matching a predicate, preserving declaration order — the
    /// filtering half of traversing a structure and re-emitting only
    /// the members that pass. The re-emit-to-serializer half lives in
    /// `smithy_serde::project_members`, which takes this output as
    /// input.
    pub fn members_matching<'a>(
        &'a self,
        mut predicate: impl FnMut(&MemberSchema) -> bool + 'a,
    ) -> impl Iterator<Item = &'a MemberSchema> + 'a {
        self.members.iter().filter(move |m| predicate(m))
    }

    /// Look up a trait value by its [`TraitKey`].
    #[must_use]
    pub fn get_trait<T: Send + Sync + 'static>(&self, key: TraitKey<T>) -> Option<&T> {
        self.traits.get(key)
    }

    /// This shape's trait map.
    #[must_use]
    pub fn traits(&self) -> &TraitMap {
        &self.traits
    }

    /// The OR of every member's required bit.
    /// `None` when the shape has more than [`MAX_BITFIELD_MEMBERS`]
    /// members, since the bitfield is only valid up to that count.
    #[must_use]
    pub fn required_structure_member_bitfield(&self) -> Option<u64> {
        if self.members.len() > MAX_BITFIELD_MEMBERS {
            None
        } else {
            Some(self.required_structure_member_bitfield)
        }
    }

    /// `true` if this is an `enum` (string-valued) shape.
    #[must_use]
    pub fn is_enum_string(&self) -> bool {
        matches!(self.enum_values, Some(EnumValues::Strings(_)))
    }

    /// `true` if this is an `intEnum` shape.
    #[must_use]
    pub fn is_enum_int(&self) -> bool {
        matches!(self.enum_values, Some(EnumValues::Integers(_)))
    }

    /// The permitted enum values, if this is an enum or intEnum shape.
    #[must_use]
    pub fn enum_values(&self) -> Option<&EnumValues> {
        self.enum_values.as_ref()
    }

    /// `O(1)` presence check: is the bit for `member_index` set in the
    /// required bitfield?
    #[must_use]
    pub fn is_member_required(&self, member_index: usize) -> bool {
        self.required_structure_member_bitfield()
            .is_some_and(|bf| member_index < MAX_BITFIELD_MEMBERS && bf & (1 << member_index) != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SchemaBuilder;

    #[test]
    fn member_lookup_by_name_and_index_agree() {
        let target = std::sync::Arc::new(SchemaBuilder::simple(ShapeId::new("ns#Str"), ShapeType::String).build());
        let schema = SchemaBuilder::structure(ShapeId::new("ns#S"))
            .add_member("a", target.clone(), false, TraitMap::default())
            .add_member("b", target, true, TraitMap::default())
            .build()
            .unwrap();

        assert_eq!(schema.member_by_name("b").unwrap().index(), 1);
        assert_eq!(schema.member_by_index(1).unwrap().name(), "b");
        assert!(schema.is_member_required(1));
        assert!(!schema.is_member_required(0));
    }
}
