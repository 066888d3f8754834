// SPDX-License-Identifier: Apache-2.0
//! **BindingMatcher**: classifies a member into exactly one of the
//! eight HTTP binding categories.

use smithy_schema::MemberSchema;

use crate::traits::{
    HttpHeaderTrait, HttpLabelTrait, HttpPrefixHeadersTrait, HttpQueryParamsTrait, HttpQueryTrait,
    HttpResponseCodeTrait, HttpPayloadTrait,
};

/// Where a member's value is projected to/from on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// A single named header (`@httpHeader`).
    Header(String),
    /// A map member whose entries become headers under a shared prefix
    /// (`@httpPrefixHeaders`).
    PrefixHeaders(String),
    /// A single named query parameter (`@httpQuery`).
    Query(String),
    /// A map member whose entries become additional query parameters
    /// (`@httpQueryParams`).
    QueryParams,
    /// A URI template label (`@httpLabel`).
    Label,
    /// The response status code (`@httpResponseCode`).
    Status,
    /// The entire body (`@httpPayload`).
    Payload,
    /// A regular body member, serialized by the codec alongside its
    /// siblings (the default when no binding trait is present).
    Body,
}

/// Classify `member` by reading its trait map ("classification
/// is driven by member traits ... members without a binding trait
/// default to BODY").
#[must_use]
pub fn classify(member: &MemberSchema) -> Binding {
    let traits = member.traits();
    if let Some(HttpHeaderTrait(name)) = traits.get(smithy_schema::TraitKey::<HttpHeaderTrait>::new()) {
        return Binding::Header(name.clone());
    }
    if let Some(HttpPrefixHeadersTrait(prefix)) = traits.get(smithy_schema::TraitKey::<HttpPrefixHeadersTrait>::new())
    {
        return Binding::PrefixHeaders(prefix.clone());
    }
    if let Some(HttpQueryTrait(name)) = traits.get(smithy_schema::TraitKey::<HttpQueryTrait>::new()) {
        return Binding::Query(name.clone());
    }
    if traits.contains(smithy_schema::TraitKey::<HttpQueryParamsTrait>::new()) {
        return Binding::QueryParams;
    }
    if traits.contains(smithy_schema::TraitKey::<HttpLabelTrait>::new()) {
        return Binding::Label;
    }
    if traits.contains(smithy_schema::TraitKey::<HttpResponseCodeTrait>::new()) {
        return Binding::Status;
    }
    if traits.contains(smithy_schema::TraitKey::<HttpPayloadTrait>::new()) {
        return Binding::Payload;
    }
    Binding::Body
}

#[cfg(test)]
mod tests {
    use super::*;
    use smithy_schema::{SchemaBuilder, TraitMap};
    use smithy_types::ShapeId;
    use std::sync::Arc;

    fn member_with_traits(traits: TraitMap) -> MemberSchema {
        let target = Arc::new(SchemaBuilder::simple(ShapeId::new("ns#Str"), smithy_schema::ShapeType::String));
        let schema = SchemaBuilder::structure(ShapeId::new("ns#S")).add_member("m", target, false, traits).build().unwrap();
        schema.member_by_name("m").unwrap().clone()
    }

    #[test]
    fn unbound_member_defaults_to_body() {
        let member = member_with_traits(TraitMap::new());
        assert_eq!(classify(&member), Binding::Body);
    }

    #[test]
    fn every_trait_classifies_to_its_category() {
        let mut header = TraitMap::new();
        header.insert(smithy_schema::TraitKey::new(), HttpHeaderTrait("X-Foo".into()));

        let mut prefix_headers = TraitMap::new();
        prefix_headers.insert(smithy_schema::TraitKey::new(), HttpPrefixHeadersTrait("X-Meta-".into()));

        let mut query = TraitMap::new();
        query.insert(smithy_schema::TraitKey::new(), HttpQueryTrait("q".into()));

        let mut query_params = TraitMap::new();
        query_params.insert(smithy_schema::TraitKey::new(), HttpQueryParamsTrait);

        let mut label = TraitMap::new();
        label.insert(smithy_schema::TraitKey::new(), HttpLabelTrait);

        let mut status = TraitMap::new();
        status.insert(smithy_schema::TraitKey::new(), HttpResponseCodeTrait);

        let mut payload = TraitMap::new();
        payload.insert(smithy_schema::TraitKey::new(), HttpPayloadTrait);

        let cases: Vec<(TraitMap, Binding)> = vec![
            (header, Binding::Header("X-Foo".into())),
            (prefix_headers, Binding::PrefixHeaders("X-Meta-".into())),
            (query, Binding::Query("q".into())),
            (query_params, Binding::QueryParams),
            (label, Binding::Label),
            (status, Binding::Status),
            (payload, Binding::Payload),
        ];
        for (traits, expected) in cases {
            let member = member_with_traits(traits);
            assert_eq!(classify(&member), expected);
        }
    }
}
