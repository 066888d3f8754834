// SPDX-License-Identifier: Apache-2.0
//! Trait value types that drive [`crate::classify::classify`] and URI /
//! host-prefix resolution. Each is looked up through
//! `smithy_schema`'s identity-keyed [`TraitMap`](smithy_schema::TraitMap)
//! the same way a modeled `@required` or `@httpLabel` trait would be.

/// `@http(method, uri, code)` on an operation schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTrait {
    /// HTTP method, e.g. `GET`.
    pub method: String,
    /// URI pattern, e.g. `/items/{id}/sub/{part+}`.
    pub uri: String,
    /// Default success status code.
    pub code: u16,
}

/// `@httpError(code)` on a modeled error shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpErrorTrait(pub u16);

/// `@httpHeader(name)` on a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpHeaderTrait(pub String);

/// `@httpPrefixHeaders(prefix)` on a member (a string-keyed map of
/// additional headers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpPrefixHeadersTrait(pub String);

/// `@httpQuery(name)` on a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpQueryTrait(pub String);

/// `@httpQueryParams` on a member (a string-keyed map of additional
/// query parameters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpQueryParamsTrait;

/// `@httpLabel` on a member bound into the URI path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpLabelTrait;

/// `@httpResponseCode` on a member that carries the response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpResponseCodeTrait;

/// `@httpPayload` on the single member that is the entire body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpPayloadTrait;

/// `@hostLabel` on a member substituted into an `@endpoint` host prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostLabelTrait;

/// `@endpoint(hostPrefix)` on an operation schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTrait {
    /// Host-prefix pattern, e.g. `{accountId}.`.
    pub host_prefix: String,
}

/// `@mediaType(value)` explicit payload content type on a member or shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTypeTrait(pub String);

/// Marker meaning the operation's body should be suppressed entirely
/// (no content-type, no body bytes) when no member binds to BODY/PAYLOAD
/// ("empty-payload policy").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OmitEmptyPayloadTrait;
