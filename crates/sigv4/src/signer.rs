// SPDX-License-Identifier: Apache-2.0
//! Request signing: assembles the canonical request, the
//! string-to-sign, the signing key, and the final `Authorization` header.

use smithy_types::DateTime;

use crate::canonical::{
    canonical_headers_and_signed_headers, canonical_path, canonical_query, canonical_request, payload_hash,
    UNSIGNED_PAYLOAD,
};
use crate::error::SigningError;
use crate::key::SigningKeyCache;

/// AWS credentials used to sign a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access key id, placed in the `Credential=` scope.
    pub access_key_id: String,
    /// Secret access key used to derive the signing key.
    pub secret_access_key: String,
    /// Temporary-credentials session token, sent as `x-amz-security-token`.
    pub session_token: Option<String>,
}

impl Credentials {
    /// Build from a long-term access key / secret key pair.
    #[must_use]
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self { access_key_id: access_key_id.into(), secret_access_key: secret_access_key.into(), session_token: None }
    }

    /// Attach a session token for temporary credentials.
    #[must_use]
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }
}

/// When to add `x-amz-content-sha256` to the signed headers: some
/// services only need it when the payload hash is unsigned, others
/// require it on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSha256Policy {
    /// Only add the header when the payload hash is [`UNSIGNED_PAYLOAD`]
    /// (i.e. the body length was not known up front). This is the
    /// default, matching typical request signing.
    WhenUnsigned,
    /// Always add the header, for services that require it unconditionally.
    Always,
}

impl Default for ContentSha256Policy {
    fn default() -> Self {
        Self::WhenUnsigned
    }
}

/// A request ready to sign: method, raw (unencoded) path and query, the
/// header list as given on the wire, and a payload hash already computed
/// by the caller (a precomputed hash, or [`UNSIGNED_PAYLOAD`] for
/// unknown-length streaming bodies).
#[derive(Debug, Clone)]
pub struct SignableRequest<'a> {
    /// HTTP method, e.g. `GET`.
    pub method: &'a str,
    /// Raw request path, not yet percent-encoded.
    pub uri_path: &'a str,
    /// Raw query string (no leading `?`), not yet percent-encoded.
    pub uri_query: &'a str,
    /// Header name/value pairs as they will be sent.
    pub headers: Vec<(String, String)>,
    /// Hex-encoded SHA-256 of the body, or [`UNSIGNED_PAYLOAD`].
    pub payload_hash: String,
}

/// Parameters that are not part of the request itself but determine how
/// it is signed.
#[derive(Debug, Clone)]
pub struct SigningParams<'a> {
    /// AWS region, e.g. `us-east-1`.
    pub region: &'a str,
    /// AWS service signing name, e.g. `iam`.
    pub service: &'a str,
    /// Signing time; also becomes the `x-amz-date` header value.
    pub time: DateTime,
    /// Policy for the `x-amz-content-sha256` header.
    pub content_sha256_policy: ContentSha256Policy,
}

/// The outcome of signing: the extra headers to add to the request,
/// in the order they should be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// `(name, value)` pairs to inject — `host` is expected already
    /// present in the signed request's header list and is not repeated
    /// here; `x-amz-date`, optional `x-amz-security-token`, optional
    /// `x-amz-content-sha256`, and `Authorization` are included.
    pub headers: Vec<(String, String)>,
}

impl SignedHeaders {
    /// The computed `Authorization` header value, if present.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.headers.iter().find(|(name, _)| name == "Authorization").map(|(_, v)| v.as_str())
    }
}

/// Signs requests using a shared, process-global, concurrently readable
/// signing-key cache.
#[derive(Debug, Default)]
pub struct Signer {
    key_cache: SigningKeyCache,
}

impl Signer {
    /// Build a signer with the default-capacity key cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign `request` with `credentials` under `params`, returning the
    /// headers to add.
    pub fn sign(
        &self,
        request: &SignableRequest<'_>,
        credentials: &Credentials,
        params: &SigningParams<'_>,
    ) -> Result<SignedHeaders, SigningError> {
        if params.region.is_empty() {
            return Err(SigningError::MissingProperty("region"));
        }
        if params.service.is_empty() {
            return Err(SigningError::MissingProperty("service"));
        }

        let amz_date = params.time.to_amz_date();
        let short_date = params.time.to_amz_short_date();

        let mut headers = request.headers.clone();
        headers.push(("x-amz-date".to_string(), amz_date.clone()));
        if let Some(token) = &credentials.session_token {
            headers.push(("x-amz-security-token".to_string(), token.clone()));
        }
        let add_content_sha256 = match params.content_sha256_policy {
            ContentSha256Policy::Always => true,
            ContentSha256Policy::WhenUnsigned => request.payload_hash == UNSIGNED_PAYLOAD,
        };
        if add_content_sha256 {
            headers.push(("x-amz-content-sha256".to_string(), request.payload_hash.clone()));
        }

        let path = canonical_path(request.uri_path);
        let query = canonical_query(request.uri_query);
        let (canonical_headers, signed_headers) = canonical_headers_and_signed_headers(&headers);
        let canonical = canonical_request(request.method, &path, &query, &canonical_headers, &signed_headers, &request.payload_hash);

        let scope = format!("{short_date}/{}/{}/aws4_request", params.region, params.service);
        let string_to_sign =
            format!("AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{}", payload_hash(canonical.as_bytes()));

        let signing_key =
            self.key_cache.get_or_derive(&credentials.secret_access_key, &short_date, params.region, params.service);
        let signature = crate::key::sign(&signing_key, &string_to_sign);

        let authorization = format!(
            "AWS4-HMAC-SHA256 Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            credentials.access_key_id
        );

        let mut added = vec![("x-amz-date".to_string(), amz_date)];
        if let Some(token) = &credentials.session_token {
            added.push(("x-amz-security-token".to_string(), token.clone()));
        }
        if add_content_sha256 {
            added.push(("x-amz-content-sha256".to_string(), request.payload_hash.clone()));
        }
        added.push(("Authorization".to_string(), authorization));

        Ok(SignedHeaders { headers: added })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_signing_time() -> DateTime {
        DateTime::from_chrono(
            chrono::DateTime::parse_from_rfc3339("2015-08-30T12:36:00Z").unwrap().with_timezone(&chrono::Utc),
        )
    }

    #[test]
    fn known_answer_authorization_header() {
        let request = SignableRequest {
            method: "GET",
            uri_path: "/",
            uri_query: "Action=ListUsers&Version=2010-05-08",
            headers: vec![("Host".to_string(), "iam.amazonaws.com".to_string())],
            payload_hash: payload_hash(b""),
        };
        let credentials = Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY");
        let params = SigningParams {
            region: "us-east-1",
            service: "iam",
            time: fixed_signing_time(),
            content_sha256_policy: ContentSha256Policy::WhenUnsigned,
        };

        let signer = Signer::new();
        let signed = signer.sign(&request, &credentials, &params).unwrap();

        assert_eq!(
            signed.authorization(),
            Some(
                "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
                 SignedHeaders=host;x-amz-date, \
                 Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
            )
        );
    }

    #[test]
    fn empty_query_signs_without_literal_null() {
        let request = SignableRequest {
            method: "GET",
            uri_path: "/path",
            uri_query: "",
            headers: vec![("Host".to_string(), "example.com".to_string())],
            payload_hash: payload_hash(b""),
        };
        let credentials = Credentials::new("AKID", "secret");
        let params = SigningParams {
            region: "us-east-1",
            service: "execute-api",
            time: fixed_signing_time(),
            content_sha256_policy: ContentSha256Policy::WhenUnsigned,
        };

        let signer = Signer::new();
        let signed = signer.sign(&request, &credentials, &params).unwrap();
        assert!(signed.authorization().unwrap().contains("SignedHeaders=host;x-amz-date"));
        assert!(!canonical_query(request.uri_query).contains("null"));
    }

    #[test]
    fn missing_region_is_rejected() {
        let request = SignableRequest {
            method: "GET",
            uri_path: "/",
            uri_query: "",
            headers: vec![],
            payload_hash: payload_hash(b""),
        };
        let credentials = Credentials::new("AKID", "secret");
        let params =
            SigningParams { region: "", service: "iam", time: fixed_signing_time(), content_sha256_policy: Default::default() };
        let signer = Signer::new();
        assert_eq!(signer.sign(&request, &credentials, &params), Err(SigningError::MissingProperty("region")));
    }

    #[test]
    fn session_token_is_added_as_header_and_signed() {
        let request = SignableRequest {
            method: "GET",
            uri_path: "/",
            uri_query: "",
            headers: vec![("Host".to_string(), "example.com".to_string())],
            payload_hash: payload_hash(b""),
        };
        let credentials = Credentials::new("AKID", "secret").with_session_token("TOKEN123");
        let params = SigningParams {
            region: "us-east-1",
            service: "execute-api",
            time: fixed_signing_time(),
            content_sha256_policy: Default::default(),
        };
        let signer = Signer::new();
        let signed = signer.sign(&request, &credentials, &params).unwrap();
        assert!(signed.headers.iter().any(|(n, v)| n == "x-amz-security-token" && v == "TOKEN123"));
        assert!(signed.authorization().unwrap().contains("x-amz-security-token"));
    }
}
