// SPDX-License-Identifier: Apache-2.0
//! Wires the schema & trait model, serde kernel, HTTP binding engine,
//! SigV4 signer, and interceptor pipeline into one `invoke` path for a
//! single concrete operation (`GetWidget`). There is no code generator
//! here — `operation` plays the role generated per-operation code would
//! play elsewhere in this workspace (see its module docs).
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod operation;
pub mod transport;

pub use error::RuntimeError;
pub use operation::{GetWidgetInput, GetWidgetOutput};
pub use transport::Transport;

use smithy_http_binding::traits::HttpTrait;
use smithy_http_binding::{HttpBody, UriTemplate};
use smithy_interceptor::{InterceptorContext, InterceptorPipeline};
use smithy_schema::{Schema, TraitKey};
use smithy_types::DateTime;
use sigv4::{payload_hash, ContentSha256Policy, Credentials, SignableRequest, Signer, SigningParams, UNSIGNED_PAYLOAD};

/// Everything `invoke` needs beyond the operation input and the
/// interceptor pipeline: who to sign as, where, and when.
#[derive(Debug, Clone)]
pub struct InvokeConfig<'a> {
    /// AWS credentials used to sign the request.
    pub credentials: &'a Credentials,
    /// AWS region, e.g. `us-east-1`.
    pub region: &'a str,
    /// AWS service signing name, e.g. `widgets`.
    pub service: &'a str,
    /// `Host` header value and signing scope input.
    pub host: &'a str,
    /// Signing timestamp.
    pub signing_time: DateTime,
}

/// Invoke `GetWidget` end to end: fire every lifecycle hook in order,
/// serialize, sign, transmit, and deserialize in between.
///
/// A `modify_*` hook failure aborts the attempt and jumps straight to
/// `modify_before_completion` with the raised error, but
/// `modify_before_completion`/`after_execution` still run — the single
/// finishing step below is reached by every exit path out of
/// [`run_attempt`], successful or not.
pub fn invoke(
    input: GetWidgetInput,
    pipeline: &InterceptorPipeline<GetWidgetInput, GetWidgetOutput>,
    signer: &Signer,
    config: &InvokeConfig<'_>,
    transport: &dyn Transport,
) -> Result<GetWidgetOutput, RuntimeError> {
    let input_schema = operation::widget_input_schema();
    let output_schema = operation::widget_output_schema();
    let operation_schema = operation::widget_operation_schema();
    let http_trait = operation_schema
        .get_trait(TraitKey::<HttpTrait>::new())
        .expect("widget_operation_schema always carries an HttpTrait")
        .clone();
    let uri_template = UriTemplate::parse(&http_trait.uri);

    let mut ctx = InterceptorContext::new(input);

    let attempt_result =
        run_attempt(&mut ctx, &input_schema, &output_schema, &uri_template, &http_trait, pipeline, signer, config, transport);

    if let Err(error) = &attempt_result {
        tracing::warn!(error = %error, "invocation failed; running completion hooks before returning");
    }

    let completion_result = pipeline.fire_modify_before_completion(&mut ctx);
    let execution_result = pipeline.fire_after_execution(&mut ctx);

    attempt_result?;
    completion_result?;
    execution_result?;
    Ok(ctx.output.expect("an Ok attempt_result always populates ctx.output"))
}

#[allow(clippy::too_many_arguments)]
fn run_attempt(
    ctx: &mut InterceptorContext<GetWidgetInput, GetWidgetOutput>,
    input_schema: &Schema,
    output_schema: &Schema,
    uri_template: &UriTemplate,
    http_trait: &HttpTrait,
    pipeline: &InterceptorPipeline<GetWidgetInput, GetWidgetOutput>,
    signer: &Signer,
    config: &InvokeConfig<'_>,
    transport: &dyn Transport,
) -> Result<GetWidgetOutput, RuntimeError> {
    pipeline.fire_before_execution(ctx)?;

    if let Err(error) = pipeline.fire_modify_before_serialization(ctx) {
        ctx.failure = Some(error.to_string());
        return Err(error.into());
    }
    pipeline.fire_before_serialization(ctx)?;

    let request = operation::serialize_input(&ctx.input, input_schema, &http_trait.method, uri_template)?;
    ctx.request = Some(request);
    pipeline.fire_after_serialization(ctx)?;

    if let Err(error) = pipeline.fire_modify_before_retry_loop(ctx) {
        ctx.failure = Some(error.to_string());
        return Err(error.into());
    }

    // A single attempt; the retry loop itself is out of scope for this
    // demo path (see the crate-level docs on what `invoke` wires up).
    ctx.attempt = 1;
    pipeline.fire_before_attempt(ctx)?;

    if let Err(error) = pipeline.fire_modify_before_signing(ctx) {
        ctx.failure = Some(error.to_string());
        return Err(error.into());
    }
    pipeline.fire_before_signing(ctx)?;
    sign_request(ctx, signer, config)?;
    pipeline.fire_after_signing(ctx)?;

    if let Err(error) = pipeline.fire_modify_before_transmit(ctx) {
        ctx.failure = Some(error.to_string());
        return Err(error.into());
    }
    pipeline.fire_before_transmit(ctx)?;

    let request = ctx.request.as_ref().expect("request populated by serialization");
    let response = transport.transmit(request)?;
    ctx.response = Some(response);
    pipeline.fire_after_transmit(ctx)?;

    if let Err(error) = pipeline.fire_modify_before_deserialization(ctx) {
        ctx.failure = Some(error.to_string());
        return Err(error.into());
    }
    pipeline.fire_before_deserialization(ctx)?;

    let response = ctx.response.as_ref().expect("response populated by transmit");
    let output = operation::deserialize_output(response, output_schema)?;
    ctx.output = Some(output);
    pipeline.fire_after_deserialization(ctx)?;

    if let Err(error) = pipeline.fire_modify_before_attempt_completion(ctx) {
        ctx.failure = Some(error.to_string());
        return Err(error.into());
    }
    pipeline.fire_after_attempt(ctx)?;

    Ok(ctx.output.clone().expect("output populated by deserialization"))
}

fn sign_request(
    ctx: &mut InterceptorContext<GetWidgetInput, GetWidgetOutput>,
    signer: &Signer,
    config: &InvokeConfig<'_>,
) -> Result<(), RuntimeError> {
    let request = ctx.request.as_mut().expect("request populated before signing");
    request.headers.set("host", config.host);

    let payload = match &request.body {
        HttpBody::Bytes(bytes) => payload_hash(bytes),
        HttpBody::Empty => payload_hash(b""),
        HttpBody::Streamed => UNSIGNED_PAYLOAD.to_string(),
    };
    let signable = SignableRequest {
        method: &request.method,
        uri_path: &request.uri_path,
        uri_query: &request.uri_query,
        headers: request.headers.iter().cloned().collect(),
        payload_hash: payload,
    };
    let params = SigningParams {
        region: config.region,
        service: config.service,
        time: config.signing_time,
        content_sha256_policy: ContentSha256Policy::WhenUnsigned,
    };
    let signed = signer.sign(&signable, config.credentials, &params)?;
    for (name, value) in signed.headers {
        request.headers.set(name, value);
    }
    Ok(())
}
