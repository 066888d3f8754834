// SPDX-License-Identifier: Apache-2.0
//! The hook trait every interceptor implements.

use crate::context::InterceptorContext;
use crate::error::HookResult;

/// An extension point observing or rewriting an operation invocation at
/// fixed lifecycle points, in the order listed on
/// [`crate::InterceptorPipeline`]. Every method has a no-op default so
/// an interceptor only overrides the points it cares about.
pub trait Interceptor<I, O>: Send + Sync {
    /// Human-readable name, used in error attribution and tracing.
    fn name(&self) -> &str;

    /// Runs once, before anything else.
    fn before_execution(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// May rewrite the input before it is serialized.
    fn modify_before_serialization(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// Runs immediately before serialization.
    fn before_serialization(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// Runs immediately after serialization produced a request.
    fn after_serialization(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// May rewrite the request before the retry loop begins.
    fn modify_before_retry_loop(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// Runs once per attempt, before anything attempt-scoped happens.
    fn before_attempt(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// May rewrite the request before it is signed.
    fn modify_before_signing(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// Runs immediately before signing.
    fn before_signing(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// Runs immediately after signing added its headers.
    fn after_signing(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// May rewrite the request before it is sent.
    fn modify_before_transmit(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// Runs immediately before transmit.
    fn before_transmit(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// Runs immediately after a response is received.
    fn after_transmit(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// May rewrite the response before it is deserialized.
    fn modify_before_deserialization(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// Runs immediately before deserialization.
    fn before_deserialization(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// Runs immediately after deserialization produced an output.
    fn after_deserialization(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// May rewrite the outcome before the attempt is considered done.
    fn modify_before_attempt_completion(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// Runs once per attempt, after the attempt has concluded (success,
    /// modeled error, or transport failure).
    fn after_attempt(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// May rewrite the final outcome before the invocation completes.
    fn modify_before_completion(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
    /// Runs once, after everything else, regardless of outcome.
    fn after_execution(&self, _ctx: &mut InterceptorContext<I, O>) -> HookResult {
        Ok(())
    }
}
