// SPDX-License-Identifier: Apache-2.0
//! Ordered firing of the 19 lifecycle points across every registered
//! interceptor.

use crate::context::InterceptorContext;
use crate::error::InterceptorError;
use crate::interceptor::Interceptor;

/// Fire a "before/after"-style hook across every interceptor,
/// front-to-back: all interceptors run regardless of earlier failures;
/// only the last error is returned ("all interceptors run; errors
/// are collected; only the last error is rethrown; earlier errors are
/// logged").
macro_rules! fire_collect_last {
    ($self:expr, $method:ident, $ctx:expr) => {{
        let mut last: Option<InterceptorError> = None;
        for interceptor in &$self.interceptors {
            if let Err(source) = interceptor.$method($ctx) {
                let error = InterceptorError { name: interceptor.name().to_string(), source };
                tracing::warn!(interceptor = %error, "interceptor hook failed");
                last = Some(error);
            }
        }
        match last {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }};
}

/// Fire a "modify"-style hook across every interceptor, front-to-back:
/// the first failure stops this hook point immediately ("an error
/// aborts the pipeline and short-circuits to `modify_before_completion`
/// with the raised error"). Jumping ahead to the completion hooks is the
/// caller's responsibility — see [`InterceptorPipeline`]'s docs.
macro_rules! fire_short_circuit {
    ($self:expr, $method:ident, $ctx:expr) => {{
        for interceptor in &$self.interceptors {
            if let Err(source) = interceptor.$method($ctx) {
                return Err(InterceptorError { name: interceptor.name().to_string(), source });
            }
        }
        Ok(())
    }};
}

/// An ordered, registration-order list of interceptors, exposing one
/// `fire_*` method per lifecycle point an invocation passes through.
///
/// This type only fires hooks; it does not itself serialize, sign,
/// transmit, or deserialize anything, and it does not implement the
/// "jump to `modify_before_completion`" control flow a `modify_*`
/// failure calls for — that interleaving of real work and hook points
/// belongs to the orchestrator built on top of this pipeline (the
/// facade crate's `invoke` path), which should call
/// `fire_modify_before_completion`/`fire_after_execution` from a single
/// finishing step reached by every exit path, successful or not.
pub struct InterceptorPipeline<I, O> {
    interceptors: Vec<Box<dyn Interceptor<I, O>>>,
}

impl<I, O> InterceptorPipeline<I, O> {
    /// An empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self { interceptors: Vec::new() }
    }

    /// Register an interceptor. Hooks fire in registration order, for
    /// both before/modify and after hooks ("no reversal").
    pub fn register(&mut self, interceptor: Box<dyn Interceptor<I, O>>) {
        self.interceptors.push(interceptor);
    }

    /// Number of registered interceptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// `true` if no interceptor is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Fires [`Interceptor::before_execution`] on every interceptor.
    pub fn fire_before_execution(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_collect_last!(self, before_execution, ctx)
    }
    /// Fires [`Interceptor::modify_before_serialization`] on every interceptor.
    pub fn fire_modify_before_serialization(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_short_circuit!(self, modify_before_serialization, ctx)
    }
    /// Fires [`Interceptor::before_serialization`] on every interceptor.
    pub fn fire_before_serialization(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_collect_last!(self, before_serialization, ctx)
    }
    /// Fires [`Interceptor::after_serialization`] on every interceptor.
    pub fn fire_after_serialization(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_collect_last!(self, after_serialization, ctx)
    }
    /// Fires [`Interceptor::modify_before_retry_loop`] on every interceptor.
    pub fn fire_modify_before_retry_loop(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_short_circuit!(self, modify_before_retry_loop, ctx)
    }
    /// Fires [`Interceptor::before_attempt`] on every interceptor.
    pub fn fire_before_attempt(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_collect_last!(self, before_attempt, ctx)
    }
    /// Fires [`Interceptor::modify_before_signing`] on every interceptor.
    pub fn fire_modify_before_signing(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_short_circuit!(self, modify_before_signing, ctx)
    }
    /// Fires [`Interceptor::before_signing`] on every interceptor.
    pub fn fire_before_signing(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_collect_last!(self, before_signing, ctx)
    }
    /// Fires [`Interceptor::after_signing`] on every interceptor.
    pub fn fire_after_signing(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_collect_last!(self, after_signing, ctx)
    }
    /// Fires [`Interceptor::modify_before_transmit`] on every interceptor.
    pub fn fire_modify_before_transmit(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_short_circuit!(self, modify_before_transmit, ctx)
    }
    /// Fires [`Interceptor::before_transmit`] on every interceptor.
    pub fn fire_before_transmit(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_collect_last!(self, before_transmit, ctx)
    }
    /// Fires [`Interceptor::after_transmit`] on every interceptor.
    pub fn fire_after_transmit(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_collect_last!(self, after_transmit, ctx)
    }
    /// Fires [`Interceptor::modify_before_deserialization`] on every interceptor.
    pub fn fire_modify_before_deserialization(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_short_circuit!(self, modify_before_deserialization, ctx)
    }
    /// Fires [`Interceptor::before_deserialization`] on every interceptor.
    pub fn fire_before_deserialization(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_collect_last!(self, before_deserialization, ctx)
    }
    /// Fires [`Interceptor::after_deserialization`] on every interceptor.
    pub fn fire_after_deserialization(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_collect_last!(self, after_deserialization, ctx)
    }
    /// Fires [`Interceptor::modify_before_attempt_completion`] on every interceptor.
    pub fn fire_modify_before_attempt_completion(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_short_circuit!(self, modify_before_attempt_completion, ctx)
    }
    /// Fires [`Interceptor::after_attempt`] on every interceptor.
    pub fn fire_after_attempt(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_collect_last!(self, after_attempt, ctx)
    }
    /// Fires [`Interceptor::modify_before_completion`] on every interceptor.
    pub fn fire_modify_before_completion(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_short_circuit!(self, modify_before_completion, ctx)
    }
    /// Fires [`Interceptor::after_execution`] on every interceptor.
    pub fn fire_after_execution(&self, ctx: &mut InterceptorContext<I, O>) -> Result<(), InterceptorError> {
        fire_collect_last!(self, after_execution, ctx)
    }
}

impl<I, O> Default for InterceptorPipeline<I, O> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct RecordingInterceptor {
        name: &'static str,
        order_log: Arc<Mutex<Vec<&'static str>>>,
        fail_on: Option<&'static str>,
    }

    impl Interceptor<u32, u32> for RecordingInterceptor {
        fn name(&self) -> &str {
            self.name
        }

        fn before_execution(&self, _ctx: &mut InterceptorContext<u32, u32>) -> crate::error::HookResult {
            self.order_log.lock().unwrap().push(self.name);
            if self.fail_on == Some("before_execution") {
                return Err("boom".into());
            }
            Ok(())
        }

        fn modify_before_serialization(&self, _ctx: &mut InterceptorContext<u32, u32>) -> crate::error::HookResult {
            self.order_log.lock().unwrap().push(self.name);
            if self.fail_on == Some("modify_before_serialization") {
                return Err("boom".into());
            }
            Ok(())
        }
    }

    #[test]
    fn fires_front_to_back_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline: InterceptorPipeline<u32, u32> = InterceptorPipeline::new();
        pipeline.register(Box::new(RecordingInterceptor { name: "first", order_log: Arc::clone(&log), fail_on: None }));
        pipeline.register(Box::new(RecordingInterceptor { name: "second", order_log: Arc::clone(&log), fail_on: None }));

        let mut ctx = InterceptorContext::new(1u32);
        pipeline.fire_before_execution(&mut ctx).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn before_hooks_run_all_and_rethrow_only_last_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline: InterceptorPipeline<u32, u32> = InterceptorPipeline::new();
        pipeline.register(Box::new(RecordingInterceptor {
            name: "first",
            order_log: Arc::clone(&log),
            fail_on: Some("before_execution"),
        }));
        pipeline.register(Box::new(RecordingInterceptor { name: "second", order_log: Arc::clone(&log), fail_on: None }));

        let mut ctx = InterceptorContext::new(1u32);
        let result = pipeline.fire_before_execution(&mut ctx);

        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
        let error = result.unwrap_err();
        assert_eq!(error.name, "first");
    }

    #[test]
    fn modify_hooks_short_circuit_on_first_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline: InterceptorPipeline<u32, u32> = InterceptorPipeline::new();
        pipeline.register(Box::new(RecordingInterceptor {
            name: "first",
            order_log: Arc::clone(&log),
            fail_on: Some("modify_before_serialization"),
        }));
        pipeline.register(Box::new(RecordingInterceptor { name: "second", order_log: Arc::clone(&log), fail_on: None }));

        let mut ctx = InterceptorContext::new(1u32);
        let result = pipeline.fire_modify_before_serialization(&mut ctx);

        assert_eq!(*log.lock().unwrap(), vec!["first"]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_interceptors_is_a_no_op() {
        let pipeline: InterceptorPipeline<u32, u32> = InterceptorPipeline::new();
        let mut ctx = InterceptorContext::new(1u32);
        assert!(pipeline.fire_before_execution(&mut ctx).is_ok());
        assert!(pipeline.is_empty());
    }

    #[test]
    fn counts_registered_interceptors() {
        let counter = Arc::new(AtomicUsize::new(0));
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline: InterceptorPipeline<u32, u32> = InterceptorPipeline::new();
        for _ in 0..3 {
            counter.fetch_add(1, Ordering::Relaxed);
            pipeline.register(Box::new(RecordingInterceptor { name: "hook", order_log: Arc::clone(&log), fail_on: None }));
        }
        assert_eq!(pipeline.len(), 3);
        assert_eq!(counter.load(Ordering::Relaxed), 3);
    }
}
