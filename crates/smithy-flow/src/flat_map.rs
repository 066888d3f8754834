// SPDX-License-Identifier: Apache-2.0
//! A processor that maps each upstream item to zero or more downstream
//! items while preserving order and backpressure: emission preserves
//! input order, and the processor only requests the next upstream item
//! after its subscriber acknowledges demand. A single-item internal
//! buffer is enough because one input yields zero or more outputs but
//! the processor flattens them with explicit pacing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::FlowError;
use crate::publisher::Publisher;
use crate::subscriber::Subscriber;
use crate::subscription::{Demand, Subscription};

type MapFn<T, U> = dyn Fn(T) -> Result<Vec<U>, FlowError> + Send + Sync;
type TerminalHook = dyn Fn(Option<&FlowError>) + Send + Sync;

struct Shared<T, U> {
    downstream: Arc<dyn Subscriber<U>>,
    downstream_demand: Arc<Demand>,
    buffer: Mutex<VecDeque<U>>,
    upstream_subscription: Mutex<Option<Arc<dyn Subscription>>>,
    pending_upstream_request: AtomicBool,
    finished: AtomicBool,
    map_fn: Arc<MapFn<T, U>>,
    terminal_hook: Option<Arc<TerminalHook>>,
}

impl<T, U> Shared<T, U> {
    /// Deliver buffered items the downstream has demand for, then pull
    /// exactly one more upstream item if the buffer is empty and demand
    /// remains — never more than one outstanding upstream request at a
    /// time.
    fn drain_and_pull(&self) {
        loop {
            let next = {
                let mut buffer = self.buffer.lock().unwrap();
                if buffer.is_empty() {
                    None
                } else if self.downstream_demand.try_take() {
                    buffer.pop_front()
                } else {
                    return;
                }
            };
            match next {
                Some(item) => self.downstream.on_next(item),
                None => break,
            }
        }

        if self.finished.load(Ordering::Acquire) || self.downstream_demand.outstanding() <= 0 {
            return;
        }
        if self.pending_upstream_request.swap(true, Ordering::AcqRel) {
            return;
        }
        let subscription = self.upstream_subscription.lock().unwrap().clone();
        match subscription {
            Some(subscription) => subscription.request(1),
            None => self.pending_upstream_request.store(false, Ordering::Release),
        }
    }

    fn finish_with_error(&self, error: FlowError) {
        if self.finished.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(hook) = &self.terminal_hook {
            hook(Some(&error));
        }
        self.downstream.on_error(error);
    }

    fn finish_with_complete(&self) {
        if self.finished.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(hook) = &self.terminal_hook {
            hook(None);
        }
        self.downstream.on_complete();
    }
}

struct UpstreamAdapter<T, U> {
    shared: Arc<Shared<T, U>>,
}

impl<T, U> Subscriber<T> for UpstreamAdapter<T, U> {
    fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
        *self.shared.upstream_subscription.lock().unwrap() = Some(subscription);
        self.shared.drain_and_pull();
    }

    fn on_next(&self, item: T) {
        self.shared.pending_upstream_request.store(false, Ordering::Release);
        match (self.shared.map_fn)(item) {
            Ok(items) => {
                self.shared.buffer.lock().unwrap().extend(items);
                self.shared.drain_and_pull();
            }
            Err(error) => self.shared.finish_with_error(error),
        }
    }

    fn on_error(&self, error: FlowError) {
        self.shared.finish_with_error(error);
    }

    fn on_complete(&self) {
        if !self.shared.buffer.lock().unwrap().is_empty() {
            // Flush whatever already made it into the buffer before
            // declaring completion; the downstream may not have enough
            // demand yet, in which case completion waits until it does.
            self.shared.drain_and_pull();
        }
        if self.shared.buffer.lock().unwrap().is_empty() {
            self.shared.finish_with_complete();
        }
    }
}

struct FlatMapSubscription<T, U> {
    shared: Arc<Shared<T, U>>,
}

impl<T, U> Subscription for FlatMapSubscription<T, U> {
    fn request(&self, n: u64) {
        if n == 0 {
            return;
        }
        self.shared.downstream_demand.add(n);
        self.shared.drain_and_pull();
    }

    fn cancel(&self) {
        self.shared.downstream_demand.cancel();
        self.shared.finished.store(true, Ordering::Release);
        if let Some(subscription) = self.shared.upstream_subscription.lock().unwrap().take() {
            subscription.cancel();
        }
    }
}

/// Flattens one upstream item into zero or more downstream items,
/// pulling from upstream one item at a time and only as its own
/// subscriber's demand allows.
pub struct FlatMapProcessor<T, U> {
    upstream: Box<dyn Publisher<T>>,
    map_fn: Arc<MapFn<T, U>>,
    terminal_hook: Option<Arc<TerminalHook>>,
}

impl<T, U> FlatMapProcessor<T, U> {
    /// Build a processor over `upstream`, applying `map_fn` to every
    /// item it produces.
    pub fn new(upstream: Box<dyn Publisher<T>>, map_fn: impl Fn(T) -> Result<Vec<U>, FlowError> + Send + Sync + 'static) -> Self {
        Self { upstream, map_fn: Arc::new(map_fn), terminal_hook: None }
    }

    /// Attach a hook invoked exactly once, before the terminal signal
    /// reaches the downstream subscriber, on both the error and the
    /// normal-completion path — any cleanup a processor needs to run
    /// before propagating termination goes here.
    #[must_use]
    pub fn with_terminal_hook(mut self, hook: impl Fn(Option<&FlowError>) + Send + Sync + 'static) -> Self {
        self.terminal_hook = Some(Arc::new(hook));
        self
    }
}

impl<T: Send + 'static, U: Send + 'static> Publisher<U> for FlatMapProcessor<T, U> {
    fn subscribe(self: Box<Self>, subscriber: Arc<dyn Subscriber<U>>) {
        let Self { upstream, map_fn, terminal_hook } = *self;
        let shared = Arc::new(Shared {
            downstream: subscriber.clone(),
            downstream_demand: Demand::new(),
            buffer: Mutex::new(VecDeque::new()),
            upstream_subscription: Mutex::new(None),
            pending_upstream_request: AtomicBool::new(false),
            finished: AtomicBool::new(false),
            map_fn,
            terminal_hook,
        });

        subscriber.on_subscribe(Arc::new(FlatMapSubscription { shared: Arc::clone(&shared) }));
        upstream.subscribe(Arc::new(UpstreamAdapter { shared }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualUpstream<T> {
        slot: Arc<Mutex<Option<Arc<dyn Subscriber<T>>>>>,
        request_count: Arc<std::sync::atomic::AtomicUsize>,
    }

    struct ManualSubscription {
        request_count: Arc<std::sync::atomic::AtomicUsize>,
    }

    impl Subscription for ManualSubscription {
        fn request(&self, n: u64) {
            self.request_count.fetch_add(n as usize, Ordering::Relaxed);
        }
        fn cancel(&self) {}
    }

    impl<T: Send + 'static> Publisher<T> for ManualUpstream<T> {
        fn subscribe(self: Box<Self>, subscriber: Arc<dyn Subscriber<T>>) {
            subscriber.on_subscribe(Arc::new(ManualSubscription { request_count: Arc::clone(&self.request_count) }));
            *self.slot.lock().unwrap() = Some(subscriber);
        }
    }

    #[derive(Default)]
    struct RecordingSubscriber {
        items: Mutex<Vec<u32>>,
        errors: Mutex<Vec<FlowError>>,
        completed: Mutex<bool>,
    }

    impl Subscriber<u32> for RecordingSubscriber {
        fn on_subscribe(&self, _subscription: Arc<dyn Subscription>) {}
        fn on_next(&self, item: u32) {
            self.items.lock().unwrap().push(item);
        }
        fn on_error(&self, error: FlowError) {
            self.errors.lock().unwrap().push(error);
        }
        fn on_complete(&self) {
            *self.completed.lock().unwrap() = true;
        }
    }

    struct CapturingSubscriber {
        inner: Arc<RecordingSubscriber>,
        slot: Arc<Mutex<Option<Arc<dyn Subscription>>>>,
    }

    impl Subscriber<u32> for CapturingSubscriber {
        fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
            *self.slot.lock().unwrap() = Some(subscription);
        }
        fn on_next(&self, item: u32) {
            self.inner.on_next(item);
        }
        fn on_error(&self, error: FlowError) {
            self.inner.on_error(error);
        }
        fn on_complete(&self) {
            self.inner.on_complete();
        }
    }

    fn build() -> (Arc<Mutex<Option<Arc<dyn Subscriber<u32>>>>>, Arc<RecordingSubscriber>, Arc<Mutex<Option<Arc<dyn Subscription>>>>) {
        let slot = Arc::new(Mutex::new(None));
        let upstream = ManualUpstream { slot: Arc::clone(&slot), request_count: Arc::new(std::sync::atomic::AtomicUsize::new(0)) };
        let processor = FlatMapProcessor::new(Box::new(upstream), |item: u32| Ok(vec![item, item * 10]));

        let recording = Arc::new(RecordingSubscriber::default());
        let downstream_slot = Arc::new(Mutex::new(None));
        let capturing = Arc::new(CapturingSubscriber { inner: Arc::clone(&recording), slot: Arc::clone(&downstream_slot) });
        Box::new(processor).subscribe(capturing);
        (slot, recording, downstream_slot)
    }

    #[test]
    fn zero_demand_never_calls_on_next() {
        let (upstream_slot, recording, _downstream_slot) = build();
        let upstream_subscriber = upstream_slot.lock().unwrap().clone().unwrap();
        upstream_subscriber.on_next(1);
        assert!(recording.items.lock().unwrap().is_empty());
    }

    #[test]
    fn one_input_item_flattens_to_two_in_order() {
        let (upstream_slot, recording, downstream_slot) = build();
        let downstream_subscription = downstream_slot.lock().unwrap().clone().unwrap();
        downstream_subscription.request(2);

        let upstream_subscriber = upstream_slot.lock().unwrap().clone().unwrap();
        upstream_subscriber.on_next(3);

        assert_eq!(*recording.items.lock().unwrap(), vec![3, 30]);
    }

    #[test]
    fn map_failure_reaches_on_error_exactly_once() {
        let slot: Arc<Mutex<Option<Arc<dyn Subscriber<u32>>>>> = Arc::new(Mutex::new(None));
        let upstream = ManualUpstream { slot: Arc::clone(&slot), request_count: Arc::new(std::sync::atomic::AtomicUsize::new(0)) };
        let processor = FlatMapProcessor::new(Box::new(upstream), |_item: u32| Err(FlowError::MapFailed("bad item".into())));

        let recording = Arc::new(RecordingSubscriber::default());
        let downstream_slot = Arc::new(Mutex::new(None));
        let capturing = Arc::new(CapturingSubscriber { inner: Arc::clone(&recording), slot: Arc::clone(&downstream_slot) });
        Box::new(processor).subscribe(capturing);
        downstream_slot.lock().unwrap().clone().unwrap().request(10);

        let upstream_subscriber = slot.lock().unwrap().clone().unwrap();
        upstream_subscriber.on_next(1);
        upstream_subscriber.on_next(2);

        assert_eq!(recording.errors.lock().unwrap().len(), 1);
        assert!(!*recording.completed.lock().unwrap());
    }

    #[test]
    fn terminal_hook_runs_before_on_error() {
        let log = Arc::new(Mutex::new(Vec::<&'static str>::new()));
        let hook_log = Arc::clone(&log);

        let slot: Arc<Mutex<Option<Arc<dyn Subscriber<u32>>>>> = Arc::new(Mutex::new(None));
        let upstream = ManualUpstream { slot: Arc::clone(&slot), request_count: Arc::new(std::sync::atomic::AtomicUsize::new(0)) };
        let processor = FlatMapProcessor::new(Box::new(upstream), |item: u32| Ok(vec![item]))
            .with_terminal_hook(move |_err| hook_log.lock().unwrap().push("hook"));

        struct OrderRecordingSubscriber {
            log: Arc<Mutex<Vec<&'static str>>>,
        }
        impl Subscriber<u32> for OrderRecordingSubscriber {
            fn on_subscribe(&self, _subscription: Arc<dyn Subscription>) {}
            fn on_next(&self, _item: u32) {}
            fn on_error(&self, _error: FlowError) {
                self.log.lock().unwrap().push("error");
            }
            fn on_complete(&self) {}
        }

        Box::new(processor).subscribe(Arc::new(OrderRecordingSubscriber { log: Arc::clone(&log) }));
        let upstream_subscriber = slot.lock().unwrap().clone().unwrap();
        upstream_subscriber.on_error(FlowError::Upstream("boom".into()));

        assert_eq!(*log.lock().unwrap(), vec!["hook", "error"]);
    }
}
