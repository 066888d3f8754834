// SPDX-License-Identifier: Apache-2.0
//! The publisher side of the flow, and a channel-backed concrete
//! implementation: a `tokio::sync::mpsc` channel paired with an atomic
//! demand counter, in the idiom of a broadcast-based event bus.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::Notify;

use crate::error::FlowError;
use crate::subscriber::Subscriber;
use crate::subscription::{Demand, Subscription};

/// A source of items that only produces them as its subscriber requests
/// them.
pub trait Publisher<T>: Send {
    /// Attach the one subscriber this publisher will ever serve. Hands
    /// the subscriber a [`Subscription`] via
    /// [`Subscriber::on_subscribe`] before any item is delivered.
    fn subscribe(self: Box<Self>, subscriber: Arc<dyn Subscriber<T>>);
}

struct ChannelSubscription {
    demand: Arc<Demand>,
    notify: Arc<Notify>,
}

impl Subscription for ChannelSubscription {
    fn request(&self, n: u64) {
        if n == 0 {
            return;
        }
        self.demand.add(n);
        self.notify.notify_one();
    }

    fn cancel(&self) {
        self.demand.cancel();
        self.notify.notify_one();
    }
}

/// A [`Publisher`] backed by a `tokio::sync::mpsc` channel. The feeding
/// half (a [`mpsc::Sender`]) is owned by whatever produces items
/// upstream; this type only pumps them to the subscriber according to
/// its acknowledged demand.
pub struct ChannelPublisher<T> {
    receiver: mpsc::Receiver<Result<T, FlowError>>,
}

impl<T> ChannelPublisher<T> {
    /// Wrap a receiver half. Pair this with a [`mpsc::Sender`] kept by
    /// the caller to feed items (`Ok`) or a terminal failure (`Err`) in;
    /// dropping the sender signals normal completion.
    #[must_use]
    pub fn new(receiver: mpsc::Receiver<Result<T, FlowError>>) -> Self {
        Self { receiver }
    }
}

impl<T: Send + 'static> Publisher<T> for ChannelPublisher<T> {
    fn subscribe(self: Box<Self>, subscriber: Arc<dyn Subscriber<T>>) {
        let demand = Demand::new();
        let notify = Arc::new(Notify::new());
        let subscription = Arc::new(ChannelSubscription { demand: Arc::clone(&demand), notify: Arc::clone(&notify) });
        subscriber.on_subscribe(subscription);

        let mut receiver = self.receiver;
        tokio::spawn(async move {
            loop {
                if demand.is_cancelled() {
                    return;
                }
                if !demand.try_take() {
                    notify.notified().await;
                    continue;
                }
                match receiver.recv().await {
                    Some(Ok(item)) => subscriber.on_next(item),
                    Some(Err(error)) => {
                        subscriber.on_error(error);
                        return;
                    }
                    None => {
                        subscriber.on_complete();
                        return;
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSubscriber {
        items: Mutex<Vec<u32>>,
        completed: Mutex<bool>,
        errored: Mutex<Option<FlowError>>,
    }

    impl Subscriber<u32> for RecordingSubscriber {
        fn on_subscribe(&self, _subscription: Arc<dyn Subscription>) {}
        fn on_next(&self, item: u32) {
            self.items.lock().unwrap().push(item);
        }
        fn on_error(&self, error: FlowError) {
            *self.errored.lock().unwrap() = Some(error);
        }
        fn on_complete(&self) {
            *self.completed.lock().unwrap() = true;
        }
    }

    #[tokio::test]
    async fn zero_demand_never_calls_on_next() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(Ok(1)).await.unwrap();
        tx.send(Ok(2)).await.unwrap();

        let publisher = Box::new(ChannelPublisher::new(rx));
        let subscriber = Arc::new(RecordingSubscriber::default());
        publisher.subscribe(subscriber.clone());

        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        assert!(subscriber.items.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn items_are_delivered_in_order_once_requested() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(Ok(1)).await.unwrap();
        tx.send(Ok(2)).await.unwrap();
        tx.send(Ok(3)).await.unwrap();
        drop(tx);

        let publisher = Box::new(ChannelPublisher::new(rx));
        let subscriber = Arc::new(RecordingSubscriber::default());
        let captured_subscription: Arc<Mutex<Option<Arc<dyn Subscription>>>> = Arc::new(Mutex::new(None));

        struct Wrapper {
            inner: Arc<RecordingSubscriber>,
            slot: Arc<Mutex<Option<Arc<dyn Subscription>>>>,
        }
        impl Subscriber<u32> for Wrapper {
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

        let wrapper = Arc::new(Wrapper { inner: subscriber.clone(), slot: captured_subscription.clone() });
        publisher.subscribe(wrapper);
        tokio::task::yield_now().await;

        let subscription = captured_subscription.lock().unwrap().clone().unwrap();
        subscription.request(2);
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        assert_eq!(*subscriber.items.lock().unwrap(), vec![1, 2]);
        assert!(!*subscriber.completed.lock().unwrap());

        subscription.request(5);
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        assert_eq!(*subscriber.items.lock().unwrap(), vec![1, 2, 3]);
        assert!(*subscriber.completed.lock().unwrap());
    }
}
