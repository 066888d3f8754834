// SPDX-License-Identifier: Apache-2.0
//! The subscriber side of the flow ("Flow/streaming
//! primitives ... `on_next`/`on_error`/`on_complete`").

use std::sync::Arc;

use crate::error::FlowError;
use crate::subscription::Subscription;

/// Receives items from a [`crate::Publisher`], strictly according to the
/// demand it signals through the [`Subscription`] it is handed.
///
/// A well-behaved publisher calls these methods serially (never
/// concurrently) and stops after the first `on_error`/`on_complete`.
pub trait Subscriber<T>: Send + Sync {
    /// Called once, before any items, with the handle used to request
    /// items or cancel.
    fn on_subscribe(&self, subscription: Arc<dyn Subscription>);
    /// Deliver one item. Never called more times than requested.
    fn on_next(&self, item: T);
    /// Terminal: the flow failed. No further calls follow.
    fn on_error(&self, error: FlowError);
    /// Terminal: the flow finished normally. No further calls follow.
    fn on_complete(&self);
}
