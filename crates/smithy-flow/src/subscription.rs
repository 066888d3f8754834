// SPDX-License-Identifier: Apache-2.0
//! Demand tracking: a processor only requests the next upstream item
//! after its subscriber acknowledges demand.
//!
//! Mirrors the atomic-counter idiom used elsewhere in this workspace
//! for shared statistics (an `Arc<AtomicU64>` pair guarding a broadcast
//! channel), generalized here into a signed saturating demand counter
//! plus a cancellation flag.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

/// A publisher's side of the demand protocol: the downstream subscriber
/// calls [`Subscription::request`] to signal it can accept `n` more
/// items, or [`Subscription::cancel`] to stop receiving them.
pub trait Subscription: Send + Sync {
    /// Signal that the subscriber is ready to accept `n` additional
    /// items. Implementations must never call `on_next` more times than
    /// the outstanding requested total.
    fn request(&self, n: u64);
    /// Stop the flow. No further `on_next`/`on_error`/`on_complete`
    /// calls are guaranteed after this returns.
    fn cancel(&self);
}

/// Shared demand state: an outstanding item count plus a cancellation
/// flag, safe to hand out as an `Arc` to both the pump side (which
/// drains it) and the `Subscription` handle (which tops it up).
#[derive(Debug, Default)]
pub struct Demand {
    outstanding: AtomicI64,
    cancelled: AtomicBool,
}

impl Demand {
    /// A fresh demand counter with nothing outstanding.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Add `n` to the outstanding count, saturating rather than
    /// overflowing.
    pub fn add(&self, n: u64) {
        let n = i64::try_from(n).unwrap_or(i64::MAX);
        let mut current = self.outstanding.load(Ordering::Acquire);
        loop {
            let next = current.saturating_add(n);
            match self.outstanding.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }

    /// Take one unit of demand if any is outstanding. Returns `true` if
    /// an item may now be emitted.
    pub fn try_take(&self) -> bool {
        let mut current = self.outstanding.load(Ordering::Acquire);
        loop {
            if current <= 0 {
                return false;
            }
            match self.outstanding.compare_exchange_weak(
                current,
                current - 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
    }

    /// `true` once [`Self::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Mark this demand as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Current outstanding demand, for tests and diagnostics.
    #[must_use]
    pub fn outstanding(&self) -> i64 {
        self.outstanding.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_take_consumes_exactly_one_unit() {
        let demand = Demand::new();
        assert!(!demand.try_take());
        demand.add(2);
        assert!(demand.try_take());
        assert_eq!(demand.outstanding(), 1);
        assert!(demand.try_take());
        assert_eq!(demand.outstanding(), 0);
        assert!(!demand.try_take());
    }

    #[test]
    fn cancel_is_observable() {
        let demand = Demand::new();
        assert!(!demand.is_cancelled());
        demand.cancel();
        assert!(demand.is_cancelled());
    }
}
