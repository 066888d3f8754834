// SPDX-License-Identifier: Apache-2.0
//! Errors surfaced across a publisher/subscriber chain.

use thiserror::Error;

/// A failure occurring anywhere in a flow: upstream production, the
/// mapping step of a processor, or a downstream subscriber rejecting an
/// item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The upstream publisher failed to produce an item.
    #[error("upstream failed: {0}")]
    Upstream(String),
    /// A processor's mapping function failed for one input item.
    #[error("mapping failed: {0}")]
    MapFailed(String),
    /// The subscription was cancelled while items were still pending.
    #[error("subscription cancelled")]
    Cancelled,
}
