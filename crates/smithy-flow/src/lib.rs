// SPDX-License-Identifier: Apache-2.0
//! Backpressured publisher/subscriber primitives: a small
//! reactive-streams-style contract (subscribe / request(n) / cancel /
//! on_next / on_error / on_complete) plus the channel-backed publisher
//! and flattening processor built on top of it, including the
//! event-stream frame decoding pipeline.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod event_stream;
mod error;
mod flat_map;
mod publisher;
mod subscriber;
mod subscription;

pub use error::FlowError;
pub use event_stream::decode_event_stream;
pub use flat_map::FlatMapProcessor;
pub use publisher::{ChannelPublisher, Publisher};
pub use subscriber::Subscriber;
pub use subscription::{Demand, Subscription};
