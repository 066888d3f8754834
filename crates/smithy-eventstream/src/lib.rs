// SPDX-License-Identifier: Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! AWS event-stream binary framing: a frame codec
//! ([`Frame`]/[`FrameDecoder`]) plus the shape layer ([`shape`]) that
//! maps frames onto the initial-message/event/exception/error concepts
//! a streaming operation deals in.

mod error;
mod frame;
pub mod header;
pub mod shape;

pub use error::{ChecksumKind, FramingError};
pub use frame::{Frame, FrameDecoder};
