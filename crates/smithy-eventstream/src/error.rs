// SPDX-License-Identifier: Apache-2.0
//! Framing failures ("Framing"). All are fatal for the
//! stream they occur on — none are retryable at this layer.

use thiserror::Error;

/// Which of the two checksums in a frame failed to verify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumKind {
    /// The 4-byte prelude CRC over `totalLen`/`hdrLen`.
    Prelude,
    /// The trailing CRC over the whole message.
    Message,
}

impl std::fmt::Display for ChecksumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ChecksumKind::Prelude => "prelude",
            ChecksumKind::Message => "message",
        })
    }
}

/// A binary frame failed to decode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// A checksum didn't match the bytes it covers.
    #[error("{kind} CRC mismatch")]
    ChecksumMismatch {
        /// Which checksum failed.
        kind: ChecksumKind,
    },
    /// `totalLen` is smaller than the fixed 16-byte overhead it must
    /// at least cover (12-byte prelude + 4-byte trailing CRC).
    #[error("totalLen {total_len} is smaller than the minimum frame overhead")]
    TotalLenTooSmall {
        /// The invalid `totalLen` value read from the prelude.
        total_len: u32,
    },
    /// `hdrLen` exceeds the space available between prelude and payload.
    #[error("hdrLen {hdr_len} exceeds totalLen {total_len}")]
    HeaderLenExceedsTotal {
        /// The invalid `hdrLen` value.
        hdr_len: u32,
        /// The frame's `totalLen`.
        total_len: u32,
    },
    /// A header record's type tag byte is not one of the known kinds.
    #[error("unknown header value type tag {tag:#04x}")]
    UnknownHeaderType {
        /// The unrecognized tag byte.
        tag: u8,
    },
    /// A header name or string/bytes value was declared longer than the
    /// remaining header section.
    #[error("header section truncated while reading `{field}`")]
    HeaderSectionTruncated {
        /// What was being read when bytes ran out.
        field: &'static str,
    },
    /// A header name was not valid ASCII ("Names are ASCII").
    #[error("header name is not ASCII")]
    HeaderNameNotAscii,
    /// This decoder already hit a fatal error and transitioned to the
    /// terminal `Error` state; it will never emit frames
    /// again and must be discarded.
    #[error("decoder is in its terminal error state and cannot be fed further")]
    Poisoned,
}
