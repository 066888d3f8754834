// SPDX-License-Identifier: Apache-2.0
//! The binary frame codec: prelude, header section, payload,
//! trailing CRC — independent of what shape the payload decodes to.

use crate::error::{ChecksumKind, FramingError};
use crate::header::{decode_headers, encode_headers, Header};

const PRELUDE_LEN: usize = 8;
const PRELUDE_CRC_LEN: usize = 4;
const MESSAGE_CRC_LEN: usize = 4;
/// Fixed overhead every frame carries regardless of header/payload size:
/// `totalLen` (4) + `hdrLen` (4) + prelude CRC (4) + message CRC (4).
const MIN_FRAME_LEN: u32 = (PRELUDE_LEN + PRELUDE_CRC_LEN + MESSAGE_CRC_LEN) as u32;

/// One complete event-stream message: headers plus an opaque payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    headers: Vec<Header>,
    payload: Vec<u8>,
}

impl Frame {
    /// Build a frame from its headers and payload bytes.
    #[must_use]
    pub fn new(headers: Vec<Header>, payload: Vec<u8>) -> Self {
        Self { headers, payload }
    }

    /// This frame's headers, in wire order.
    #[must_use]
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// The first header named `name`, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&Header> {
        self.headers.iter().find(|h| h.name() == name)
    }

    /// The opaque payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Encode this frame to its wire bytes (prelude, headers, payload,
    /// trailing CRC).
    pub fn encode(&self) -> Result<Vec<u8>, FramingError> {
        let header_bytes = encode_headers(&self.headers)?;
        let hdr_len = u32::try_from(header_bytes.len()).expect("header section fits in u32");
        let payload_len = u32::try_from(self.payload.len()).expect("payload fits in u32");
        let total_len = MIN_FRAME_LEN + hdr_len + payload_len;

        let mut out = Vec::with_capacity(total_len as usize);
        out.extend_from_slice(&total_len.to_be_bytes());
        out.extend_from_slice(&hdr_len.to_be_bytes());
        let prelude_crc = crc32fast::hash(&out);
        out.extend_from_slice(&prelude_crc.to_be_bytes());
        out.extend_from_slice(&header_bytes);
        out.extend_from_slice(&self.payload);
        let message_crc = crc32fast::hash(&out);
        out.extend_from_slice(&message_crc.to_be_bytes());
        Ok(out)
    }
}

/// Incremental decoder implementing the `AwaitPrelude` → `AwaitRest` →
/// (emit, back to `AwaitPrelude`) | `Error` state machine.
///
/// Not thread-safe; owned by a single consumer. Once any
/// checksum fails the decoder transitions to the terminal `Error` state
/// and every subsequent [`Self::feed`] call returns
/// [`FramingError::Poisoned`] without touching the buffer.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
    poisoned: bool,
}

impl FrameDecoder {
    /// An empty decoder, in the `AwaitPrelude` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk of bytes. Returns every frame that became
    /// complete as a result, in wire order. A defensive copy of `bytes`
    /// is taken into the internal buffer; no reference to `bytes` is
    /// retained past this call.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Vec<Frame>, FramingError> {
        if self.poisoned {
            return Err(FramingError::Poisoned);
        }
        self.buf.extend_from_slice(bytes);

        let mut frames = Vec::new();
        loop {
            if self.buf.len() < PRELUDE_LEN + PRELUDE_CRC_LEN {
                break;
            }
            let total_len = u32::from_be_bytes(self.buf[0..4].try_into().unwrap());
            let hdr_len = u32::from_be_bytes(self.buf[4..8].try_into().unwrap());
            let prelude_crc = u32::from_be_bytes(self.buf[8..12].try_into().unwrap());

            if crc32fast::hash(&self.buf[0..8]) != prelude_crc {
                self.poisoned = true;
                return Err(FramingError::ChecksumMismatch { kind: ChecksumKind::Prelude });
            }
            if total_len < MIN_FRAME_LEN {
                self.poisoned = true;
                return Err(FramingError::TotalLenTooSmall { total_len });
            }
            if hdr_len > total_len - MIN_FRAME_LEN {
                self.poisoned = true;
                return Err(FramingError::HeaderLenExceedsTotal { hdr_len, total_len });
            }

            // AwaitRest: wait for the rest of the message to arrive.
            if (self.buf.len() as u64) < u64::from(total_len) {
                break;
            }

            let message_crc_offset = total_len as usize - MESSAGE_CRC_LEN;
            let message_crc = u32::from_be_bytes(
                self.buf[message_crc_offset..message_crc_offset + MESSAGE_CRC_LEN]
                    .try_into()
                    .unwrap(),
            );
            if crc32fast::hash(&self.buf[0..message_crc_offset]) != message_crc {
                self.poisoned = true;
                return Err(FramingError::ChecksumMismatch { kind: ChecksumKind::Message });
            }

            let header_start = PRELUDE_LEN + PRELUDE_CRC_LEN;
            let header_end = header_start + hdr_len as usize;
            let headers = decode_headers(&self.buf[header_start..header_end])?;
            let payload = self.buf[header_end..message_crc_offset].to_vec();
            frames.push(Frame::new(headers, payload));

            self.buf.drain(0..total_len as usize);
        }
        Ok(frames)
    }
}
