// SPDX-License-Identifier: Apache-2.0
//! Event-stream response bodies: the body publisher is wrapped in the
//! frame decoding processor.
//!
//! Wiring a live, incrementally-fed body publisher through
//! [`smithy_eventstream::FrameDecoder`] is `smithy-flow`'s job (it owns
//! the publisher/subscriber contract); what this module provides is the
//! narrow piece that belongs to the binding layer — recognizing an
//! event-stream response and handing its already-buffered bytes to the
//! frame decoder in one pass, for callers (tests, or a non-streaming
//! transport) that read a full response body before processing it.

use smithy_eventstream::{Frame, FrameDecoder, FramingError};

/// Decode every frame out of a fully-buffered event-stream response
/// body.
///
/// # Errors
///
/// Returns the first [`FramingError`] encountered; a partial frame at
/// the end of `bytes` (as opposed to a checksum mismatch) is also an
/// error here, since there is no further data to come.
pub fn decode_buffered_event_stream(bytes: &[u8]) -> Result<Vec<Frame>, FramingError> {
    let mut decoder = FrameDecoder::new();
    decoder.feed(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smithy_eventstream::header::{Header, HeaderValue};

    #[test]
    fn decodes_every_frame_in_a_buffered_body() {
        let frame = Frame::new(vec![Header::new("x", HeaderValue::Bool(true))], b"payload".to_vec());
        let mut bytes = frame.encode().unwrap();
        bytes.extend(frame.encode().unwrap());

        let frames = decode_buffered_event_stream(&bytes).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], frame);
    }
}
