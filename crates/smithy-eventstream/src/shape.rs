// SPDX-License-Identifier: Apache-2.0
//! The shape layer sits above the frame codec: mapping between a
//! [`Frame`] and the modeled concepts (initial message, event, modeled
//! exception, generic streaming error) that a codec-driven caller deals
//! in.
//!
//! This module deliberately does not walk a [`smithy_schema::Schema`]
//! itself — splitting a union member's fields into `eventHeader`
//! members, an `eventPayload` member, and body members is a
//! per-operation concern that the code generated for one operation
//! would perform (there is no generator here). What this module gives
//! that generated code is the primitives it would call: the reserved
//! header names, the message-type tag, and the frame construction for
//! each of the four message kinds.

use smithy_types::{Document, Number};
use thiserror::Error;

use crate::error::FramingError;
use crate::header::{Header, HeaderValue};
use crate::Frame;

/// Reserved header name for the message kind.
pub const MESSAGE_TYPE: &str = ":message-type";
/// Reserved header name for the event/initial-message discriminator.
pub const EVENT_TYPE: &str = ":event-type";
/// Reserved header name for the payload's media type.
pub const CONTENT_TYPE: &str = ":content-type";
/// Reserved header name for a modeled exception's shape name.
pub const EXCEPTION_TYPE: &str = ":exception-type";
/// Reserved header name for a generic streaming error's code.
pub const ERROR_CODE: &str = ":error-code";
/// Reserved header name for a generic streaming error's message.
pub const ERROR_MESSAGE: &str = ":error-message";

/// The event-type value marking the first message on a request half.
pub const INITIAL_REQUEST: &str = "initial-request";
/// The event-type value marking the first message on a response half.
pub const INITIAL_RESPONSE: &str = "initial-response";

/// The `:message-type` header's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// A normal event frame, `:event-type` names the union member (or
    /// one of the initial-message constants).
    Event,
    /// A modeled exception; `:exception-type` names the error shape.
    Exception,
    /// An untyped streaming error; `:error-code`/`:error-message` carry
    /// the details.
    Error,
}

impl MessageType {
    fn as_str(self) -> &'static str {
        match self {
            MessageType::Event => "event",
            MessageType::Exception => "exception",
            MessageType::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "event" => Some(MessageType::Event),
            "exception" => Some(MessageType::Exception),
            "error" => Some(MessageType::Error),
            _ => None,
        }
    }
}

/// A frame resolved to one of the four message kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedMessage {
    /// The first message of a request/response half.
    Initial {
        /// `true` for `initial-request`, `false` for `initial-response`.
        is_request: bool,
        /// The codec-encoded initial shape payload.
        payload: Vec<u8>,
    },
    /// A normal streaming-union event.
    Event {
        /// The union member name (from `:event-type`).
        member_name: String,
        /// The codec-encoded event payload.
        payload: Vec<u8>,
    },
    /// A modeled error delivered mid-stream.
    Exception {
        /// The error shape name (from `:exception-type`).
        shape_name: String,
        /// The codec-encoded error payload.
        payload: Vec<u8>,
    },
    /// An untyped streaming error.
    GenericError {
        /// `:error-code`.
        code: String,
        /// `:error-message`.
        message: String,
    },
}

/// The shape layer failed to interpret a (structurally valid) frame.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeLayerError {
    /// The frame's binary framing is invalid.
    #[error(transparent)]
    Framing(#[from] FramingError),
    /// `:message-type` is missing or not one of `event`/`exception`/`error`.
    #[error("missing or invalid `:message-type` header")]
    InvalidMessageType,
    /// A header required for the message's kind is missing.
    #[error("missing required header `{0}`")]
    MissingHeader(&'static str),
}

fn required_string_header<'a>(frame: &'a Frame, name: &'static str) -> Result<&'a str, ShapeLayerError> {
    frame
        .header(name)
        .and_then(|h| h.value().as_str())
        .ok_or(ShapeLayerError::MissingHeader(name))
}

/// Resolve a decoded [`Frame`] into its [`DecodedMessage`]. Does not
/// touch the payload bytes; the caller feeds them to the appropriate
/// codec deserializer once it knows which shape they decode into.
pub fn decode_message(frame: &Frame) -> Result<DecodedMessage, ShapeLayerError> {
    let message_type_str = required_string_header(frame, MESSAGE_TYPE)?;
    let message_type = MessageType::parse(message_type_str).ok_or(ShapeLayerError::InvalidMessageType)?;

    match message_type {
        MessageType::Exception => {
            let shape_name = required_string_header(frame, EXCEPTION_TYPE)?.to_string();
            Ok(DecodedMessage::Exception { shape_name, payload: frame.payload().to_vec() })
        }
        MessageType::Error => {
            let code = required_string_header(frame, ERROR_CODE)?.to_string();
            let message = required_string_header(frame, ERROR_MESSAGE)?.to_string();
            Ok(DecodedMessage::GenericError { code, message })
        }
        MessageType::Event => {
            let event_type = required_string_header(frame, EVENT_TYPE)?;
            match event_type {
                INITIAL_REQUEST => Ok(DecodedMessage::Initial { is_request: true, payload: frame.payload().to_vec() }),
                INITIAL_RESPONSE => Ok(DecodedMessage::Initial { is_request: false, payload: frame.payload().to_vec() }),
                member_name => Ok(DecodedMessage::Event {
                    member_name: member_name.to_string(),
                    payload: frame.payload().to_vec(),
                }),
            }
        }
    }
}

/// Encode an initial message: initial messages serialize the whole
/// initial-shape *excluding* the streaming member.
#[must_use]
pub fn encode_initial(is_request: bool, content_type: &str, payload: Vec<u8>) -> Frame {
    Frame::new(
        vec![
            Header::string(MESSAGE_TYPE, MessageType::Event.as_str()),
            Header::string(EVENT_TYPE, if is_request { INITIAL_REQUEST } else { INITIAL_RESPONSE }),
            Header::string(CONTENT_TYPE, content_type),
        ],
        payload,
    )
}

/// Encode a normal streaming-union event. `extra_headers` carries the
/// member's `eventHeader`-trait fields, already converted to
/// [`HeaderValue`] by the caller ("split the member's fields
/// into (a) headers ... (b) an explicit payload member ... (c) the
/// rest").
#[must_use]
pub fn encode_event(member_name: &str, content_type: &str, extra_headers: Vec<Header>, payload: Vec<u8>) -> Frame {
    let mut headers = vec![
        Header::string(MESSAGE_TYPE, MessageType::Event.as_str()),
        Header::string(EVENT_TYPE, member_name),
        Header::string(CONTENT_TYPE, content_type),
    ];
    headers.extend(extra_headers);
    Frame::new(headers, payload)
}

/// Encode a modeled error ("modeled errors become
/// `:message-type=exception` with codec-encoded payload").
#[must_use]
pub fn encode_exception(shape_name: &str, content_type: &str, payload: Vec<u8>) -> Frame {
    Frame::new(
        vec![
            Header::string(MESSAGE_TYPE, MessageType::Exception.as_str()),
            Header::string(EXCEPTION_TYPE, shape_name),
            Header::string(CONTENT_TYPE, content_type),
        ],
        payload,
    )
}

/// Encode an untyped streaming error ("`:message-type=error`
/// with `:error-code`/`:error-message` ... empty payload").
#[must_use]
pub fn encode_generic_error(code: &str, message: &str) -> Frame {
    Frame::new(
        vec![
            Header::string(MESSAGE_TYPE, MessageType::Error.as_str()),
            Header::string(ERROR_CODE, code),
            Header::string(ERROR_MESSAGE, message),
        ],
        Vec::new(),
    )
}

/// Convert a scalar [`Document`] value into the [`HeaderValue`] an
/// `eventHeader`-trait member would carry on the wire. Returns `None`
/// for document kinds that have no header encoding — headers are
/// scalar-typed, so list/map/structure values never qualify.
#[must_use]
pub fn document_to_header_value(doc: &Document) -> Option<HeaderValue> {
    match doc {
        Document::Boolean(b) => Some(HeaderValue::Bool(*b)),
        Document::Number(Number::Byte(v)) => Some(HeaderValue::Byte(*v)),
        Document::Number(Number::Short(v)) => Some(HeaderValue::Short(*v)),
        Document::Number(Number::Integer(v)) => Some(HeaderValue::Int(*v)),
        Document::Number(Number::Long(v)) => Some(HeaderValue::Long(*v)),
        Document::String(s) => Some(HeaderValue::String(s.clone())),
        Document::Blob(b) => Some(HeaderValue::Bytes(b.as_bytes().to_vec())),
        Document::Timestamp(t) => Some(HeaderValue::Timestamp(*t)),
        _ => None,
    }
}

/// The inverse of [`document_to_header_value`], for reading an
/// `eventHeader` member back into the in-memory [`Document`] model.
#[must_use]
pub fn header_value_to_document(value: &HeaderValue) -> Document {
    match value {
        HeaderValue::Bool(b) => Document::Boolean(*b),
        HeaderValue::Byte(v) => Document::Number(Number::Byte(*v)),
        HeaderValue::Short(v) => Document::Number(Number::Short(*v)),
        HeaderValue::Int(v) => Document::Number(Number::Integer(*v)),
        HeaderValue::Long(v) => Document::Number(Number::Long(*v)),
        HeaderValue::Bytes(b) => Document::Blob(b.clone().into()),
        HeaderValue::String(s) => Document::String(s.clone()),
        HeaderValue::Timestamp(t) => Document::Timestamp(*t),
        HeaderValue::Uuid(bytes) => Document::Blob(bytes.to_vec().into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_response_round_trips() {
        let frame = encode_initial(false, "application/json", vec![1, 2, 3]);
        let decoded = decode_message(&frame).unwrap();
        assert_eq!(decoded, DecodedMessage::Initial { is_request: false, payload: vec![1, 2, 3] });
    }

    #[test]
    fn event_round_trips_with_member_name() {
        let frame = encode_event("Foo", "application/cbor", vec![], vec![0xA1, 0x61, 0x61, 0x01]);
        let decoded = decode_message(&frame).unwrap();
        assert_eq!(
            decoded,
            DecodedMessage::Event { member_name: "Foo".to_string(), payload: vec![0xA1, 0x61, 0x61, 0x01] }
        );
    }

    #[test]
    fn modeled_exception_round_trips() {
        let frame = encode_exception("ThrottlingException", "application/cbor", br#"{"message":"slow down"}"#.to_vec());
        let decoded = decode_message(&frame).unwrap();
        assert_eq!(
            decoded,
            DecodedMessage::Exception {
                shape_name: "ThrottlingException".to_string(),
                payload: br#"{"message":"slow down"}"#.to_vec(),
            }
        );
    }

    #[test]
    fn generic_error_round_trips() {
        let frame = encode_generic_error("InternalError", "boom");
        let decoded = decode_message(&frame).unwrap();
        assert_eq!(decoded, DecodedMessage::GenericError { code: "InternalError".to_string(), message: "boom".to_string() });
    }

    #[test]
    fn missing_message_type_is_rejected() {
        let frame = Frame::new(vec![], vec![]);
        assert_eq!(decode_message(&frame), Err(ShapeLayerError::InvalidMessageType));
    }
}
