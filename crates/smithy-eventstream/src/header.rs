// SPDX-License-Identifier: Apache-2.0
//! Typed header records: `(name_len u8)(name)(type u8)(value)`.

use smithy_types::DateTime;

use crate::error::FramingError;

const TYPE_TRUE: u8 = 0;
const TYPE_FALSE: u8 = 1;
const TYPE_I8: u8 = 2;
const TYPE_I16: u8 = 3;
const TYPE_I32: u8 = 4;
const TYPE_I64: u8 = 5;
const TYPE_BYTES: u8 = 6;
const TYPE_STRING: u8 = 7;
const TYPE_TIMESTAMP: u8 = 8;
const TYPE_UUID: u8 = 9;

/// One header value, tagged by its on-wire type.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    /// `true`.
    Bool(bool),
    /// 8-bit signed integer.
    Byte(i8),
    /// 16-bit signed integer.
    Short(i16),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// Length-prefixed (u16) opaque bytes.
    Bytes(Vec<u8>),
    /// Length-prefixed (u16) UTF-8 text.
    String(String),
    /// Milliseconds since the Unix epoch.
    Timestamp(DateTime),
    /// A 16-byte UUID.
    Uuid([u8; 16]),
}

impl HeaderValue {
    fn type_tag(&self) -> u8 {
        match self {
            HeaderValue::Bool(true) => TYPE_TRUE,
            HeaderValue::Bool(false) => TYPE_FALSE,
            HeaderValue::Byte(_) => TYPE_I8,
            HeaderValue::Short(_) => TYPE_I16,
            HeaderValue::Int(_) => TYPE_I32,
            HeaderValue::Long(_) => TYPE_I64,
            HeaderValue::Bytes(_) => TYPE_BYTES,
            HeaderValue::String(_) => TYPE_STRING,
            HeaderValue::Timestamp(_) => TYPE_TIMESTAMP,
            HeaderValue::Uuid(_) => TYPE_UUID,
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.push(self.type_tag());
        match self {
            HeaderValue::Bool(_) => {}
            HeaderValue::Byte(v) => out.push(*v as u8),
            HeaderValue::Short(v) => out.extend_from_slice(&v.to_be_bytes()),
            HeaderValue::Int(v) => out.extend_from_slice(&v.to_be_bytes()),
            HeaderValue::Long(v) => out.extend_from_slice(&v.to_be_bytes()),
            HeaderValue::Bytes(bytes) => {
                out.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
                out.extend_from_slice(bytes);
            }
            HeaderValue::String(s) => {
                out.extend_from_slice(&(s.len() as u16).to_be_bytes());
                out.extend_from_slice(s.as_bytes());
            }
            HeaderValue::Timestamp(t) => out.extend_from_slice(&t.epoch_millis().to_be_bytes()),
            HeaderValue::Uuid(bytes) => out.extend_from_slice(bytes),
        }
    }

    fn read(tag: u8, buf: &[u8], pos: &mut usize) -> Result<Self, FramingError> {
        let take = |pos: &mut usize, n: usize| -> Result<&[u8], FramingError> {
            let slice = buf
                .get(*pos..*pos + n)
                .ok_or(FramingError::HeaderSectionTruncated { field: "header value" })?;
            *pos += n;
            Ok(slice)
        };
        Ok(match tag {
            TYPE_TRUE => HeaderValue::Bool(true),
            TYPE_FALSE => HeaderValue::Bool(false),
            TYPE_I8 => HeaderValue::Byte(take(pos, 1)?[0] as i8),
            TYPE_I16 => HeaderValue::Short(i16::from_be_bytes(take(pos, 2)?.try_into().unwrap())),
            TYPE_I32 => HeaderValue::Int(i32::from_be_bytes(take(pos, 4)?.try_into().unwrap())),
            TYPE_I64 => HeaderValue::Long(i64::from_be_bytes(take(pos, 8)?.try_into().unwrap())),
            TYPE_BYTES => {
                let len = u16::from_be_bytes(take(pos, 2)?.try_into().unwrap()) as usize;
                HeaderValue::Bytes(take(pos, len)?.to_vec())
            }
            TYPE_STRING => {
                let len = u16::from_be_bytes(take(pos, 2)?.try_into().unwrap()) as usize;
                let bytes = take(pos, len)?;
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| FramingError::HeaderSectionTruncated { field: "string value" })?;
                HeaderValue::String(s.to_string())
            }
            TYPE_TIMESTAMP => {
                HeaderValue::Timestamp(DateTime::from_epoch_millis(i64::from_be_bytes(take(pos, 8)?.try_into().unwrap())))
            }
            TYPE_UUID => HeaderValue::Uuid(take(pos, 16)?.try_into().unwrap()),
            other => return Err(FramingError::UnknownHeaderType { tag: other }),
        })
    }

    /// Borrow the value as a string, when this header carries one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// One `(name, value)` header record.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    name: String,
    value: HeaderValue,
}

impl Header {
    /// Build a header, given an ASCII name (caller's responsibility; the
    /// encoder does not re-validate, matching an already-validated
    /// in-memory model).
    #[must_use]
    pub fn new(name: impl Into<String>, value: HeaderValue) -> Self {
        Self { name: name.into(), value }
    }

    /// Convenience constructor for a UTF-8 string-valued header.
    #[must_use]
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, HeaderValue::String(value.into()))
    }

    /// The header name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The header value.
    #[must_use]
    pub fn value(&self) -> &HeaderValue {
        &self.value
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) -> Result<(), FramingError> {
        if !self.name.is_ascii() {
            return Err(FramingError::HeaderNameNotAscii);
        }
        out.push(self.name.len() as u8);
        out.extend_from_slice(self.name.as_bytes());
        self.value.write(out);
        Ok(())
    }

    pub(crate) fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, FramingError> {
        let name_len = *buf
            .get(*pos)
            .ok_or(FramingError::HeaderSectionTruncated { field: "name length" })? as usize;
        *pos += 1;
        let name_bytes = buf
            .get(*pos..*pos + name_len)
            .ok_or(FramingError::HeaderSectionTruncated { field: "name" })?;
        *pos += name_len;
        let name = std::str::from_utf8(name_bytes).map_err(|_| FramingError::HeaderNameNotAscii)?;
        if !name.is_ascii() {
            return Err(FramingError::HeaderNameNotAscii);
        }
        let tag = *buf
            .get(*pos)
            .ok_or(FramingError::HeaderSectionTruncated { field: "type tag" })?;
        *pos += 1;
        let value = HeaderValue::read(tag, buf, pos)?;
        Ok(Header { name: name.to_string(), value })
    }
}

/// Encode a full header section as concatenated records.
pub(crate) fn encode_headers(headers: &[Header]) -> Result<Vec<u8>, FramingError> {
    let mut out = Vec::new();
    for header in headers {
        header.encode(&mut out)?;
    }
    Ok(out)
}

/// Decode a full header section, consuming exactly `bytes.len()` bytes.
pub(crate) fn decode_headers(bytes: &[u8]) -> Result<Vec<Header>, FramingError> {
    let mut headers = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        headers.push(Header::decode(bytes, &mut pos)?);
    }
    Ok(headers)
}
