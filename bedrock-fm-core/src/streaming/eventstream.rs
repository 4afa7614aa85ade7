//! AWS event-stream framing.
//!
//! `invoke-with-response-stream` answers with a sequence of binary messages:
//!
//! ```text
//! | total_len u32 | headers_len u32 | prelude_crc u32 | headers | payload | message_crc u32 |
//! ```
//!
//! All integers are big-endian. Each header is `name_len u8 | name | type u8 | value`.
//! `prelude_crc` covers the first 8 bytes and `message_crc` everything before it
//! (CRC-32, IEEE). A mismatch in either is a `StreamError`.

use crate::error::{FmError, Result};
use bytes::{Buf, Bytes, BytesMut};

const PRELUDE_LEN: usize = 12;
const CRC_LEN: usize = 4;
const MIN_MESSAGE_LEN: usize = PRELUDE_LEN + CRC_LEN;
const MAX_MESSAGE_LEN: usize = 16 * 1024 * 1024;

/// Typed header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Bool(bool),
    Byte(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Bytes(Bytes),
    String(String),
    /// Milliseconds since the epoch.
    Timestamp(i64),
    Uuid([u8; 16]),
}

impl HeaderValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// One decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStreamMessage {
    pub headers: Vec<(String, HeaderValue)>,
    pub payload: Bytes,
}

impl EventStreamMessage {
    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.header(name).and_then(HeaderValue::as_str)
    }

    /// `:message-type`, usually `event`, `exception` or `error`.
    pub fn message_type(&self) -> Option<&str> {
        self.header_str(":message-type")
    }

    pub fn event_type(&self) -> Option<&str> {
        self.header_str(":event-type")
    }

    pub fn exception_type(&self) -> Option<&str> {
        self.header_str(":exception-type")
    }
}

/// Incremental decoder: push raw bytes as they arrive, pop complete messages.
#[derive(Debug, Default)]
pub struct EventStreamDecoder {
    buffer: BytesMut,
}

impl EventStreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Bytes buffered but not yet forming a complete message.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Pop the next complete message, `Ok(None)` when more bytes are needed.
    pub fn next_message(&mut self) -> Result<Option<EventStreamMessage>> {
        if self.buffer.len() < PRELUDE_LEN {
            return Ok(None);
        }

        let total_len = read_u32(&self.buffer[0..4]) as usize;
        let headers_len = read_u32(&self.buffer[4..8]) as usize;

        if !(MIN_MESSAGE_LEN..=MAX_MESSAGE_LEN).contains(&total_len) {
            return Err(FmError::StreamError(format!(
                "invalid event-stream message length {total_len}"
            )));
        }
        if headers_len > total_len - MIN_MESSAGE_LEN {
            return Err(FmError::StreamError(format!(
                "event-stream headers length {headers_len} exceeds message length {total_len}"
            )));
        }
        let prelude_crc = read_u32(&self.buffer[8..PRELUDE_LEN]);
        check_crc("prelude", &self.buffer[..8], prelude_crc)?;
        if self.buffer.len() < total_len {
            return Ok(None);
        }

        let mut frame = self.buffer.split_to(total_len).freeze();
        let message_crc = read_u32(&frame[total_len - CRC_LEN..]);
        check_crc("message", &frame[..total_len - CRC_LEN], message_crc)?;
        frame.advance(PRELUDE_LEN);
        let headers_bytes = frame.split_to(headers_len);
        let payload = frame.split_to(total_len - MIN_MESSAGE_LEN - headers_len);

        Ok(Some(EventStreamMessage {
            headers: decode_headers(headers_bytes)?,
            payload,
        }))
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn check_crc(section: &str, data: &[u8], expected: u32) -> Result<()> {
    let actual = crc32fast::hash(data);
    if actual == expected {
        return Ok(());
    }
    Err(FmError::StreamError(format!(
        "event-stream {section} checksum mismatch: expected {expected:#010x}, got {actual:#010x}"
    )))
}

fn truncated(what: &str) -> FmError {
    FmError::StreamError(format!("truncated event-stream header {what}"))
}

fn take(buf: &mut Bytes, len: usize, what: &str) -> Result<Bytes> {
    if buf.remaining() < len {
        return Err(truncated(what));
    }
    Ok(buf.split_to(len))
}

fn decode_headers(mut buf: Bytes) -> Result<Vec<(String, HeaderValue)>> {
    let mut headers = Vec::new();
    while buf.has_remaining() {
        let name_len = buf.get_u8() as usize;
        let name = take(&mut buf, name_len, "name")?;
        let name = String::from_utf8(name.to_vec())
            .map_err(|_| FmError::StreamError("non UTF-8 event-stream header name".into()))?;

        if !buf.has_remaining() {
            return Err(truncated("type"));
        }
        let value = match buf.get_u8() {
            0 => HeaderValue::Bool(true),
            1 => HeaderValue::Bool(false),
            2 => HeaderValue::Byte(take(&mut buf, 1, "value")?.get_i8()),
            3 => HeaderValue::Int16(take(&mut buf, 2, "value")?.get_i16()),
            4 => HeaderValue::Int32(take(&mut buf, 4, "value")?.get_i32()),
            5 => HeaderValue::Int64(take(&mut buf, 8, "value")?.get_i64()),
            6 => {
                let len = take(&mut buf, 2, "length")?.get_u16() as usize;
                HeaderValue::Bytes(take(&mut buf, len, "value")?)
            }
            7 => {
                let len = take(&mut buf, 2, "length")?.get_u16() as usize;
                let raw = take(&mut buf, len, "value")?;
                HeaderValue::String(String::from_utf8(raw.to_vec()).map_err(|_| {
                    FmError::StreamError(format!("non UTF-8 value for header {name}"))
                })?)
            }
            8 => HeaderValue::Timestamp(take(&mut buf, 8, "value")?.get_i64()),
            9 => {
                let raw = take(&mut buf, 16, "value")?;
                let mut uuid = [0u8; 16];
                uuid.copy_from_slice(&raw);
                HeaderValue::Uuid(uuid)
            }
            other => {
                return Err(FmError::StreamError(format!(
                    "unknown event-stream header type {other} for {name}"
                )));
            }
        };
        headers.push((name, value));
    }
    Ok(headers)
}

/// Frame encoder used by tests to build fake streaming responses.
#[cfg(test)]
pub(crate) fn encode_message(headers: &[(&str, &str)], payload: &[u8]) -> Vec<u8> {
    use bytes::BufMut;

    let mut header_bytes = Vec::new();
    for (name, value) in headers {
        header_bytes.put_u8(name.len() as u8);
        header_bytes.put_slice(name.as_bytes());
        header_bytes.put_u8(7);
        header_bytes.put_u16(value.len() as u16);
        header_bytes.put_slice(value.as_bytes());
    }

    seal_message(&header_bytes, payload)
}

/// Wrap raw header bytes and a payload in a prelude and both checksums.
#[cfg(test)]
pub(crate) fn seal_message(header_bytes: &[u8], payload: &[u8]) -> Vec<u8> {
    use bytes::BufMut;

    let total = MIN_MESSAGE_LEN + header_bytes.len() + payload.len();
    let mut out = Vec::with_capacity(total);
    out.put_u32(total as u32);
    out.put_u32(header_bytes.len() as u32);
    let prelude_crc = crc32fast::hash(&out);
    out.put_u32(prelude_crc);
    out.put_slice(header_bytes);
    out.put_slice(payload);
    let message_crc = crc32fast::hash(&out);
    out.put_u32(message_crc);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_frame(payload: &str) -> Vec<u8> {
        encode_message(
            &[
                (":event-type", "chunk"),
                (":content-type", "application/json"),
                (":message-type", "event"),
            ],
            payload.as_bytes(),
        )
    }

    #[test]
    fn decodes_single_message() {
        let mut decoder = EventStreamDecoder::new();
        decoder.push(&chunk_frame(r#"{"bytes":"e30="}"#));
        let msg = decoder.next_message().unwrap().expect("message");
        assert_eq!(msg.message_type(), Some("event"));
        assert_eq!(msg.event_type(), Some("chunk"));
        assert_eq!(&msg.payload[..], br#"{"bytes":"e30="}"#);
        assert!(decoder.next_message().unwrap().is_none());
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn waits_for_split_frames() {
        let mut wire = chunk_frame(r#"{"bytes":"YQ=="}"#);
        wire.extend(chunk_frame(r#"{"bytes":"Yg=="}"#));

        let mut decoder = EventStreamDecoder::new();
        let mut messages = Vec::new();
        for piece in wire.chunks(7) {
            decoder.push(piece);
            while let Some(msg) = decoder.next_message().unwrap() {
                messages.push(msg);
            }
        }
        assert_eq!(messages.len(), 2);
        assert_eq!(&messages[1].payload[..], br#"{"bytes":"Yg=="}"#);
    }

    #[test]
    fn decodes_non_string_headers() {
        let mut headers = Vec::new();
        headers.extend([4u8]);
        headers.extend(b"flag");
        headers.push(0);
        headers.extend([3u8]);
        headers.extend(b"num");
        headers.push(4);
        headers.extend(42i32.to_be_bytes());

        let wire = seal_message(&headers, &[]);

        let mut decoder = EventStreamDecoder::new();
        decoder.push(&wire);
        let msg = decoder.next_message().unwrap().expect("message");
        assert_eq!(msg.header("flag"), Some(&HeaderValue::Bool(true)));
        assert_eq!(msg.header("num"), Some(&HeaderValue::Int32(42)));
        assert!(msg.payload.is_empty());
    }

    #[test]
    fn rejects_bogus_lengths() {
        let mut decoder = EventStreamDecoder::new();
        decoder.push(&[0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0]);
        match decoder.next_message().unwrap_err() {
            FmError::StreamError(msg) => assert!(msg.contains("length")),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn rejects_corrupted_prelude() {
        let mut wire = chunk_frame(r#"{"bytes":"e30="}"#);
        wire[8] ^= 0xff;
        let mut decoder = EventStreamDecoder::new();
        decoder.push(&wire[..PRELUDE_LEN]);
        match decoder.next_message().unwrap_err() {
            FmError::StreamError(msg) => assert!(msg.contains("prelude checksum"), "{msg}"),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn rejects_corrupted_payload() {
        let mut wire = chunk_frame(r#"{"bytes":"e30="}"#);
        let last_payload_byte = wire.len() - CRC_LEN - 1;
        wire[last_payload_byte] ^= 0x01;
        let mut decoder = EventStreamDecoder::new();
        decoder.push(&wire);
        match decoder.next_message().unwrap_err() {
            FmError::StreamError(msg) => assert!(msg.contains("message checksum"), "{msg}"),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    proptest::proptest! {
        #[test]
        fn any_split_yields_the_same_messages(
            payloads in proptest::collection::vec("[a-z]{0,24}", 1..5),
            piece in 1usize..40,
        ) {
            let wire: Vec<u8> = payloads.iter().flat_map(|p| chunk_frame(p)).collect();
            let mut decoder = EventStreamDecoder::new();
            let mut decoded = Vec::new();
            for part in wire.chunks(piece) {
                decoder.push(part);
                while let Some(msg) = decoder.next_message().unwrap() {
                    decoded.push(String::from_utf8(msg.payload.to_vec()).unwrap());
                }
            }
            proptest::prop_assert_eq!(decoded, payloads);
            proptest::prop_assert_eq!(decoder.pending(), 0);
        }
    }
}
