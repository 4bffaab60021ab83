//! Buffered decoder for `text/event-stream` bodies
//!
//! Network chunks do not line up with events: one `data:` line can arrive in
//! two reads, and a multi-byte character can straddle a read boundary. The
//! decoder keeps both partial text and trailing partial UTF-8 bytes until the
//! blank line that ends an event shows up.

use serde_json::Value;
use tracing::warn;

const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Default)]
pub(crate) struct SseDecoder {
    text: String,
    pending_bytes: Vec<u8>,
}

impl SseDecoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk, returning the data payloads of every event it
    /// completes. Events without a `data:` field are skipped.
    pub(crate) fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut bytes = std::mem::take(&mut self.pending_bytes);
        bytes.extend_from_slice(chunk);

        let (decoded, rest) = split_utf8(&bytes);
        self.text.push_str(&decoded);
        self.pending_bytes = rest;

        let mut payloads = Vec::new();
        while let Some((end, delimiter_len)) = self.event_boundary() {
            let event: String = self.text.drain(..end + delimiter_len).collect();
            if let Some(data) = event_data(&event[..end]) {
                payloads.push(data);
            }
        }
        payloads
    }

    /// Whether anything is held back waiting for more input
    pub(crate) fn has_pending(&self) -> bool {
        !self.text.is_empty() || !self.pending_bytes.is_empty()
    }

    fn event_boundary(&self) -> Option<(usize, usize)> {
        let lf = self.text.find("\n\n").map(|pos| (pos, 2));
        let crlf = self.text.find("\r\n\r\n").map(|pos| (pos, 4));
        match (lf, crlf) {
            (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
            (a, b) => a.or(b),
        }
    }
}

/// Decode as much as possible. Invalid bytes become U+FFFD; a truncated
/// sequence at the end is returned for the next chunk.
fn split_utf8(bytes: &[u8]) -> (String, Vec<u8>) {
    let mut text = String::new();
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                return (text, Vec::new());
            }
            Err(e) => {
                let (valid, tail) = rest.split_at(e.valid_up_to());
                text.push_str(&String::from_utf8_lossy(valid));
                let Some(invalid_len) = e.error_len() else {
                    return (text, tail.to_vec());
                };
                warn!("replacing {} invalid byte(s) in event stream", invalid_len);
                text.push(char::REPLACEMENT_CHARACTER);
                rest = &tail[invalid_len..];
            }
        }
    }
}

/// Joined `data:` lines of one event, or `None` when it carries none
fn event_data(event: &str) -> Option<String> {
    let lines: Vec<&str> = event
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|value| value.strip_prefix(' ').unwrap_or(value))
        .collect();
    if lines.is_empty() {
        return None;
    }
    Some(lines.join("\n"))
}

/// JSON body of a completion chunk; `[DONE]` and non-JSON payloads yield `None`.
pub(crate) fn chunk_json(data: &str) -> Option<Value> {
    let data = data.trim();
    if data.is_empty() || data == DONE_MARKER {
        return None;
    }
    serde_json::from_str(data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT: &[u8] = b"data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\n";

    #[test]
    fn test_whole_events() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.feed(
            b"data: {\"n\":1}\n\ndata: {\"n\":2}\n\ndata: [DONE]\n\n",
        );
        assert_eq!(payloads, vec!["{\"n\":1}", "{\"n\":2}", "[DONE]"]);
        assert!(!decoder.has_pending());
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        let (first, second) = EVENT.split_at(20);

        assert!(decoder.feed(first).is_empty());
        assert!(decoder.has_pending());

        let payloads = decoder.feed(second);
        assert_eq!(payloads.len(), 1);
        let value = chunk_json(&payloads[0]).unwrap();
        assert_eq!(value["choices"][0]["delta"]["content"], "Hel");
        assert!(!decoder.has_pending());
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        // "é" is C3 A9
        assert!(decoder.feed(b"data: {\"content\":\"caf\xC3").is_empty());
        let payloads = decoder.feed(b"\xA9\"}\n\n");
        assert_eq!(payloads, vec!["{\"content\":\"café\"}"]);
    }

    #[test]
    fn test_four_byte_char_fed_byte_by_byte() {
        let mut decoder = SseDecoder::new();
        decoder.feed(b"data: \xF0");
        decoder.feed(b"\x9F");
        decoder.feed(b"\x98");
        let payloads = decoder.feed(b"\x80\n\n");
        assert_eq!(payloads, vec!["😀"]);
    }

    #[test]
    fn test_crlf_delimiters_and_multiline_data() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.feed(b"event: delta\r\ndata: a\r\ndata: b\r\n\r\n");
        assert_eq!(payloads, vec!["a\nb"]);
    }

    #[test]
    fn test_events_without_data_are_skipped() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b": keep-alive\n\nevent: ping\n\n").is_empty());
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.feed(b"data: a\xFFb\n\n");
        assert_eq!(payloads, vec!["a\u{FFFD}b"]);
    }

    #[test]
    fn test_chunk_json() {
        assert_eq!(chunk_json("{\"n\":1}").unwrap()["n"], 1);
        assert!(chunk_json("[DONE]").is_none());
        assert!(chunk_json("not-json").is_none());
        assert!(chunk_json("  ").is_none());
    }
}
