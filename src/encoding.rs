// Licensed under the Apache License, Version 2.0.

//! Incremental decoding of the terminal's input encoding (`spec.md` §6 "Encoding", §9
//! "Incremental Unicode decoding").
//!
//! Generalizes the whole-buffer UTF-8 byte-pattern matching in
//! `vt_100_terminal_input_parser::utf8` into a decoder that carries 0–3 pending bytes
//! across separate `read()` calls, so a codepoint split across a system-call boundary
//! doesn't prematurely turn into a replacement character.

use crate::error::DecodeError;

/// Which input encoding the terminal uses. UTF-8 is the modern default; 8-bit legacy
/// encodings must be selectable per `spec.md` §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEncoding {
    Utf8,
    /// Single-byte encoding where every byte maps directly to `byte as u32` (covers
    /// Latin-1 and is a reasonable default stand-in for other 8-bit legacy encodings).
    Latin1,
}

/// Incremental decoder: 0–3 pending UTF-8 continuation bytes, or nothing for Latin-1
/// (which never has partial state).
#[derive(Debug, Clone)]
pub struct IncrementalDecoder {
    encoding: InputEncoding,
    pending: Vec<u8>,
}

impl IncrementalDecoder {
    #[must_use]
    pub fn new(encoding: InputEncoding) -> Self { Self { encoding, pending: Vec::with_capacity(3) } }

    /// Feed `chunk` (freshly read bytes) to the decoder. Returns the characters decoded
    /// plus any [`DecodeError`]s encountered along the way — per `spec.md` §7, a
    /// `DecodingError` never aborts decoding: it emits `U+FFFD` and advances one byte.
    pub fn feed(&mut self, chunk: &[u8]) -> (String, Vec<DecodeError>) {
        match self.encoding {
            InputEncoding::Latin1 => {
                let text: String = chunk.iter().map(|&b| b as char).collect();
                (text, Vec::new())
            }
            InputEncoding::Utf8 => self.feed_utf8(chunk),
        }
    }

    fn feed_utf8(&mut self, chunk: &[u8]) -> (String, Vec<DecodeError>) {
        self.pending.extend_from_slice(chunk);
        let mut out = String::new();
        let mut errors = Vec::new();
        let mut offset = 0;
        loop {
            let remaining = &self.pending[offset..];
            if remaining.is_empty() {
                break;
            }
            match decode_one(remaining) {
                OneResult::Char(ch, len) => {
                    out.push(ch);
                    offset += len;
                }
                OneResult::NeedMore => break,
                OneResult::Invalid => {
                    errors.push(DecodeError::InvalidEncoding { offset });
                    out.push('\u{FFFD}');
                    offset += 1;
                }
            }
        }
        self.pending.drain(..offset);
        (out, errors)
    }
}

enum OneResult {
    Char(char, usize),
    NeedMore,
    Invalid,
}

/// Decode a single codepoint from the front of `buf`, per the UTF-8 byte-pattern
/// table (`spec.md` §4.4's sibling concern — this mirrors the teacher's byte-class
/// detection in `utf8.rs`, generalized to report "need more bytes" rather than assuming
/// the whole buffer is present).
fn decode_one(buf: &[u8]) -> OneResult {
    let first = buf[0];
    let expected_len = if first & 0x80 == 0x00 {
        1
    } else if first & 0xE0 == 0xC0 {
        2
    } else if first & 0xF0 == 0xE0 {
        3
    } else if first & 0xF8 == 0xF0 {
        4
    } else {
        return OneResult::Invalid;
    };

    if buf.len() < expected_len {
        return OneResult::NeedMore;
    }
    for &cont in &buf[1..expected_len] {
        if cont & 0xC0 != 0x80 {
            return OneResult::Invalid;
        }
    }
    match std::str::from_utf8(&buf[..expected_len]) {
        Ok(s) => match s.chars().next() {
            Some(ch) => OneResult::Char(ch, expected_len),
            None => OneResult::Invalid,
        },
        Err(_) => OneResult::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_decodes_immediately() {
        let mut dec = IncrementalDecoder::new(InputEncoding::Utf8);
        let (text, errs) = dec.feed(b"Hello");
        assert_eq!(text, "Hello");
        assert!(errs.is_empty());
    }

    #[test]
    fn split_multibyte_codepoint_waits_for_continuation() {
        let mut dec = IncrementalDecoder::new(InputEncoding::Utf8);
        let bytes = "é".as_bytes(); // 2-byte sequence
        let (text1, errs1) = dec.feed(&bytes[..1]);
        assert_eq!(text1, "");
        assert!(errs1.is_empty());
        let (text2, errs2) = dec.feed(&bytes[1..]);
        assert_eq!(text2, "é");
        assert!(errs2.is_empty());
    }

    #[test]
    fn invalid_byte_emits_replacement_and_advances_one() {
        let mut dec = IncrementalDecoder::new(InputEncoding::Utf8);
        let (text, errs) = dec.feed(&[0xFF, b'a']);
        assert_eq!(text, "\u{FFFD}a");
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn latin1_maps_bytes_directly() {
        let mut dec = IncrementalDecoder::new(InputEncoding::Latin1);
        let (text, errs) = dec.feed(&[0xE9]); // é in Latin-1
        assert_eq!(text.chars().next().unwrap() as u32, 0xE9);
        assert!(errs.is_empty());
    }
}
