// Licensed under the Apache License, Version 2.0.

//! Bracketed paste matcher (`spec.md` §4.4.1): `ESC[200~ … ESC[201~`.
//!
//! Grounded on the paste-marker recognition in `vt_100_terminal_input_parser::
//! terminal_events`, generalized to report [`super::MatchOutcome::Incomplete`] when the
//! closing marker hasn't arrived yet instead of assuming the whole paste is already
//! buffered.

use super::MatchOutcome;
use crate::keystroke::{Keystroke, ModeTag};
use crate::modifiers::ModifierNameTable;

const START: &[u8] = b"\x1b[200~";
const END: &[u8] = b"\x1b[201~";

pub fn try_match(buf: &[u8], _mod_table: &ModifierNameTable) -> MatchOutcome {
    if !buf.starts_with(START) {
        return MatchOutcome::NoMatch;
    }
    let body = &buf[START.len()..];
    match find_subslice(body, END) {
        Some(end_offset) => {
            let text = String::from_utf8_lossy(&body[..end_offset]).into_owned();
            let consumed = START.len() + end_offset + END.len();
            let keystroke = Keystroke::text("")
                .with_mode(ModeTag::BracketedPaste)
                .with_payload(super::EventPayload::BracketedPaste { text });
            MatchOutcome::Matched(keystroke, consumed)
        }
        None => MatchOutcome::Incomplete,
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
