// Licensed under the Apache License, Version 2.0.

//! Synchronized-output report matcher (`spec.md` §4.4.4): `ESC[?2026h` / `ESC[?2026l`.
//!
//! These are the in-band *reports* a terminal can echo back, distinct from the local
//! request to enable/disable synchronized output (which is an output-side concern, out
//! of scope per `spec.md` §1).

use super::{EventPayload, MatchOutcome};
use crate::keystroke::{Keystroke, ModeTag};
use crate::modifiers::ModifierNameTable;

const PREFIX: &[u8] = b"\x1b[?2026";

pub fn try_match(buf: &[u8], _mod_table: &ModifierNameTable) -> MatchOutcome {
    if !buf.starts_with(PREFIX) {
        return if PREFIX.starts_with(buf) { MatchOutcome::Incomplete } else { MatchOutcome::NoMatch };
    }
    if buf.len() == PREFIX.len() {
        return MatchOutcome::Incomplete;
    }
    let begin = match buf[PREFIX.len()] {
        b'h' => true,
        b'l' => false,
        _ => return MatchOutcome::NoMatch,
    };
    let keystroke =
        Keystroke::text("").with_mode(ModeTag::Sync).with_payload(EventPayload::Sync { begin });
    MatchOutcome::Matched(keystroke, PREFIX.len() + 1)
}
