// Licensed under the Apache License, Version 2.0.

//! In-band window resize matcher (`spec.md` §4.4.6): `CSI 48 ; h ; w ; ph ; pw t`.
//!
//! The matcher itself stays pure (no shared mutable state) — `spec.md` §4.4 calls for
//! matchers to update "the cached window dimensions collaborator atomically before
//! returning"; here that update happens one layer up, in
//! [`crate::reader::Terminal::inkey`], right after this matcher produces a
//! [`super::EventPayload::Resize`]. Keeping the matcher itself side-effect-free makes it
//! independently testable, and the caller only ever sees the update applied before the
//! `Keystroke` it paired with is returned, so the atomicity the spec asks for is
//! preserved from the caller's point of view.

use super::{EventPayload, MatchOutcome};
use crate::keystroke::{Keystroke, ModeTag};
use crate::modifiers::ModifierNameTable;

const PREFIX: &[u8] = b"\x1b[48;";

pub fn try_match(buf: &[u8], _mod_table: &ModifierNameTable) -> MatchOutcome {
    if !buf.starts_with(PREFIX) {
        return if PREFIX.starts_with(buf) { MatchOutcome::Incomplete } else { MatchOutcome::NoMatch };
    }
    let body = &buf[PREFIX.len()..];
    let Some(term_pos) = body.iter().position(|&b| b == b't') else {
        return MatchOutcome::Incomplete;
    };
    let Ok(params_str) = std::str::from_utf8(&body[..term_pos]) else {
        return MatchOutcome::NoMatch;
    };
    let mut params = params_str.split(';');
    let (Some(h_s), Some(w_s)) = (params.next(), params.next()) else {
        return MatchOutcome::NoMatch;
    };
    let (Ok(rows), Ok(cols)) = (h_s.parse::<u16>(), w_s.parse::<u16>()) else {
        return MatchOutcome::NoMatch;
    };
    if rows == 0 || cols == 0 {
        return MatchOutcome::NoMatch;
    }
    let consumed = PREFIX.len() + term_pos + 1;
    let keystroke =
        Keystroke::text("").with_mode(ModeTag::Resize).with_payload(EventPayload::Resize { rows, cols });
    MatchOutcome::Matched(keystroke, consumed)
}
