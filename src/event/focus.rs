// Licensed under the Apache License, Version 2.0.

//! Focus in/out matcher (`spec.md` §4.4.5): `ESC[I` / `ESC[O`.
//!
//! Grounded on the focus marker recognition in `vt_100_terminal_input_parser::
//! terminal_events`.

use super::{EventPayload, MatchOutcome};
use crate::keystroke::{Keystroke, ModeTag};
use crate::modifiers::ModifierNameTable;

pub fn try_match(buf: &[u8], _mod_table: &ModifierNameTable) -> MatchOutcome {
    if buf.len() < 3 || !buf.starts_with(b"\x1b[") {
        return if b"\x1b[".starts_with(buf) { MatchOutcome::Incomplete } else { MatchOutcome::NoMatch };
    }
    let gained = match buf[2] {
        b'I' => true,
        b'O' => false,
        _ => return MatchOutcome::NoMatch,
    };
    let keystroke = Keystroke::text("")
        .with_mode(ModeTag::Focus)
        .with_payload(EventPayload::Focus { gained });
    MatchOutcome::Matched(keystroke, 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ModifierNameTable { ModifierNameTable::build() }

    #[test]
    fn focus_gained() {
        match try_match(b"\x1b[I", &table()) {
            MatchOutcome::Matched(k, consumed) => {
                assert_eq!(consumed, 3);
                assert_eq!(k.payload(), Some(&EventPayload::Focus { gained: true }));
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn focus_lost() {
        match try_match(b"\x1b[O", &table()) {
            MatchOutcome::Matched(k, _) => {
                assert_eq!(k.payload(), Some(&EventPayload::Focus { gained: false }));
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }
}
