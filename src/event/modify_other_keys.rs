// Licensed under the Apache License, Version 2.0.

//! `modifyOtherKeys` matcher (`spec.md` §4.4.8): `CSI 27 ; mods ; keycode ~`.
//!
//! Shares the Kitty protocol's `(value-1)` modifier bit encoding (`spec.md` §4.4.7/8).

use super::MatchOutcome;
use crate::keystroke::Keystroke;
use crate::modifiers::{ModifierNameTable, Modifiers};

const PREFIX: &[u8] = b"\x1b[27;";

pub fn try_match(buf: &[u8], _mod_table: &ModifierNameTable) -> MatchOutcome {
    if !buf.starts_with(PREFIX) {
        return if PREFIX.starts_with(buf) { MatchOutcome::Incomplete } else { MatchOutcome::NoMatch };
    }
    let body = &buf[PREFIX.len()..];
    let Some(term_pos) = body.iter().position(|&b| b == b'~') else {
        return MatchOutcome::Incomplete;
    };
    let Ok(params_str) = std::str::from_utf8(&body[..term_pos]) else {
        return MatchOutcome::NoMatch;
    };
    let mut parts = params_str.split(';');
    let (Some(mods_s), Some(code_s), None) = (parts.next(), parts.next(), parts.next()) else {
        return MatchOutcome::NoMatch;
    };
    let (Ok(mods_raw), Ok(keycode)) = (mods_s.parse::<u32>(), code_s.parse::<u32>()) else {
        return MatchOutcome::NoMatch;
    };
    let Some(ch) = char::from_u32(keycode) else { return MatchOutcome::NoMatch };

    let bits = mods_raw.saturating_sub(1);
    let mut modifiers = Modifiers::empty();
    if bits & 0b0001 != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if bits & 0b0010 != 0 {
        modifiers |= Modifiers::ALT;
    }
    if bits & 0b0100 != 0 {
        modifiers |= Modifiers::CTRL;
    }

    let consumed = PREFIX.len() + term_pos + 1;
    let keystroke = Keystroke::text(ch.to_string()).with_modifiers(modifiers);
    MatchOutcome::Matched(keystroke, consumed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ModifierNameTable { ModifierNameTable::build() }

    #[test]
    fn ctrl_a_via_modify_other_keys() {
        // mods=5 -> bits=4 -> CTRL; keycode=97 -> 'a'
        let buf = b"\x1b[27;5;97~";
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, consumed) => {
                assert_eq!(consumed, buf.len());
                assert_eq!(k.modifiers(), Modifiers::CTRL);
                assert_eq!(k.raw_text(), "a");
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn incomplete_without_terminator() {
        assert_eq!(try_match(b"\x1b[27;5;97", &table()), MatchOutcome::Incomplete);
    }
}
