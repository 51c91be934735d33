// Licensed under the Apache License, Version 2.0.

//! Modified cursor/function keys that the capability database alone can't resolve
//! (`spec.md` §4.4.9): `CSI 1 ; mods <letter>`, `CSI num ; mods ~`, bare SS3
//! (`ESC O <letter>`), and `CSI Z` (shift+tab, which xterm sends unprefixed).
//!
//! The capability database (`crate::capability_db`) only has entries for the
//! unmodified form of each sequence; once a modifier is involved the terminal switches
//! to one of these parameterized forms instead, so they're handled here as event
//! matchers rather than trie entries. Grounded on the modifier-suffix handling in
//! `vt_100_terminal_input_parser::keyboard`, generalized to go through
//! [`crate::modifiers::ModifierNameTable`] instead of a fixed lookup table so the
//! synthesized `Keystroke` carries the same generated name/code pair every other
//! modified key gets.

use super::MatchOutcome;
use crate::keycode::{self, Keycode};
use crate::keystroke::Keystroke;
use crate::modifiers::{BaseKey, ModifierNameTable, Modifiers};

const CSI: &[u8] = b"\x1b[";
const SS3: &[u8] = b"\x1bO";

/// Letter suffix for `CSI 1 ; mods <letter>` and bare SS3, mapped to its base key name
/// and unmodified keycode.
fn letter_key(letter: u8) -> Option<(&'static str, Keycode)> {
    Some(match letter {
        b'A' => ("KEY_UP", keycode::KEY_UP),
        b'B' => ("KEY_DOWN", keycode::KEY_DOWN),
        b'C' => ("KEY_RIGHT", keycode::KEY_RIGHT),
        b'D' => ("KEY_LEFT", keycode::KEY_LEFT),
        b'H' => ("KEY_HOME", keycode::KEY_HOME),
        b'F' => ("KEY_END", keycode::KEY_END),
        b'P' => ("KEY_F1", keycode::KEY_F1),
        b'Q' => ("KEY_F2", keycode::KEY_F2),
        b'R' => ("KEY_F3", keycode::KEY_F3),
        b'S' => ("KEY_F4", keycode::KEY_F4),
        _ => return None,
    })
}

/// `num` suffix for `CSI num ; mods ~`, mapped the same way.
fn tilde_key(num: u32) -> Option<(&'static str, Keycode)> {
    Some(match num {
        2 => ("KEY_IC", keycode::KEY_IC),
        3 => ("KEY_DC", keycode::KEY_DC),
        5 => ("KEY_PPAGE", keycode::KEY_PPAGE),
        6 => ("KEY_NPAGE", keycode::KEY_NPAGE),
        7 => ("KEY_HOME", keycode::KEY_HOME),
        8 => ("KEY_END", keycode::KEY_END),
        11 => ("KEY_F1", keycode::KEY_F1),
        12 => ("KEY_F2", keycode::KEY_F2),
        13 => ("KEY_F3", keycode::KEY_F3),
        14 => ("KEY_F4", keycode::KEY_F4),
        15 => ("KEY_F5", keycode::KEY_F5),
        17 => ("KEY_F6", keycode::KEY_F6),
        18 => ("KEY_F7", keycode::KEY_F7),
        19 => ("KEY_F8", keycode::KEY_F8),
        20 => ("KEY_F9", keycode::KEY_F9),
        21 => ("KEY_F10", keycode::KEY_F10),
        23 => ("KEY_F11", keycode::KEY_F11),
        24 => ("KEY_F12", keycode::KEY_F12),
        _ => return None,
    })
}

fn decode_mods(raw: u32) -> Modifiers {
    let bits = raw.saturating_sub(1);
    let mut m = Modifiers::empty();
    if bits & 0b001 != 0 {
        m |= Modifiers::SHIFT;
    }
    if bits & 0b010 != 0 {
        m |= Modifiers::ALT;
    }
    if bits & 0b100 != 0 {
        m |= Modifiers::CTRL;
    }
    m
}

/// Resolve `(base_name, base_code, mods)` to the name/code a [`Keystroke`] should carry:
/// the plain capability-database pair when unmodified, the generated synthetic pair
/// otherwise.
fn resolve<'a>(
    base_name: &'static str,
    base_code: Keycode,
    mods: Modifiers,
    mod_table: &'a ModifierNameTable,
) -> (&'a str, Keycode)
where
    'static: 'a,
{
    if mods.is_empty() {
        (base_name, base_code)
    } else {
        mod_table.resolve(BaseKey::Named(base_name), mods).unwrap_or((base_name, base_code))
    }
}

pub fn try_match(buf: &[u8], mod_table: &ModifierNameTable) -> MatchOutcome {
    if let Some(outcome) = try_csi_1_mods(buf, mod_table) {
        return outcome;
    }
    if let Some(outcome) = try_tilde(buf, mod_table) {
        return outcome;
    }
    if let Some(outcome) = try_ss3(buf, mod_table) {
        return outcome;
    }
    if let Some(outcome) = try_shift_tab(buf, mod_table) {
        return outcome;
    }
    MatchOutcome::NoMatch
}

/// `CSI 1 ; mods <letter>`.
fn try_csi_1_mods(buf: &[u8], mod_table: &ModifierNameTable) -> Option<MatchOutcome> {
    const PREFIX: &[u8] = b"\x1b[1;";
    if !buf.starts_with(PREFIX) {
        return if PREFIX.starts_with(buf) { Some(MatchOutcome::Incomplete) } else { None };
    }
    let rest = &buf[PREFIX.len()..];
    let digit_len = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digit_len == 0 || digit_len == rest.len() {
        return Some(MatchOutcome::Incomplete);
    }
    let letter = rest[digit_len];
    let Some((name, code)) = letter_key(letter) else { return Some(MatchOutcome::NoMatch) };
    let mods_str = std::str::from_utf8(&rest[..digit_len]).ok()?;
    let Ok(mods_raw) = mods_str.parse::<u32>() else { return Some(MatchOutcome::NoMatch) };
    let mods = decode_mods(mods_raw);
    let (resolved_name, resolved_code) = resolve(name, code, mods, mod_table);
    let consumed = PREFIX.len() + digit_len + 1;
    let keystroke = Keystroke::key("", resolved_code, resolved_name, mods);
    Some(MatchOutcome::Matched(keystroke, consumed))
}

/// `CSI num ; mods ~`.
fn try_tilde(buf: &[u8], mod_table: &ModifierNameTable) -> Option<MatchOutcome> {
    if !buf.starts_with(CSI) {
        return if CSI.starts_with(buf) { Some(MatchOutcome::Incomplete) } else { None };
    }
    let body = &buf[CSI.len()..];
    let term_pos = body.iter().position(|&b| b == b'~')?;
    let params_str = std::str::from_utf8(&body[..term_pos]).ok()?;
    let mut parts = params_str.split(';');
    let num_s = parts.next()?;
    let Ok(num) = num_s.parse::<u32>() else { return Some(MatchOutcome::NoMatch) };
    let Some((name, code)) = tilde_key(num) else { return None };
    let mods = match parts.next() {
        Some(mods_s) => match mods_s.parse::<u32>() {
            Ok(raw) => decode_mods(raw),
            Err(_) => return Some(MatchOutcome::NoMatch),
        },
        None => Modifiers::empty(),
    };
    if parts.next().is_some() {
        return Some(MatchOutcome::NoMatch);
    }
    let (resolved_name, resolved_code) = resolve(name, code, mods, mod_table);
    let consumed = CSI.len() + term_pos + 1;
    let keystroke = Keystroke::key("", resolved_code, resolved_name, mods);
    Some(MatchOutcome::Matched(keystroke, consumed))
}

/// Bare SS3: `ESC O <letter>`, no modifier field (application-keypad mode arrows/F1-F4
/// when the terminal isn't in modifyOtherKeys/Kitty mode).
fn try_ss3(buf: &[u8], mod_table: &ModifierNameTable) -> Option<MatchOutcome> {
    if !buf.starts_with(SS3) {
        return if SS3.starts_with(buf) { Some(MatchOutcome::Incomplete) } else { None };
    }
    if buf.len() == SS3.len() {
        return Some(MatchOutcome::Incomplete);
    }
    let letter = buf[SS3.len()];
    let (name, code) = letter_key(letter)?;
    let (resolved_name, resolved_code) = resolve(name, code, Modifiers::empty(), mod_table);
    let keystroke = Keystroke::key("", resolved_code, resolved_name, Modifiers::empty());
    Some(MatchOutcome::Matched(keystroke, SS3.len() + 1))
}

/// `CSI Z`: shift+tab, sent without a modifier parameter.
fn try_shift_tab(buf: &[u8], mod_table: &ModifierNameTable) -> Option<MatchOutcome> {
    const SEQ: &[u8] = b"\x1b[Z";
    if !buf.starts_with(SEQ) {
        return if SEQ.starts_with(buf) { Some(MatchOutcome::Incomplete) } else { None };
    }
    let (name, code) =
        resolve("KEY_BTAB", keycode::KEY_BTAB, Modifiers::SHIFT, mod_table);
    let keystroke = Keystroke::key("", code, name, Modifiers::SHIFT);
    Some(MatchOutcome::Matched(keystroke, SEQ.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ModifierNameTable { ModifierNameTable::build() }

    #[test]
    fn ctrl_up_via_csi_1_mods() {
        let buf = b"\x1b[1;5A"; // mods=5 -> CTRL
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, consumed) => {
                assert_eq!(consumed, buf.len());
                assert_eq!(k.modifiers(), Modifiers::CTRL);
                assert_eq!(k.name(), Some("KEY_CTRL_UP"));
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn unmodified_csi_1_form_resolves_to_base_key() {
        let buf = b"\x1b[1;1A"; // mods=1 -> empty
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, _) => {
                assert!(k.modifiers().is_empty());
                assert_eq!(k.name(), Some("KEY_UP"));
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn shift_delete_via_tilde_form() {
        let buf = b"\x1b[3;2~"; // num=3 (Delete), mods=2 -> SHIFT
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, consumed) => {
                assert_eq!(consumed, buf.len());
                assert_eq!(k.modifiers(), Modifiers::SHIFT);
                assert_eq!(k.name(), Some("KEY_SHIFT_DC"));
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn unmodified_tilde_form_has_no_modifiers() {
        let buf = b"\x1b[5~"; // PPAGE, no modifier field at all
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, _) => {
                assert!(k.modifiers().is_empty());
                assert_eq!(k.name(), Some("KEY_PPAGE"));
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn bare_ss3_arrow() {
        let buf = b"\x1bOA";
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, consumed) => {
                assert_eq!(consumed, 3);
                assert_eq!(k.name(), Some("KEY_UP"));
                assert!(k.modifiers().is_empty());
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn shift_tab_via_csi_z() {
        let buf = b"\x1b[Z";
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, consumed) => {
                assert_eq!(consumed, 3);
                assert_eq!(k.modifiers(), Modifiers::SHIFT);
                assert_eq!(k.name(), Some("KEY_SHIFT_BTAB"));
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn incomplete_csi_1_without_letter() {
        assert_eq!(try_match(b"\x1b[1;5", &table()), MatchOutcome::Incomplete);
    }
}
