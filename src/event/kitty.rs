// Licensed under the Apache License, Version 2.0.

//! Kitty keyboard protocol matcher (`spec.md` §4.4.7):
//! `CSI unicode[:shifted[:base]] ; mods[:event_type] [; text_codepoints] u`.
//!
//! No direct teacher precedent (the teacher backend targets crossterm's
//! `KeyboardEnhancementFlags`, not the raw wire format) — parsed directly from the
//! Kitty keyboard protocol spec as described in `spec.md` §4.4.7, in the same
//! `fn(&[u8]) -> MatchOutcome` shape as every other matcher in this module.

use super::{EventPayload, MatchOutcome};
use crate::keystroke::{Keystroke, ModeTag};
use crate::modifiers::{BaseKey, ModifierNameTable, Modifiers};

const PREFIX: &[u8] = b"\x1b[";

pub fn try_match(buf: &[u8], mod_table: &ModifierNameTable) -> MatchOutcome {
    if !buf.starts_with(PREFIX) {
        return MatchOutcome::NoMatch;
    }
    let body = &buf[PREFIX.len()..];
    // Kitty sequences never start with a bare letter/digit+letter shape that other
    // matchers (legacy CSI) own; disambiguate by requiring the terminator 'u'.
    let Some(term_pos) = body.iter().position(|&b| b == b'u') else {
        // Could still be incomplete if everything so far looks like digits/semicolons/colons.
        if body.iter().all(|&b| b.is_ascii_digit() || b == b';' || b == b':') {
            return MatchOutcome::Incomplete;
        }
        return MatchOutcome::NoMatch;
    };
    let Ok(params_str) = std::str::from_utf8(&body[..term_pos]) else {
        return MatchOutcome::NoMatch;
    };
    let mut semi_parts = params_str.split(';');
    let Some(key_part) = semi_parts.next() else { return MatchOutcome::NoMatch };
    if key_part.is_empty() {
        return MatchOutcome::NoMatch;
    }
    let mut key_sub = key_part.split(':');
    let Some(unicode_s) = key_sub.next() else { return MatchOutcome::NoMatch };
    let Ok(unicode_key) = unicode_s.parse::<u32>() else { return MatchOutcome::NoMatch };
    let shifted_key = key_sub.next().and_then(|s| s.parse::<u32>().ok());
    let base_key = key_sub.next().and_then(|s| s.parse::<u32>().ok());

    let (modifiers_raw, event_type) = match semi_parts.next() {
        Some(mods_part) => {
            let mut mods_sub = mods_part.split(':');
            let mods = mods_sub.next().and_then(|s| s.parse::<u32>().ok()).unwrap_or(1);
            let ev = mods_sub.next().and_then(|s| s.parse::<u8>().ok()).unwrap_or(1);
            (mods.saturating_sub(1), ev)
        }
        None => (0, 1),
    };
    if !(1..=3).contains(&event_type) {
        return MatchOutcome::NoMatch;
    }

    let text_codepoints = match semi_parts.next() {
        Some(cps_part) if !cps_part.is_empty() => {
            let parsed: Option<Vec<u32>> =
                cps_part.split(':').map(|s| s.parse::<u32>().ok()).collect();
            match parsed {
                Some(v) => v,
                None => return MatchOutcome::NoMatch,
            }
        }
        _ => Vec::new(),
    };

    let consumed = PREFIX.len() + term_pos + 1;
    let key_modifiers = kitty_to_modifiers(modifiers_raw);
    let payload = EventPayload::Kitty {
        unicode_key,
        shifted_key,
        base_key,
        modifiers: modifiers_raw,
        event_type,
        text_codepoints,
    };

    // `spec.md` §6 "Keystroke name taxonomy": Kitty events get the same
    // `KEY_<MODS>_<KEY>` name any other modified key gets, with `_PRESSED`/`_REPEATED`/
    // `_RELEASED` appended for non-default event types. Only resolvable when the
    // modifier set is non-empty and the base codepoint is one the name table covers
    // (`spec.md` §4.3's character-key set) — an unmodified default press is reported as
    // plain text instead, same as any other character keystroke.
    let named = (!key_modifiers.is_empty())
        .then(|| char::from_u32(unicode_key))
        .flatten()
        .and_then(|ch| mod_table.resolve(BaseKey::Char(ch), key_modifiers));

    let keystroke = match named {
        Some((name, code)) => {
            let suffixed = match event_type {
                2 => format!("{name}_REPEATED"),
                3 => format!("{name}_RELEASED"),
                _ => name.to_string(),
            };
            Keystroke::key("", code, suffixed, key_modifiers)
        }
        None => {
            let text = char::from_u32(unicode_key).map(String::from).unwrap_or_default();
            Keystroke::text(text).with_modifiers(key_modifiers)
        }
    }
    .with_mode(ModeTag::Kitty)
    .with_payload(payload);

    MatchOutcome::Matched(keystroke, consumed)
}

fn kitty_to_modifiers(raw: u32) -> Modifiers {
    let mut m = Modifiers::empty();
    if raw & 0b0001 != 0 {
        m |= Modifiers::SHIFT;
    }
    if raw & 0b0010 != 0 {
        m |= Modifiers::ALT;
    }
    if raw & 0b0100 != 0 {
        m |= Modifiers::CTRL;
    }
    // bit 0b1000 (SUPER) intentionally not folded in; see EventPayload::kitty_super_pressed.
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ModifierNameTable { ModifierNameTable::build() }

    #[test]
    fn plain_key_press_defaults_to_event_type_1() {
        let buf = b"\x1b[97;1u"; // 'a', no modifiers, default event type
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, consumed) => {
                assert_eq!(consumed, buf.len());
                match k.payload() {
                    Some(EventPayload::Kitty { unicode_key, event_type, .. }) => {
                        assert_eq!(*unicode_key, 97);
                        assert_eq!(*event_type, 1);
                    }
                    other => panic!("unexpected payload: {other:?}"),
                }
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn ctrl_modifier_decodes() {
        let buf = b"\x1b[97;5u"; // mods=5 -> (5-1)=4 -> CTRL bit
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, _) => assert_eq!(k.modifiers(), Modifiers::CTRL),
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn ctrl_modified_key_gets_a_named_keystroke() {
        let buf = b"\x1b[97;5u";
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, _) => assert_eq!(k.name(), Some("KEY_CTRL_A")),
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn ctrl_modified_release_gets_the_released_suffix() {
        let buf = b"\x1b[97;5:3u";
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, _) => assert_eq!(k.name(), Some("KEY_CTRL_A_RELEASED")),
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn unmodified_press_is_plain_text_with_no_name() {
        let buf = b"\x1b[97;1u";
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, _) => {
                assert_eq!(k.raw_text(), "a");
                assert!(k.name().is_none());
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn release_event_type_is_parsed() {
        let buf = b"\x1b[97;1:3u";
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, _) => match k.payload() {
                Some(EventPayload::Kitty { event_type, .. }) => assert_eq!(*event_type, 3),
                other => panic!("unexpected payload: {other:?}"),
            },
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn text_codepoints_are_collected() {
        let buf = b"\x1b[97;1;97:98u";
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, _) => match k.payload() {
                Some(EventPayload::Kitty { text_codepoints, .. }) => {
                    assert_eq!(text_codepoints, &vec![97, 98]);
                }
                other => panic!("unexpected payload: {other:?}"),
            },
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn super_bit_is_retained_but_not_in_modifiers() {
        let buf = b"\x1b[97;9u"; // mods=9 -> raw=8 -> SUPER only
        match try_match(buf, &table()) {
            MatchOutcome::Matched(k, _) => {
                assert_eq!(k.modifiers(), Modifiers::empty());
                assert!(k.payload().unwrap().kitty_super_pressed());
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }
}
