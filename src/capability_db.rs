// Licensed under the Apache License, Version 2.0.

//! The capability database (`spec.md` §4.1): a static, ordered mapping of symbolic
//! capability names to `(terminfo capability name, canonical KEY_* name, numeric code)`,
//! plus a literal mixin of sequences terminfo doesn't carry and an override list for
//! terminals that mis-describe themselves.
//!
//! Grounded on the static capability tables in `core/ansi/constants/input_sequences.rs`
//! of the teacher crate: one ordered array, built once, read-only thereafter.

use crate::keycode::{self, Keycode};

/// One row of the capability database.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityEntry {
    /// Symbolic name, e.g. `"key_up"` — matches terminfo's naming convention.
    pub capability_name: &'static str,
    /// The terminfo capability string name to query (`cap_name` in `spec.md` §4.2).
    pub terminfo_cap: &'static str,
    /// Canonical `KEY_*` name. Bijective with `code`.
    pub key_name: &'static str,
    pub code: Keycode,
}

macro_rules! cap {
    ($cap_name:literal, $terminfo:literal, $key_name:literal, $code:expr) => {
        CapabilityEntry {
            capability_name: $cap_name,
            terminfo_cap: $terminfo,
            key_name: $key_name,
            code: $code,
        }
    };
}

/// Ordering only matters for deterministic table rebuilds (`spec.md` §4.1); lookups by
/// the builder are by `capability_name`/`code`, not position.
pub const CAPABILITIES: &[CapabilityEntry] = &[
    cap!("key_up", "kcuu1", "KEY_UP", keycode::KEY_UP),
    cap!("key_down", "kcud1", "KEY_DOWN", keycode::KEY_DOWN),
    cap!("key_left", "kcub1", "KEY_LEFT", keycode::KEY_LEFT),
    cap!("key_right", "kcuf1", "KEY_RIGHT", keycode::KEY_RIGHT),
    cap!("key_home", "khome", "KEY_HOME", keycode::KEY_HOME),
    cap!("key_end", "kend", "KEY_END", keycode::KEY_END),
    cap!("key_ppage", "kpp", "KEY_PPAGE", keycode::KEY_PPAGE),
    cap!("key_npage", "knp", "KEY_NPAGE", keycode::KEY_NPAGE),
    cap!("key_ic", "kich1", "KEY_IC", keycode::KEY_IC),
    cap!("key_dc", "kdch1", "KEY_DC", keycode::KEY_DC),
    cap!("key_backspace", "kbs", "KEY_BACKSPACE", keycode::KEY_BACKSPACE),
    cap!("key_enter", "kent", "KEY_ENTER", keycode::KEY_ENTER),
    cap!("key_btab", "kcbt", "KEY_BTAB", keycode::KEY_BTAB),
    cap!("key_f1", "kf1", "KEY_F1", keycode::KEY_F1),
    cap!("key_f2", "kf2", "KEY_F2", keycode::KEY_F2),
    cap!("key_f3", "kf3", "KEY_F3", keycode::KEY_F3),
    cap!("key_f4", "kf4", "KEY_F4", keycode::KEY_F4),
    cap!("key_f5", "kf5", "KEY_F5", keycode::KEY_F5),
    cap!("key_f6", "kf6", "KEY_F6", keycode::KEY_F6),
    cap!("key_f7", "kf7", "KEY_F7", keycode::KEY_F7),
    cap!("key_f8", "kf8", "KEY_F8", keycode::KEY_F8),
    cap!("key_f9", "kf9", "KEY_F9", keycode::KEY_F9),
    cap!("key_f10", "kf10", "KEY_F10", keycode::KEY_F10),
    cap!("key_f11", "kf11", "KEY_F11", keycode::KEY_F11),
    cap!("key_f12", "kf12", "KEY_F12", keycode::KEY_F12),
];

/// Extensions standard terminfo doesn't carry a `key_*` capability for. `terminfo_cap`
/// is left empty: the builder skips terminfo lookup for these and relies solely on the
/// literal mixin below.
pub const EXTENSION_CAPABILITIES: &[CapabilityEntry] = &[
    cap!("key_tab", "", "KEY_TAB", keycode::KEY_TAB),
    cap!("key_kp0", "", "KEY_KP_0", keycode::KEY_KP_0),
    cap!("key_kp1", "", "KEY_KP_1", keycode::KEY_KP_1),
    cap!("key_kp2", "", "KEY_KP_2", keycode::KEY_KP_2),
    cap!("key_kp3", "", "KEY_KP_3", keycode::KEY_KP_3),
    cap!("key_kp4", "", "KEY_KP_4", keycode::KEY_KP_4),
    cap!("key_kp5", "", "KEY_KP_5", keycode::KEY_KP_5),
    cap!("key_kp6", "", "KEY_KP_6", keycode::KEY_KP_6),
    cap!("key_kp7", "", "KEY_KP_7", keycode::KEY_KP_7),
    cap!("key_kp8", "", "KEY_KP_8", keycode::KEY_KP_8),
    cap!("key_kp9", "", "KEY_KP_9", keycode::KEY_KP_9),
    cap!("key_menu", "", "KEY_MENU", keycode::KEY_MENU),
];

/// A literal `(sequence, keycode)` pair, independent of terminfo — either because
/// terminfo has no capability for it (application-mode keypad) or because we want it
/// regardless of what terminfo says.
#[derive(Debug, Clone, Copy)]
pub struct LiteralEntry {
    pub sequence: &'static [u8],
    pub code: Keycode,
}

/// Literal mixin (`spec.md` §4.1/§4.2): sequences inserted into the sequence map
/// independent of the active terminal's terminfo strings.
pub const LITERAL_MIXIN: &[LiteralEntry] = &[
    LiteralEntry { sequence: b"\x1bOA", code: keycode::KEY_UP },
    LiteralEntry { sequence: b"\x1bOB", code: keycode::KEY_DOWN },
    LiteralEntry { sequence: b"\x1bOC", code: keycode::KEY_RIGHT },
    LiteralEntry { sequence: b"\x1bOD", code: keycode::KEY_LEFT },
    LiteralEntry { sequence: b"\x1bOH", code: keycode::KEY_HOME },
    LiteralEntry { sequence: b"\x1bOF", code: keycode::KEY_END },
    LiteralEntry { sequence: b"\x1bOP", code: keycode::KEY_F1 },
    LiteralEntry { sequence: b"\x1bOQ", code: keycode::KEY_F2 },
    LiteralEntry { sequence: b"\x1bOR", code: keycode::KEY_F3 },
    LiteralEntry { sequence: b"\x1bOS", code: keycode::KEY_F4 },
    LiteralEntry { sequence: b"\x1b[A", code: keycode::KEY_UP },
    LiteralEntry { sequence: b"\x1b[B", code: keycode::KEY_DOWN },
    LiteralEntry { sequence: b"\x1b[C", code: keycode::KEY_RIGHT },
    LiteralEntry { sequence: b"\x1b[D", code: keycode::KEY_LEFT },
    LiteralEntry { sequence: b"\x1b[H", code: keycode::KEY_HOME },
    LiteralEntry { sequence: b"\x1b[F", code: keycode::KEY_END },
    LiteralEntry { sequence: b"\x1b[Z", code: keycode::KEY_BTAB },
    LiteralEntry { sequence: b"\x1b[3~", code: keycode::KEY_DC },
    LiteralEntry { sequence: b"\x1b[2~", code: keycode::KEY_IC },
    LiteralEntry { sequence: b"\x1b[5~", code: keycode::KEY_PPAGE },
    LiteralEntry { sequence: b"\x1b[6~", code: keycode::KEY_NPAGE },
    LiteralEntry { sequence: b"\x1b[11~", code: keycode::KEY_F1 },
    LiteralEntry { sequence: b"\x1b[12~", code: keycode::KEY_F2 },
    LiteralEntry { sequence: b"\x1b[13~", code: keycode::KEY_F3 },
    LiteralEntry { sequence: b"\x1b[14~", code: keycode::KEY_F4 },
    LiteralEntry { sequence: b"\x1b[15~", code: keycode::KEY_F5 },
    LiteralEntry { sequence: b"\x1b[17~", code: keycode::KEY_F6 },
    LiteralEntry { sequence: b"\x1b[18~", code: keycode::KEY_F7 },
    LiteralEntry { sequence: b"\x1b[19~", code: keycode::KEY_F8 },
    LiteralEntry { sequence: b"\x1b[20~", code: keycode::KEY_F9 },
    LiteralEntry { sequence: b"\x1b[21~", code: keycode::KEY_F10 },
    LiteralEntry { sequence: b"\x1b[23~", code: keycode::KEY_F11 },
    LiteralEntry { sequence: b"\x1b[24~", code: keycode::KEY_F12 },
    LiteralEntry { sequence: b"\x7f", code: keycode::KEY_BACKSPACE },
    LiteralEntry { sequence: b"\x08", code: keycode::KEY_BACKSPACE },
    LiteralEntry { sequence: b"\t", code: keycode::KEY_TAB },
    LiteralEntry { sequence: b"\r", code: keycode::KEY_ENTER },
];

/// Sequences whose literal form must supersede the terminfo-reported string for this
/// capability, because some terminals (or terminfo databases) mis-describe it. Applied
/// after terminfo insertion, before the rest of the mixin, so later entries can still
/// win on true duplicates.
///
/// `xterm`'s `kbs` (key_backspace) is documented as `\x7f` in most terminfo databases,
/// but some configurations report `\x08`; we pin `\x7f` as canonical and let `\x08`
/// arrive via [`LITERAL_MIXIN`] instead of trusting whichever terminfo happens to say.
pub const OVERRIDES: &[LiteralEntry] =
    &[LiteralEntry { sequence: b"\x7f", code: keycode::KEY_BACKSPACE }];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_standard_capability_has_a_distinct_code() {
        let mut seen = std::collections::HashSet::new();
        for entry in CAPABILITIES.iter().chain(EXTENSION_CAPABILITIES) {
            assert!(seen.insert(entry.code), "duplicate code for {}", entry.key_name);
        }
    }

    #[test]
    fn key_names_all_start_with_key_prefix() {
        for entry in CAPABILITIES.iter().chain(EXTENSION_CAPABILITIES) {
            assert!(entry.key_name.starts_with("KEY_"));
        }
    }
}
