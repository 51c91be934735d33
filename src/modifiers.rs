// Licensed under the Apache License, Version 2.0.

//! Modifier sets and synthetic modifier-combined key name generation (`spec.md` §3, §4.3).
//!
//! A [`Modifiers`] value is the ordered triple (CTRL, ALT, SHIFT) encoded as a 3-bit
//! mask; canonical ordering in generated names is always CTRL, ALT, SHIFT regardless of
//! the order modifiers are set in. [`ModifierNameTable`] is built once per
//! [`crate::Terminal`] and records, for every base application key and every non-empty
//! modifier subset, the synthetic `KEY_<MODS>_<KEY>` name and a freshly allocated
//! [`Keycode`] — it does not seed the sequence map itself (per `spec.md` §4.3, "the
//! generator need not seed `sequence_map` for every permutation"); matchers consult it
//! to synthesize a [`crate::keystroke::Keystroke`] once they've already decoded raw
//! modifier bits off the wire.

use std::collections::HashMap;

use crate::capability_db::{CAPABILITIES, EXTENSION_CAPABILITIES};
use crate::keycode::{Keycode, SYNTHETIC_MODIFIER_BASE};

bitflags::bitflags! {
    /// CTRL/ALT/SHIFT bitmask. Canonical ordering in names is always CTRL, ALT, SHIFT.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CTRL  = 0b001;
        const ALT   = 0b010;
        const SHIFT = 0b100;
    }
}

impl Modifiers {
    /// All seven non-empty subsets of {CTRL, ALT, SHIFT}, in the fixed name order used
    /// for code generation (so rebuilds are deterministic).
    pub const NON_EMPTY_SUBSETS: [Modifiers; 7] = [
        Modifiers::CTRL,
        Modifiers::ALT,
        Modifiers::SHIFT,
        Modifiers::from_bits_truncate(Modifiers::CTRL.bits() | Modifiers::ALT.bits()),
        Modifiers::from_bits_truncate(Modifiers::CTRL.bits() | Modifiers::SHIFT.bits()),
        Modifiers::from_bits_truncate(Modifiers::ALT.bits() | Modifiers::SHIFT.bits()),
        Modifiers::from_bits_truncate(
            Modifiers::CTRL.bits() | Modifiers::ALT.bits() | Modifiers::SHIFT.bits(),
        ),
    ];

    /// The `MODS` fragment of a generated name, e.g. `"CTRL_ALT_SHIFT"`. Order is fixed:
    /// CTRL, ALT, SHIFT, never the order the modifiers happened to be set.
    #[must_use]
    pub fn name_fragment(self) -> String {
        let mut parts = Vec::with_capacity(3);
        if self.contains(Modifiers::CTRL) {
            parts.push("CTRL");
        }
        if self.contains(Modifiers::ALT) {
            parts.push("ALT");
        }
        if self.contains(Modifiers::SHIFT) {
            parts.push("SHIFT");
        }
        parts.join("_")
    }
}

/// Lowercase ASCII letters are the "character keys" `spec.md` §4.3 calls out by name;
/// digits and common punctuation get the same treatment since real keyboards send
/// Ctrl/Alt sequences for them too (e.g. Ctrl+/ is commonly bound).
const CHARACTER_KEYS: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q',
    'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4', '5', '6', '7',
    '8', '9', ' ', '/', '\\', '[', ']',
];

/// A synthesizable name: either a base application key (by its canonical `KEY_*` name)
/// or a single character key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseKey {
    Named(&'static str),
    Char(char),
}

/// The generated table of `KEY_<MODS>_<KEY>` names, built once at
/// [`crate::Terminal`] construction.
#[derive(Debug, Clone)]
pub struct ModifierNameTable {
    by_key: HashMap<(BaseKey, Modifiers), (String, Keycode)>,
    by_code: HashMap<Keycode, String>,
}

impl ModifierNameTable {
    /// Build the table covering every capability-database key plus every character key
    /// in [`CHARACTER_KEYS`], crossed with every non-empty modifier subset.
    #[must_use]
    pub fn build() -> Self {
        let mut by_key = HashMap::new();
        let mut by_code = HashMap::new();
        let mut next_code = SYNTHETIC_MODIFIER_BASE;

        let mut allocate = |name: String| -> Keycode {
            let code = Keycode::new(next_code);
            next_code += 1;
            by_code.insert(code, name);
            code
        };

        for entry in CAPABILITIES.iter().chain(EXTENSION_CAPABILITIES) {
            let base = &entry.key_name["KEY_".len()..];
            for &mods in &Modifiers::NON_EMPTY_SUBSETS {
                let name = format!("KEY_{}_{}", mods.name_fragment(), base);
                let code = allocate(name.clone());
                by_key.insert((BaseKey::Named(entry.key_name), mods), (name, code));
            }
        }

        for &ch in CHARACTER_KEYS {
            for &mods in &Modifiers::NON_EMPTY_SUBSETS {
                let letter = character_fragment(ch, mods);
                let name = format!("KEY_{}_{}", mods.name_fragment(), letter);
                let code = allocate(name.clone());
                by_key.insert((BaseKey::Char(ch), mods), (name, code));
            }
        }

        Self { by_key, by_code }
    }

    /// Resolve `(base, mods)` to its generated `(name, code)`, if that combination was
    /// allocated (it always is for any entry produced by [`Self::build`]).
    #[must_use]
    pub fn resolve(&self, base: BaseKey, mods: Modifiers) -> Option<(&str, Keycode)> {
        self.by_key.get(&(base, mods)).map(|(name, code)| (name.as_str(), *code))
    }

    #[must_use]
    pub fn name_for_code(&self, code: Keycode) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }
}

/// For CTRL/ALT, character-component names upper-case letters (`KEY_CTRL_A`); for
/// SHIFT-only it's the same. Digits and punctuation pass through unchanged.
fn character_fragment(ch: char, _mods: Modifiers) -> String {
    if ch.is_ascii_alphabetic() { ch.to_ascii_uppercase().to_string() } else { ch.to_string() }
}
