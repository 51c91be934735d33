// Licensed under the Apache License, Version 2.0.

//! Event-pattern matchers (`spec.md` §4.4): a battery of pure functions for out-of-band
//! terminal reports, tried in priority order. Grounded on the per-protocol module split
//! in `vt_100_terminal_input_parser::{mouse, terminal_events, keyboard}`, generalized
//! from a two-state `Option<(event, consumed)>` return into the explicit three-state ADT
//! `spec.md` §9 calls for (`None` can't distinguish "never matches" from "matches if
//! more bytes arrive").

pub mod device_attributes;
pub mod focus;
pub mod kitty;
pub mod legacy_csi;
pub mod modify_other_keys;
pub mod mouse;
pub mod paste;
pub mod resize;
pub mod sync;

use crate::keystroke::Keystroke;
use crate::modifiers::ModifierNameTable;

/// Outcome of one matcher attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// This matcher's pattern cannot apply to this buffer at all.
    NoMatch,
    /// The buffer is a valid prefix of this matcher's pattern but more bytes are
    /// needed to know the full keystroke (e.g. bracketed paste without its closing
    /// marker yet). The resolver treats this as "wait" unless `is_final`.
    Incomplete,
    /// A complete event was parsed; `consumed` bytes belong to it.
    Matched(Keystroke, usize),
}

/// Parsed mouse-report fields shared by the SGR and legacy matchers, before they're
/// wrapped into an [`EventPayload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseFields {
    pub button: i32,
    pub x: i32,
    pub y: i32,
    pub is_release: bool,
    pub is_drag: bool,
    pub is_wheel: bool,
    pub shift: bool,
    pub meta: bool,
    pub ctrl: bool,
}

/// The parsed payload of a structured event keystroke (`spec.md` §3 "Event payloads").
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    BracketedPaste { text: String },
    MouseSgr(MouseFields),
    MouseLegacy { fields: MouseFields, is_motion: bool },
    Focus { gained: bool },
    Sync { begin: bool },
    Kitty {
        unicode_key: u32,
        shifted_key: Option<u32>,
        base_key: Option<u32>,
        modifiers: u32,
        event_type: u8,
        text_codepoints: Vec<u32>,
    },
    Resize { rows: u16, cols: u16 },
}

impl EventPayload {
    /// Kitty's "super" modifier bit is retained here but never folded into
    /// [`crate::keystroke::Keystroke::modifiers`] (`spec.md` §9 open question).
    #[must_use]
    pub fn kitty_super_pressed(&self) -> bool {
        matches!(self, EventPayload::Kitty { modifiers, .. } if modifiers & 0b1000 != 0)
    }
}

/// The ten matchers in priority order (`spec.md` §4.4). The first success wins, except
/// that the resolver (`crate::resolver`) separately compares matcher length against the
/// sequence-map length and picks the longer overall match, pattern-priority on ties.
pub fn try_all(buf: &[u8], mod_table: &ModifierNameTable) -> MatchOutcome {
    let attempts: [fn(&[u8], &ModifierNameTable) -> MatchOutcome; 9] = [
        paste::try_match,
        mouse::try_match_sgr,
        mouse::try_match_legacy,
        sync::try_match,
        focus::try_match,
        resize::try_match,
        kitty::try_match,
        modify_other_keys::try_match,
        legacy_csi::try_match,
    ];

    let mut best_incomplete = false;
    for attempt in attempts {
        match attempt(buf, mod_table) {
            MatchOutcome::Matched(k, n) => return MatchOutcome::Matched(k, n),
            MatchOutcome::Incomplete => best_incomplete = true,
            MatchOutcome::NoMatch => {}
        }
    }
    if best_incomplete { MatchOutcome::Incomplete } else { MatchOutcome::NoMatch }
}

/// Device attributes (matcher 10) never produce a user-visible keystroke — they are
/// routed to the capability-query bridge and otherwise consumed silently. Kept separate
/// from [`try_all`] since its return shape (consumed bytes, no keystroke) differs from
/// every other matcher.
pub use device_attributes::try_match as try_match_device_attributes;
