// Licensed under the Apache License, Version 2.0.

//! The [`Keycode`] type and the standard application-key constants.
//!
//! A keycode is a positive integer drawn from three disjoint ranges (`spec.md` §3):
//! standard curses-compatible application keys, this crate's extensions (tab, keypad,
//! menu), and synthetic modifier-combined / protocol-event codes generated at table-build
//! time by [`crate::modifiers`]. Every keycode has exactly one canonical name beginning
//! with `KEY_`; [`crate::sequence_table::SequenceTable`] keeps the code↔name map
//! bijective by construction.

/// A numeric keycode. Newtype over `u32` so it can't be confused with a raw byte or a
/// terminfo string offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keycode(pub u32);

impl Keycode {
    #[must_use]
    pub const fn new(code: u32) -> Self { Self(code) }

    #[must_use]
    pub const fn value(self) -> u32 { self.0 }
}

/// Range boundaries. Standard keys occupy `0x0100..0x0400` (curses KEY_* territory),
/// extensions `0x0400..0x0500`, synthetic modifier/event codes `0x0500..`.
pub mod ranges {
    pub const STANDARD_BASE: u32 = 0x0100;
    pub const EXTENSION_BASE: u32 = 0x0400;
    pub const SYNTHETIC_BASE: u32 = 0x0500;
}

use ranges::{EXTENSION_BASE, STANDARD_BASE};

macro_rules! define_keys {
    ($base:expr, $( $name:ident = $offset:expr ),+ $(,)?) => {
        $( pub const $name: Keycode = Keycode($base + $offset); )+
    };
}

// Standard curses-compatible application keys.
define_keys!(STANDARD_BASE,
    KEY_UP = 0, KEY_DOWN = 1, KEY_LEFT = 2, KEY_RIGHT = 3,
    KEY_HOME = 4, KEY_END = 5, KEY_PPAGE = 6, KEY_NPAGE = 7,
    KEY_IC = 8, KEY_DC = 9, KEY_BACKSPACE = 10, KEY_ENTER = 11,
    KEY_ESCAPE = 12,
    KEY_F1 = 20, KEY_F2 = 21, KEY_F3 = 22, KEY_F4 = 23, KEY_F5 = 24,
    KEY_F6 = 25, KEY_F7 = 26, KEY_F8 = 27, KEY_F9 = 28, KEY_F10 = 29,
    KEY_F11 = 30, KEY_F12 = 31, KEY_F13 = 32, KEY_F14 = 33, KEY_F15 = 34,
    KEY_F16 = 35, KEY_F17 = 36, KEY_F18 = 37, KEY_F19 = 38, KEY_F20 = 39,
    KEY_BTAB = 40,
);

// Extensions beyond bare curses: tab, keypad digits, menu.
define_keys!(EXTENSION_BASE,
    KEY_TAB = 0,
    KEY_KP_0 = 1, KEY_KP_1 = 2, KEY_KP_2 = 3, KEY_KP_3 = 4, KEY_KP_4 = 5,
    KEY_KP_5 = 6, KEY_KP_6 = 7, KEY_KP_7 = 8, KEY_KP_8 = 9, KEY_KP_9 = 10,
    KEY_MENU = 11,
);

/// Dedicated codes for structured terminal-generated events (mouse, paste, focus,
/// synchronized-output markers, resize, and the Kitty protocol's generic "a Kitty key
/// arrived" marker — the concrete key within is carried in the event payload, not
/// encoded into the keycode itself).
pub mod events {
    use super::{Keycode, ranges::SYNTHETIC_BASE};

    pub const BRACKETED_PASTE: Keycode = Keycode(SYNTHETIC_BASE);
    pub const FOCUS_IN: Keycode = Keycode(SYNTHETIC_BASE + 1);
    pub const FOCUS_OUT: Keycode = Keycode(SYNTHETIC_BASE + 2);
    pub const MOUSE_SGR: Keycode = Keycode(SYNTHETIC_BASE + 3);
    pub const MOUSE_LEGACY: Keycode = Keycode(SYNTHETIC_BASE + 4);
    pub const SYNC_BEGIN: Keycode = Keycode(SYNTHETIC_BASE + 5);
    pub const SYNC_END: Keycode = Keycode(SYNTHETIC_BASE + 6);
    pub const KITTY_KEY: Keycode = Keycode(SYNTHETIC_BASE + 7);
    pub const RESIZE_EVENT: Keycode = Keycode(SYNTHETIC_BASE + 8);
}

/// First keycode available to [`crate::modifiers::generate_modifier_names`] for the
/// per-base-key, per-modifier-subset synthetic codes. Everything below this line is a
/// fixed, hand-assigned constant; everything from here on is allocated sequentially at
/// table-build time.
pub const SYNTHETIC_MODIFIER_BASE: u32 = ranges::SYNTHETIC_BASE + 0x0100;
