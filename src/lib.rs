// Licensed under the Apache License, Version 2.0.

//! Longest-prefix keystroke decoder for character-at-a-time terminal input.
//!
//! This crate turns a stream of raw bytes from a terminal in raw/cbreak mode into
//! [`Keystroke`] values: it builds a [`sequence_table::SequenceTable`] from the active
//! terminal's terminfo database plus a literal mixin of well-known escape sequences, runs
//! a battery of [`event`] matchers for protocol-level reports (mouse, bracketed paste,
//! focus, synchronized output, resize, Kitty, modifyOtherKeys, legacy CSI modifiers,
//! device attributes), and combines both via [`resolver::Resolver`] into a single
//! longest-match-wins decision per call.
//!
//! The read loop itself — [`reader::Terminal::inkey`] — is the only piece with I/O or
//! timing: it owns a [`byte_source::ByteSource`], waits out the escape-key ambiguity
//! window (`ESCDELAY`), and is the one place the resize and capability-query caches get
//! updated.
//!
//! This crate does not put the terminal into raw mode, does not draw anything, and does
//! not install a `tracing` subscriber — all three are the caller's responsibility.

pub mod byte_source;
pub mod capability_db;
pub mod capability_query;
pub mod encoding;
pub mod error;
pub mod event;
pub mod keycode;
pub mod keystroke;
pub mod modifiers;
pub mod reader;
pub mod resolver;
pub mod sequence_table;
pub mod terminfo_source;

pub use byte_source::{ByteSource, MockByteSource, ReadOutcome};
#[cfg(unix)]
pub use byte_source::UnixByteSource;
pub use capability_query::{CapabilityQueryCache, CapabilityReport, QueryKind};
pub use encoding::InputEncoding;
pub use error::{DecodeError, ReadError};
pub use keycode::Keycode;
pub use keystroke::{Keystroke, ModeTag};
pub use modifiers::Modifiers;
pub use reader::{Terminal, TerminalOptions, ESCDELAY};
pub use sequence_table::SequenceTable;
pub use terminfo_source::{StaticTerminfo, SystemTerminfo, TerminfoSource};

/// Every standard curses-compatible application key, brought in from
/// [`keycode`] so callers can write `ttykeys::KEY_UP` instead of reaching into the
/// submodule.
pub use keycode::{
    KEY_BACKSPACE, KEY_BTAB, KEY_DC, KEY_DOWN, KEY_END, KEY_ENTER, KEY_ESCAPE, KEY_F1, KEY_F10,
    KEY_F11, KEY_F12, KEY_F13, KEY_F14, KEY_F15, KEY_F16, KEY_F17, KEY_F18, KEY_F19, KEY_F2,
    KEY_F20, KEY_F3, KEY_F4, KEY_F5, KEY_F6, KEY_F7, KEY_F8, KEY_F9, KEY_HOME, KEY_IC, KEY_KP_0,
    KEY_KP_1, KEY_KP_2, KEY_KP_3, KEY_KP_4, KEY_KP_5, KEY_KP_6, KEY_KP_7, KEY_KP_8, KEY_KP_9,
    KEY_LEFT, KEY_MENU, KEY_NPAGE, KEY_PPAGE, KEY_RIGHT, KEY_TAB, KEY_UP,
};
