// Licensed under the Apache License, Version 2.0.

//! The [`Keystroke`] value type (`spec.md` §3, §4.7).
//!
//! Keystrokes are value objects: the resolver constructs them, the read loop returns
//! them, the caller consumes them. No sharing, no interior mutability.

use smallstr::SmallString;
use std::cmp::Ordering;
use std::fmt;

use crate::event::EventPayload;
use crate::keycode::Keycode;
use crate::modifiers::Modifiers;

/// Inline small-string storage for `text`/`name`: most keystrokes are 1–7 bytes, so this
/// avoids a heap allocation per keypress in the common case.
pub type KeyText = SmallString<[u8; 16]>;

/// Which DEC/terminal protocol produced this keystroke, if any (`spec.md` §3 `mode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTag {
    BracketedPaste,
    MouseSgr,
    MouseLegacy,
    Focus,
    Sync,
    Kitty,
    Resize,
}

/// An immutable keystroke record (`spec.md` §3).
#[derive(Debug, Clone, PartialEq)]
pub struct Keystroke {
    text: KeyText,
    code: Option<Keycode>,
    name: Option<KeyText>,
    mode: Option<ModeTag>,
    modifiers: Modifiers,
    payload: Option<EventPayload>,
}

impl Keystroke {
    /// A plain-text keystroke: one or more Unicode characters the terminal sent as-is.
    #[must_use]
    pub fn text(text: impl Into<KeyText>) -> Self {
        Self {
            text: text.into(),
            code: None,
            name: None,
            mode: None,
            modifiers: Modifiers::empty(),
            payload: None,
        }
    }

    /// An application key or protocol event keystroke.
    #[must_use]
    pub fn key(
        text: impl Into<KeyText>,
        code: Keycode,
        name: impl Into<KeyText>,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            text: text.into(),
            code: Some(code),
            name: Some(name.into()),
            mode: None,
            modifiers,
            payload: None,
        }
    }

    /// Attach a DEC-event mode tag and/or parsed payload (mouse, paste, etc).
    #[must_use]
    pub fn with_mode(mut self, mode: ModeTag) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: EventPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The empty keystroke returned on timeout/EOF (`spec.md` §4.6/§7).
    #[must_use]
    pub fn empty() -> Self { Self::text(KeyText::new()) }

    #[must_use]
    pub fn is_empty_keystroke(&self) -> bool { self.text.is_empty() && self.code.is_none() }

    #[must_use]
    pub fn raw_text(&self) -> &str { &self.text }

    /// `is_sequence := code is present` (`spec.md` §3).
    #[must_use]
    pub fn is_sequence(&self) -> bool { self.code.is_some() }

    #[must_use]
    pub fn code(&self) -> Option<Keycode> { self.code }

    #[must_use]
    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    #[must_use]
    pub fn mode(&self) -> Option<ModeTag> { self.mode }

    #[must_use]
    pub fn modifiers(&self) -> Modifiers { self.modifiers }

    #[must_use]
    pub fn payload(&self) -> Option<&EventPayload> { self.payload.as_ref() }

    /// `value := the Unicode character(s) that would appear had modifiers not been
    /// engaged` (`spec.md` §3/§4.7).
    #[must_use]
    pub fn value(&self) -> String {
        let Some(name) = self.name.as_deref() else { return self.text.to_string() };
        for (prefix, lower) in [("KEY_CTRL_", true), ("KEY_ALT_", true), ("KEY_SHIFT_", false)] {
            if let Some(suffix) = name.strip_prefix(prefix) {
                let mut chars = suffix.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    if ch.is_ascii_graphic() || ch == ' ' {
                        return if lower {
                            ch.to_ascii_lowercase().to_string()
                        } else {
                            ch.to_string()
                        };
                    }
                }
            }
        }
        String::new()
    }

    /// One canonical query surface replacing the source's dynamic `is_<...>()`
    /// attribute dispatch (`spec.md` §9 design note). Grammar:
    /// `[ctrl_][alt_][shift_](char|appkey)`, matched against [`Keystroke::name`].
    #[must_use]
    pub fn matches(&self, name_spec: &str, ignore_case: bool) -> bool {
        let Some(name) = &self.name else { return false };
        let full_spec = if name_spec.starts_with("KEY_") {
            name_spec.to_string()
        } else {
            format!("KEY_{}", name_spec.to_ascii_uppercase())
        };
        if ignore_case {
            name.eq_ignore_ascii_case(&full_spec)
        } else {
            name.as_str() == full_spec
        }
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.text) }
}

/// Equal and orderable to plain strings by the `text` field, so `if keystroke == "q"`
/// reads naturally at call sites (`spec.md` §4.7).
impl PartialEq<str> for Keystroke {
    fn eq(&self, other: &str) -> bool { self.text.as_str() == other }
}

impl PartialEq<&str> for Keystroke {
    fn eq(&self, other: &&str) -> bool { self.text.as_str() == *other }
}

impl PartialOrd<str> for Keystroke {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> { self.text.as_str().partial_cmp(other) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::KEY_UP;

    #[test]
    fn is_sequence_iff_code_and_name_present() {
        let k = Keystroke::key("\x1b[A", KEY_UP, "KEY_UP", Modifiers::empty());
        assert!(k.is_sequence());
        assert!(k.code().is_some());
        assert!(k.name().is_some());

        let t = Keystroke::text("a");
        assert!(!t.is_sequence());
        assert!(t.code().is_none());
        assert!(t.name().is_none());
    }

    #[test]
    fn value_of_ctrl_letter_is_lowercase_letter() {
        let k = Keystroke::key("\x01", Keycode::new(0x0600), "KEY_CTRL_A", Modifiers::CTRL);
        assert_eq!(k.value(), "a");
    }

    #[test]
    fn value_of_named_app_key_is_empty() {
        let k = Keystroke::key("\x1b[A", KEY_UP, "KEY_UP", Modifiers::empty());
        assert_eq!(k.value(), "");
    }

    #[test]
    fn value_of_text_keystroke_is_its_text() {
        let k = Keystroke::text("q");
        assert_eq!(k.value(), "q");
    }

    #[test]
    fn equality_against_str_uses_text() {
        let k = Keystroke::text("q");
        assert_eq!(k, "q");
    }

    #[test]
    fn matches_grammar_is_case_insensitive_by_default() {
        let k = Keystroke::key("\x01", Keycode::new(0x0600), "KEY_CTRL_A", Modifiers::CTRL);
        assert!(k.matches("ctrl_a", true));
        assert!(k.matches("KEY_CTRL_A", true));
        assert!(!k.matches("ctrl_a", false));
    }
}
