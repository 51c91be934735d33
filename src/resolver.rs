// Licensed under the Apache License, Version 2.0.

//! The keystroke resolver (`spec.md` §4.5): pure, synchronous, no I/O or timing of its
//! own. Given a decoded text buffer and a verdict on whether more bytes might still
//! arrive (`is_final`), it decides what — if anything — the buffer resolves to.
//!
//! Grounded on `router::try_parse_input_event` in the teacher's
//! `vt_100_terminal_input_parser`, generalized from that function's single
//! `input_available` flag into the explicit three-outcome algorithm the buffer-vs-prefix
//! ambiguity actually requires (the teacher's flag can't represent "wait, but only if
//! ESC-delay hasn't already been spent for this buffer" — that's left to the caller
//! here, same as the teacher's router leaves timing to its caller).

use crate::event::{self, MatchOutcome};
use crate::keycode::KEY_ESCAPE;
use crate::keystroke::Keystroke;
use crate::modifiers::{Modifiers, ModifierNameTable};
use crate::sequence_table::{SequenceTable, TrieWalk};

/// What the resolver decided for the current buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    /// A keystroke was produced; the caller should consume `consumed` bytes from the
    /// front of its buffer.
    Keystroke { keystroke: Keystroke, consumed: usize },
    /// The buffer might still grow into a longer match; the caller should wait for more
    /// bytes (subject to its own ESC-delay/deadline bookkeeping).
    Wait,
    /// The buffer is empty; nothing to resolve.
    Empty,
}

/// The resolver itself holds no state beyond references to the two tables built once at
/// `Terminal` construction (`spec.md` §4.5 "the resolver is pure").
pub struct Resolver<'a> {
    sequence_table: &'a SequenceTable,
    mod_table: &'a ModifierNameTable,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(sequence_table: &'a SequenceTable, mod_table: &'a ModifierNameTable) -> Self {
        Self { sequence_table, mod_table }
    }

    /// Resolve `buf` (already-decoded Unicode text) against the sequence table and event
    /// matchers. `is_final` means the ESC-delay (or overall deadline) has already
    /// expired once for this buffer — no further waiting is permitted even if something
    /// could still theoretically extend.
    #[must_use]
    pub fn resolve(&self, buf: &str, is_final: bool) -> ResolveOutcome {
        // Step 1.
        if buf.is_empty() {
            return ResolveOutcome::Empty;
        }
        let bytes = buf.as_bytes();

        // Step 2: event matchers. `event::try_all` already applies matcher-priority
        // ordering internally, so at most one candidate comes from this step.
        let event_outcome = event::try_all(bytes, self.mod_table);
        let event_candidate = match &event_outcome {
            MatchOutcome::Matched(k, n) => Some((k.clone(), *n)),
            MatchOutcome::Incomplete | MatchOutcome::NoMatch => None,
        };

        // Step 3: longest sequence-table match.
        let trie_outcome = self.sequence_table.walk(bytes);
        let trie_candidate = match trie_outcome {
            TrieWalk::Matched { code, consumed } => Some((code, consumed)),
            TrieWalk::Prefix { longest_complete } => longest_complete,
            TrieWalk::Dead => None,
        };
        let trie_keystroke_candidate = trie_candidate.map(|(code, consumed)| {
            let name = self.sequence_table.name_for_code(code).unwrap_or("KEY_UNKNOWN");
            let text = &buf[..consumed];
            (Keystroke::key(text, code, name, Modifiers::empty()), consumed)
        });

        let mut candidates = Vec::with_capacity(2);
        if let Some(c) = event_candidate {
            candidates.push(c);
        }
        if let Some(c) = trie_keystroke_candidate {
            candidates.push(c);
        }

        // Whether the buffer could still grow into something longer than what it has
        // already matched (or into a match where it currently has none).
        let could_extend = matches!(event_outcome, MatchOutcome::Incomplete)
            || matches!(trie_outcome, TrieWalk::Prefix { .. });

        // Step 4: no candidates at all.
        if candidates.is_empty() {
            if bytes[0] == 0x1b && could_extend && !is_final {
                return ResolveOutcome::Wait;
            }
            return self.single_codepoint(buf);
        }

        // Step 5: longest candidate wins; ties broken by push order, which is event
        // matcher first, then sequence table, matching `spec.md` §4.4's stated priority.
        let best_n = candidates.iter().map(|(_, n)| *n).max().unwrap();
        let (keystroke, consumed) =
            candidates.into_iter().find(|(_, n)| *n == best_n).expect("candidates non-empty");

        // Step 6: even having found a candidate, a strictly longer match may still be
        // pending unless the wait has already been spent.
        if could_extend && !is_final {
            return ResolveOutcome::Wait;
        }

        ResolveOutcome::Keystroke { keystroke, consumed }
    }

    /// Fallback: a single-codepoint text keystroke (`spec.md` §4.5 step 4, tail case).
    /// A lone ESC that reaches this fallback is named `KEY_ESCAPE` rather than reported
    /// as plain text (`spec.md` §8's orphaned-ESC scenario), since it's never itself an
    /// element of the sequence map and would otherwise have no way to surface as a named
    /// key.
    fn single_codepoint(&self, buf: &str) -> ResolveOutcome {
        let ch = buf.chars().next().expect("buf is non-empty");
        if ch == '\x1b' {
            let keystroke = Keystroke::key("\x1b", KEY_ESCAPE, "KEY_ESCAPE", Modifiers::empty());
            return ResolveOutcome::Keystroke { keystroke, consumed: 1 };
        }
        let mut scratch = [0u8; 4];
        let s = ch.encode_utf8(&mut scratch);
        ResolveOutcome::Keystroke { keystroke: Keystroke::text(s), consumed: s.len() }
    }
}
