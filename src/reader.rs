// Licensed under the Apache License, Version 2.0.

//! The input read loop (`spec.md` §4.6): `Terminal` owns the immutable tables, the
//! mutable input buffer, and the incremental decoder, and drives the deadline-driven
//! algorithm that turns raw bytes into [`Keystroke`]s one call at a time.
//!
//! Grounded on the teacher's poll-driven dedicated-thread model
//! (`core::resilient_reactor_thread`), collapsed into a single synchronous call since
//! this crate has no internal thread (`spec.md` §5) — the caller *is* the dedicated
//! thread, from this crate's point of view.

use std::time::{Duration, Instant};

use crate::byte_source::{ByteSource, ReadOutcome};
use crate::capability_query::CapabilityQueryCache;
use crate::encoding::{IncrementalDecoder, InputEncoding};
use crate::error::ReadError;
use crate::event::device_attributes::{self, DeviceAttrOutcome};
use crate::event::EventPayload;
use crate::keystroke::Keystroke;
use crate::modifiers::ModifierNameTable;
use crate::resolver::{ResolveOutcome, Resolver};
use crate::sequence_table::SequenceTable;
use crate::terminfo_source::TerminfoSource;

/// Maximum time a lone ESC waits before being emitted bare (`spec.md` §4.6). Default
/// matches the curses convention this crate's capability database borrows its key names
/// from.
pub const ESCDELAY: Duration = Duration::from_millis(35);

/// A generous stand-in for "no deadline" (`timeout = None`, `spec.md` §4.6): block
/// effectively forever without requiring the read loop's deadline arithmetic to special
/// case an `Option<Instant>` at every step.
const FOREVER: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Construction-time configuration (`spec.md` §4.11 [AMBIENT]): the single seam the
/// escape-delay, encoding, and (by extension) capability-query caching hang off of.
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    pub escdelay: Duration,
    pub encoding: InputEncoding,
}

impl Default for TerminalOptions {
    fn default() -> Self { Self { escdelay: ESCDELAY, encoding: InputEncoding::Utf8 } }
}

enum ReadMoreOutcome {
    GotBytes,
    TimedOut,
    Eof,
}

/// Owns the tables, decoder, and buffer for one interactive session (`spec.md` §5
/// "shared state"). Not `Send`/`Sync` by design — a single consumer per instance.
pub struct Terminal<S: ByteSource> {
    byte_source: S,
    sequence_table: SequenceTable,
    mod_table: ModifierNameTable,
    decoder: IncrementalDecoder,
    buffer: String,
    options: TerminalOptions,
    capability_cache: CapabilityQueryCache,
    window_size: Option<(u16, u16)>,
}

impl<S: ByteSource> Terminal<S> {
    /// Build the immutable tables once (`spec.md` §4.2/§4.3) and take ownership of the
    /// byte source for the session's lifetime.
    pub fn new(
        byte_source: S,
        terminfo: &dyn TerminfoSource,
        options: TerminalOptions,
    ) -> Self {
        Self {
            byte_source,
            sequence_table: SequenceTable::build(terminfo),
            mod_table: ModifierNameTable::build(),
            decoder: IncrementalDecoder::new(options.encoding),
            buffer: String::new(),
            options,
            capability_cache: CapabilityQueryCache::new(),
            window_size: None,
        }
    }

    #[must_use]
    pub fn capability_cache(&self) -> &CapabilityQueryCache { &self.capability_cache }

    /// Last window size observed via an in-band resize report, if any.
    #[must_use]
    pub fn window_size(&self) -> Option<(u16, u16)> { self.window_size }

    /// One [`Keystroke`] per call (`spec.md` §4.6). `timeout = None` blocks until a
    /// keystroke can be produced; `Some(Duration::ZERO)` polls; otherwise blocks up to
    /// `timeout`, returning [`Keystroke::empty`] if nothing arrived.
    ///
    /// I/O errors from the byte source propagate directly to the caller, per `spec.md`
    /// §7's "the loop surfaces errors from the byte source directly".
    #[tracing::instrument(skip(self), level = "debug")]
    pub fn inkey(&mut self, timeout: Option<Duration>) -> Result<Keystroke, ReadError> {
        let deadline = Instant::now() + timeout.unwrap_or(FOREVER);
        let mut escdelay_spent = false;

        loop {
            match device_attributes::try_match(self.buffer.as_bytes()) {
                DeviceAttrOutcome::Matched { report, consumed } => {
                    self.capability_cache.record(report);
                    self.consume(consumed);
                    continue;
                }
                // A device-attributes reply is still arriving; this buffer can't
                // possibly resolve to anything else, so wait for more bytes instead of
                // falling through to the resolver (which has no notion of this
                // matcher's own pending state and would otherwise emit a spurious bare
                // ESC).
                DeviceAttrOutcome::Incomplete => {
                    if Instant::now() >= deadline {
                        return Ok(Keystroke::empty());
                    }
                    match self.read_more(deadline)? {
                        ReadMoreOutcome::GotBytes => continue,
                        ReadMoreOutcome::TimedOut | ReadMoreOutcome::Eof => {
                            return Ok(Keystroke::empty());
                        }
                    }
                }
                DeviceAttrOutcome::NoMatch => {}
            }

            let resolver = Resolver::new(&self.sequence_table, &self.mod_table);
            match resolver.resolve(&self.buffer, false) {
                ResolveOutcome::Keystroke { keystroke, consumed } => {
                    self.consume(consumed);
                    self.apply_resize(&keystroke);
                    return Ok(keystroke);
                }
                ResolveOutcome::Wait if self.buffer.starts_with('\x1b') && !escdelay_spent => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    let escdeadline =
                        Instant::now() + self.options.escdelay.min(remaining);
                    tracing::trace!(?escdeadline, "waiting out escape delay");
                    match self.read_more(escdeadline)? {
                        ReadMoreOutcome::GotBytes => continue,
                        ReadMoreOutcome::Eof => return Ok(Keystroke::empty()),
                        ReadMoreOutcome::TimedOut => {
                            escdelay_spent = true;
                            let resolver = Resolver::new(&self.sequence_table, &self.mod_table);
                            match resolver.resolve(&self.buffer, true) {
                                ResolveOutcome::Keystroke { keystroke, consumed } => {
                                    self.consume(consumed);
                                    self.apply_resize(&keystroke);
                                    return Ok(keystroke);
                                }
                                ResolveOutcome::Wait | ResolveOutcome::Empty => {
                                    return Ok(Keystroke::empty());
                                }
                            }
                        }
                    }
                }
                ResolveOutcome::Wait | ResolveOutcome::Empty => {
                    if Instant::now() >= deadline {
                        return Ok(Keystroke::empty());
                    }
                    match self.read_more(deadline)? {
                        ReadMoreOutcome::GotBytes => continue,
                        ReadMoreOutcome::TimedOut | ReadMoreOutcome::Eof => {
                            return Ok(Keystroke::empty());
                        }
                    }
                }
            }
        }
    }

    /// Prepend `text` to the buffer so the next [`Self::inkey`] resolves from it
    /// (`spec.md` §4.6 "ungetch") — used by tests and by capability-query callers that
    /// need to push back bytes read while awaiting a device-attribute reply.
    pub fn ungetch(&mut self, text: &str) { self.buffer.insert_str(0, text); }

    /// Discard the buffer and every currently-readable byte (`spec.md` §4.6
    /// "flushinp"). Idempotent: calling it twice in a row is the same as calling it
    /// once.
    pub fn flushinp(&mut self) {
        self.buffer.clear();
        let mut scratch = [0u8; 1024];
        loop {
            match self.byte_source.read(&mut scratch, Instant::now()) {
                Ok(ReadOutcome::Data(_)) => continue,
                _ => break,
            }
        }
    }

    fn consume(&mut self, consumed: usize) { self.buffer.drain(..consumed); }

    /// Apply the resize matcher's cached-dimension update right after the keystroke it
    /// produced, atomically from the caller's point of view (see the design note in
    /// `crate::event::resize`).
    fn apply_resize(&mut self, keystroke: &Keystroke) {
        if let Some(EventPayload::Resize { rows, cols }) = keystroke.payload() {
            self.window_size = Some((*rows, *cols));
        }
    }

    #[tracing::instrument(skip(self), level = "trace")]
    fn read_more(&mut self, deadline: Instant) -> Result<ReadMoreOutcome, ReadError> {
        let mut scratch = [0u8; 1024];
        match self.byte_source.read(&mut scratch, deadline)? {
            ReadOutcome::Data(bytes) => {
                let (text, errors) = self.decoder.feed(&bytes);
                for err in errors {
                    tracing::warn!(?err, "decode error recovered with replacement character");
                }
                self.buffer.push_str(&text);
                Ok(ReadMoreOutcome::GotBytes)
            }
            ReadOutcome::Timeout => Ok(ReadMoreOutcome::TimedOut),
            ReadOutcome::Eof => Ok(ReadMoreOutcome::Eof),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::MockByteSource;
    use crate::terminfo_source::StaticTerminfo;

    fn terminal(chunks: Vec<Vec<u8>>) -> Terminal<MockByteSource> {
        Terminal::new(
            MockByteSource::new(chunks),
            &StaticTerminfo::xterm_like(),
            TerminalOptions::default(),
        )
    }

    #[test]
    fn plain_text_round_trips() {
        let mut term = terminal(vec![b"a".to_vec()]);
        let k = term.inkey(Some(Duration::from_millis(10))).unwrap();
        assert_eq!(k.raw_text(), "a");
        assert!(!k.is_sequence());
    }

    #[test]
    fn known_sequence_resolves_without_waiting_for_escdelay() {
        let mut term = terminal(vec![b"\x1b[A".to_vec()]);
        let k = term.inkey(Some(Duration::from_millis(10))).unwrap();
        assert_eq!(k.name(), Some("KEY_UP"));
    }

    #[test]
    fn bare_esc_emits_as_key_escape_after_escdelay_expires() {
        let mut term = terminal(vec![b"\x1b".to_vec()]);
        let k = term.inkey(Some(Duration::from_millis(200))).unwrap();
        assert_eq!(k.raw_text(), "\x1b");
        assert_eq!(k.name(), Some("KEY_ESCAPE"));
        assert!(k.is_sequence());
    }

    #[test]
    fn zero_timeout_with_no_bytes_returns_empty_keystroke() {
        let mut term = terminal(vec![]);
        let k = term.inkey(Some(Duration::ZERO)).unwrap();
        assert!(k.is_empty_keystroke());
    }

    #[test]
    fn ungetch_is_consumed_before_new_reads() {
        let mut term = terminal(vec![]);
        term.ungetch("ab");
        let k1 = term.inkey(Some(Duration::from_millis(10))).unwrap();
        let k2 = term.inkey(Some(Duration::from_millis(10))).unwrap();
        assert_eq!(format!("{k1}{k2}"), "ab");
    }

    #[test]
    fn flushinp_is_idempotent() {
        let mut term = terminal(vec![]);
        term.ungetch("x");
        term.flushinp();
        term.flushinp();
        let k = term.inkey(Some(Duration::ZERO)).unwrap();
        assert!(k.is_empty_keystroke());
    }

    #[test]
    fn resize_event_updates_cached_window_size() {
        let mut term = terminal(vec![b"\x1b[48;24;80;480;800t".to_vec()]);
        let k = term.inkey(Some(Duration::from_millis(10))).unwrap();
        assert!(matches!(k.payload(), Some(EventPayload::Resize { rows: 24, cols: 80 })));
        assert_eq!(term.window_size(), Some((24, 80)));
    }

    #[test]
    fn device_attributes_are_cached_and_produce_no_keystroke() {
        let mut term = terminal(vec![b"\x1b[?62;1c".to_vec(), b"a".to_vec()]);
        let k = term.inkey(Some(Duration::from_millis(10))).unwrap();
        assert_eq!(k.raw_text(), "a");
        assert!(term.capability_cache().get(crate::capability_query::QueryKind::Primary).is_some());
    }

    #[test]
    fn device_attributes_reply_split_across_reads_waits_instead_of_emitting_bare_esc() {
        let mut term = terminal(vec![b"\x1b[?62;1".to_vec(), b"c".to_vec(), b"a".to_vec()]);
        let k = term.inkey(Some(Duration::from_millis(30))).unwrap();
        assert_eq!(k.raw_text(), "a");
        assert!(term.capability_cache().get(crate::capability_query::QueryKind::Primary).is_some());
    }
}
