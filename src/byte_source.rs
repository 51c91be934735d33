// Licensed under the Apache License, Version 2.0.

//! The byte source collaborator (`spec.md` §6 "Byte source"): `read(max_bytes, deadline)
//! → bytes|timeout|eof`. The core assumes cbreak semantics (returns as soon as *any*
//! data is available) and never sets up the TTY mode itself — that stays out of scope
//! per `spec.md` §1.
//!
//! Grounded on the RRT framework's poll-driven worker model
//! (`core::resilient_reactor_thread::{RRTWorker, RRTWaker}`) and `raw_mode_unix`'s use of
//! `rustix` for direct syscalls, generalized from an event-broadcasting background thread
//! into a single synchronous `read` call with an explicit deadline — this crate has no
//! internal thread (`spec.md` §5 "single-threaded, cooperative").

use std::time::Instant;

use crate::error::ReadError;

/// Outcome of one [`ByteSource::read`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// At least one byte was read.
    Data(Vec<u8>),
    /// `deadline` passed with nothing to read.
    Timeout,
    /// The underlying source reached end-of-file (e.g. stdin closed).
    Eof,
}

/// Abstract byte source (`spec.md` §6). A narrow seam so the resolver/read-loop tests
/// never need a real TTY.
pub trait ByteSource {
    /// Read up to `buf.len()` bytes, blocking until data arrives, `deadline` passes, or
    /// EOF. Must return as soon as any data is available — never wait to fill `buf`.
    fn read(&mut self, buf: &mut [u8], deadline: Instant) -> Result<ReadOutcome, ReadError>;
}

/// Default Unix byte source: `mio::Poll` over stdin for the wait, `rustix::io::read` for
/// the actual syscall once the fd is readable. Assumes the fd is already in cbreak/raw
/// mode — raw-mode setup is a separate, out-of-scope collaborator.
///
/// Unix-only by construction (`spec.md` §9 open question: a Windows console backend is
/// a distinct collaborator behind the same [`ByteSource`] trait, not built here).
#[cfg(unix)]
pub struct UnixByteSource {
    fd: std::os::unix::io::RawFd,
    poll: mio::Poll,
    events: mio::Events,
}

#[cfg(unix)]
impl UnixByteSource {
    const STDIN_TOKEN: mio::Token = mio::Token(0);

    /// Build a byte source over the given raw fd (typically stdin's).
    pub fn new(fd: std::os::unix::io::RawFd) -> Result<Self, ReadError> {
        let poll = mio::Poll::new().map_err(ReadError::Io)?;
        poll.registry()
            .register(&mut mio::unix::SourceFd(&fd), Self::STDIN_TOKEN, mio::Interest::READABLE)
            .map_err(ReadError::Io)?;
        Ok(Self { fd, poll, events: mio::Events::with_capacity(4) })
    }

    /// Convenience constructor over the process's stdin.
    pub fn stdin() -> Result<Self, ReadError> {
        use std::os::unix::io::AsRawFd;
        Self::new(std::io::stdin().as_raw_fd())
    }
}

#[cfg(unix)]
impl ByteSource for UnixByteSource {
    fn read(&mut self, buf: &mut [u8], deadline: Instant) -> Result<ReadOutcome, ReadError> {
        use std::os::unix::io::BorrowedFd;

        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(ReadOutcome::Timeout);
            }
            let remaining = deadline - now;
            match self.poll.poll(&mut self.events, Some(remaining)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReadError::Io(e)),
            }
            if self.events.is_empty() {
                return Ok(ReadOutcome::Timeout);
            }
            // SAFETY: `self.fd` is a valid, open file descriptor for the lifetime of
            // `self` (owned by the caller, e.g. `std::io::Stdin`); no other code in this
            // crate closes it.
            let borrowed = unsafe { BorrowedFd::borrow_raw(self.fd) };
            return match rustix::io::read(borrowed, buf) {
                Ok(0) => Ok(ReadOutcome::Eof),
                Ok(n) => Ok(ReadOutcome::Data(buf[..n].to_vec())),
                Err(e) if e == rustix::io::Errno::INTR || e == rustix::io::Errno::AGAIN => {
                    continue;
                }
                Err(e) => Err(ReadError::Io(e.into())),
            };
        }
    }
}

/// Scripted byte source for tests (`spec.md` §6 supplement, grounded on
/// `core::test_fixtures::input_device_fixtures::mock_input_device`): feeds pre-recorded
/// chunks, one per `read()` call, optionally reporting EOF once exhausted.
#[derive(Debug, Clone, Default)]
pub struct MockByteSource {
    chunks: std::collections::VecDeque<Vec<u8>>,
    eof_after_exhaustion: bool,
}

impl MockByteSource {
    #[must_use]
    pub fn new(chunks: Vec<Vec<u8>>) -> Self {
        Self { chunks: chunks.into(), eof_after_exhaustion: false }
    }

    #[must_use]
    pub fn with_eof(mut self) -> Self {
        self.eof_after_exhaustion = true;
        self
    }
}

impl ByteSource for MockByteSource {
    fn read(&mut self, buf: &mut [u8], _deadline: Instant) -> Result<ReadOutcome, ReadError> {
        match self.chunks.pop_front() {
            Some(chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                Ok(ReadOutcome::Data(buf[..n].to_vec()))
            }
            None if self.eof_after_exhaustion => Ok(ReadOutcome::Eof),
            None => Ok(ReadOutcome::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_source_yields_chunks_in_order() {
        let mut src = MockByteSource::new(vec![b"\x1b[A".to_vec(), b"a".to_vec()]);
        let mut buf = [0u8; 16];
        let deadline = Instant::now();
        assert_eq!(src.read(&mut buf, deadline).unwrap(), ReadOutcome::Data(b"\x1b[A".to_vec()));
        assert_eq!(src.read(&mut buf, deadline).unwrap(), ReadOutcome::Data(b"a".to_vec()));
        assert_eq!(src.read(&mut buf, deadline).unwrap(), ReadOutcome::Timeout);
    }

    #[test]
    fn mock_source_reports_eof_when_configured() {
        let mut src = MockByteSource::new(vec![b"x".to_vec()]).with_eof();
        let mut buf = [0u8; 16];
        let deadline = Instant::now();
        let _ = src.read(&mut buf, deadline).unwrap();
        assert_eq!(src.read(&mut buf, deadline).unwrap(), ReadOutcome::Eof);
    }
}
