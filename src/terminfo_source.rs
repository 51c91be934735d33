// Licensed under the Apache License, Version 2.0.

//! The terminfo lookup collaborator (`spec.md` §6 "Terminfo lookup"): `capname ->
//! string`, possibly empty, returning the active terminal's definition. Kept as a
//! narrow trait so the sequence table builder never depends on a concrete terminfo
//! backend.

use crate::error::ReadError;

/// `capname -> Option<raw bytes>`. `None`/empty means the active terminal has no
/// definition for that capability — the builder treats that as "skip, rely on the
/// literal mixin instead".
pub trait TerminfoSource {
    fn lookup(&self, capname: &str) -> Option<Vec<u8>>;
}

/// Real terminfo-backed source, wrapping the `terminfo` crate's database parser.
pub struct SystemTerminfo {
    db: terminfo::Database,
}

impl SystemTerminfo {
    /// Load the terminfo database for `$TERM` (or the given name).
    pub fn from_env() -> Result<Self, ReadError> {
        let db = terminfo::Database::from_env().map_err(|e| ReadError::Terminfo(e.to_string()))?;
        Ok(Self { db })
    }

    pub fn from_name(name: &str) -> Result<Self, ReadError> {
        let db =
            terminfo::Database::from_name(name).map_err(|e| ReadError::Terminfo(e.to_string()))?;
        Ok(Self { db })
    }
}

impl TerminfoSource for SystemTerminfo {
    fn lookup(&self, capname: &str) -> Option<Vec<u8>> {
        use terminfo::capability::Value;
        self.db.raw(capname).and_then(|cap| match cap.value() {
            Value::String(bytes) => Some(bytes.to_vec()),
            _ => None,
        })
    }
}

/// A small, hand-populated terminfo stand-in covering the capabilities an xterm-family
/// terminal defines, for tests and as a fallback when no terminfo database is available
/// (e.g. a minimal container image). Grounded on the literal sequences xterm actually
/// reports for these capabilities.
pub struct StaticTerminfo {
    entries: &'static [(&'static str, &'static [u8])],
}

impl StaticTerminfo {
    #[must_use]
    pub fn xterm_like() -> Self {
        Self {
            entries: &[
                ("kcuu1", b"\x1b[A"),
                ("kcud1", b"\x1b[B"),
                ("kcuf1", b"\x1b[C"),
                ("kcub1", b"\x1b[D"),
                ("khome", b"\x1b[H"),
                ("kend", b"\x1b[F"),
                ("kpp", b"\x1b[5~"),
                ("knp", b"\x1b[6~"),
                ("kich1", b"\x1b[2~"),
                ("kdch1", b"\x1b[3~"),
                ("kbs", b"\x7f"),
                ("kcbt", b"\x1b[Z"),
                ("kf1", b"\x1bOP"),
                ("kf2", b"\x1bOQ"),
                ("kf3", b"\x1bOR"),
                ("kf4", b"\x1bOS"),
                ("kf5", b"\x1b[15~"),
                ("kf6", b"\x1b[17~"),
                ("kf7", b"\x1b[18~"),
                ("kf8", b"\x1b[19~"),
                ("kf9", b"\x1b[20~"),
                ("kf10", b"\x1b[21~"),
                ("kf11", b"\x1b[23~"),
                ("kf12", b"\x1b[24~"),
            ],
        }
    }
}

impl TerminfoSource for StaticTerminfo {
    fn lookup(&self, capname: &str) -> Option<Vec<u8>> {
        self.entries.iter().find(|(name, _)| *name == capname).map(|(_, seq)| seq.to_vec())
    }
}
