// Licensed under the Apache License, Version 2.0.

//! Error taxonomy for the decoder.
//!
//! Per the error handling design: [`DecodeError`] covers failures the resolver and its
//! matchers can observe (these are all recoverable — see `spec.md` §7, nothing here is
//! ever raised, only returned), while [`ReadError`] covers I/O failures surfaced from the
//! byte source, which the read loop propagates to the caller as-is.

use miette::Diagnostic;
use thiserror::Error;

/// Recoverable decode-time conditions. The resolver never returns these as failures of
/// its own; matchers use them internally to decide whether to fall through.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Bytes did not form a valid codepoint in the active encoding. The caller-visible
    /// behavior is a replacement-character text keystroke plus a one-byte advance; this
    /// variant exists for logging, not for propagation.
    #[error("invalid byte sequence at offset {offset}")]
    InvalidEncoding { offset: usize },
}

/// I/O and setup failures from the byte source or terminfo lookup. These propagate to
/// the caller of [`crate::Terminal::inkey`] directly.
#[derive(Debug, Error, Diagnostic)]
pub enum ReadError {
    #[error("byte source I/O error")]
    Io(#[from] std::io::Error),

    #[error("terminfo lookup failed: {0}")]
    Terminfo(String),
}
