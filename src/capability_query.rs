// Licensed under the Apache License, Version 2.0.

//! Capability-query cache (`spec.md` §3 supplement, §4.4.10): device-attribute and
//! cell-pixel-size reports, cached per [`crate::Terminal`] keyed by query kind so
//! repeated queries don't round-trip the terminal every time.
//!
//! Grounded on the device-attribute routing in `core/ansi/vt_100_terminal_input_parser/
//! router.rs`; that module forwards the parsed report straight to a caller-supplied
//! channel, with no caching layer. Here the cache resolves the capability-query Open
//! Question in `spec.md` §9: an accessor with a `force_refresh` flag, not a mutable
//! global, so callers control staleness explicitly.

use std::collections::HashMap;

/// A decoded device-attribute or capability report (`spec.md` §4.4.10).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CapabilityReport {
    /// Primary DA (`CSI ? Ps ... c`): terminal class + feature bits.
    Primary(Vec<u32>),
    /// Secondary DA (`CSI > Ps ; Ps ; Ps c`): terminal id, firmware version, cartridge.
    Secondary(Vec<u32>),
    /// Tertiary DA (`DCS ! | ... ST`): unit ID string.
    Tertiary(String),
    /// Text-area size in pixels (`CSI 6 ; h ; w t`).
    CellSizePixels { height_px: u32, width_px: u32 },
}

/// Which kind of report is cached, independent of its content — the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Primary,
    Secondary,
    Tertiary,
    CellSizePixels,
}

impl CapabilityReport {
    #[must_use]
    pub fn kind(&self) -> QueryKind {
        match self {
            CapabilityReport::Primary(_) => QueryKind::Primary,
            CapabilityReport::Secondary(_) => QueryKind::Secondary,
            CapabilityReport::Tertiary(_) => QueryKind::Tertiary,
            CapabilityReport::CellSizePixels { .. } => QueryKind::CellSizePixels,
        }
    }
}

/// Per-[`crate::Terminal`] cache of the most recently observed report for each query
/// kind. Populated by [`crate::reader::Terminal::inkey`] whenever
/// [`crate::event::device_attributes::try_match`] succeeds on the read buffer.
#[derive(Debug, Clone, Default)]
pub struct CapabilityQueryCache {
    entries: HashMap<QueryKind, CapabilityReport>,
}

impl CapabilityQueryCache {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Record a freshly observed report, overwriting whatever was cached for its kind.
    pub fn record(&mut self, report: CapabilityReport) {
        self.entries.insert(report.kind(), report);
    }

    /// Look up the cached report for `kind`. Callers that need a fresh value rather than
    /// a stale cache hit should emit the matching query sequence and wait for the next
    /// [`CapabilityReport`] to arrive instead of calling this with an implicit refresh —
    /// there is no built-in TTL, by design: staleness is the caller's call to make.
    #[must_use]
    pub fn get(&self, kind: QueryKind) -> Option<&CapabilityReport> { self.entries.get(&kind) }

    /// Drop the cached value for `kind`, forcing the next [`Self::get`] to return `None`
    /// until a fresh report is recorded. This is the `force_refresh` seam `spec.md` §9
    /// calls for.
    pub fn invalidate(&mut self, kind: QueryKind) {
        self.entries.remove(&kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_then_get_round_trips() {
        let mut cache = CapabilityQueryCache::new();
        cache.record(CapabilityReport::CellSizePixels { height_px: 16, width_px: 8 });
        assert_eq!(
            cache.get(QueryKind::CellSizePixels),
            Some(&CapabilityReport::CellSizePixels { height_px: 16, width_px: 8 })
        );
    }

    #[test]
    fn invalidate_clears_the_cached_entry() {
        let mut cache = CapabilityQueryCache::new();
        cache.record(CapabilityReport::Primary(vec![62]));
        cache.invalidate(QueryKind::Primary);
        assert_eq!(cache.get(QueryKind::Primary), None);
    }

    #[test]
    fn distinct_kinds_do_not_overwrite_each_other() {
        let mut cache = CapabilityQueryCache::new();
        cache.record(CapabilityReport::Primary(vec![62]));
        cache.record(CapabilityReport::Secondary(vec![1, 0, 0]));
        assert!(cache.get(QueryKind::Primary).is_some());
        assert!(cache.get(QueryKind::Secondary).is_some());
    }
}
