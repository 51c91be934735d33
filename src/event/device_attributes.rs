// Licensed under the Apache License, Version 2.0.

//! Device attribute responses (matcher 10, `spec.md` §4.4.10): primary/secondary/tertiary
//! DA (`CSI c`, `CSI > c`, `CSI = c` request forms answered with `CSI ? Ps ; ... c`,
//! `CSI > Ps ; Ps ; Ps c`, `DCS ! | ... ST`), plus the cell-pixel-size report
//! (`CSI 6 ; h ; w t`). None of these produce a user-visible keystroke: they're routed to
//! [`crate::capability_query`]'s cache and otherwise consumed silently.
//!
//! Grounded on the device-attribute routing in `core/ansi/vt_100_terminal_input_parser/
//! router.rs`, kept as a standalone function (not part of [`super::try_all`]) since its
//! return shape — consumed bytes with no keystroke — differs from every other matcher.

use crate::capability_query::CapabilityReport;

/// Outcome of a device-attributes match attempt, separate from [`super::MatchOutcome`]
/// since there's no keystroke to report.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceAttrOutcome {
    NoMatch,
    Incomplete,
    Matched { report: CapabilityReport, consumed: usize },
}

const DA1_PREFIX: &[u8] = b"\x1b[?";
const DA2_PREFIX: &[u8] = b"\x1b[>";
const DA3_PREFIX: &[u8] = b"\x1bP!|";
const DA3_TERM: &[u8] = b"\x1b\\";
const CELL_SIZE_PREFIX: &[u8] = b"\x1b[6;";

pub fn try_match(buf: &[u8]) -> DeviceAttrOutcome {
    if let Some(outcome) = try_da1(buf) {
        return outcome;
    }
    if let Some(outcome) = try_da2(buf) {
        return outcome;
    }
    if let Some(outcome) = try_da3(buf) {
        return outcome;
    }
    if let Some(outcome) = try_cell_size(buf) {
        return outcome;
    }
    DeviceAttrOutcome::NoMatch
}

/// `CSI ? Ps ; Ps ... c` — primary device attributes.
fn try_da1(buf: &[u8]) -> Option<DeviceAttrOutcome> {
    if !buf.starts_with(DA1_PREFIX) {
        return if DA1_PREFIX.starts_with(buf) { Some(DeviceAttrOutcome::Incomplete) } else { None };
    }
    let body = &buf[DA1_PREFIX.len()..];
    let term_pos = body.iter().position(|&b| b == b'c')?;
    let params_str = std::str::from_utf8(&body[..term_pos]).ok()?;
    let params: Option<Vec<u32>> = params_str.split(';').map(|s| s.parse().ok()).collect();
    let params = params?;
    let consumed = DA1_PREFIX.len() + term_pos + 1;
    Some(DeviceAttrOutcome::Matched { report: CapabilityReport::Primary(params), consumed })
}

/// `CSI > Ps ; Ps ; Ps c` — secondary device attributes (terminal identification code,
/// firmware version, cartridge number).
fn try_da2(buf: &[u8]) -> Option<DeviceAttrOutcome> {
    if !buf.starts_with(DA2_PREFIX) {
        return if DA2_PREFIX.starts_with(buf) { Some(DeviceAttrOutcome::Incomplete) } else { None };
    }
    let body = &buf[DA2_PREFIX.len()..];
    let term_pos = body.iter().position(|&b| b == b'c')?;
    let params_str = std::str::from_utf8(&body[..term_pos]).ok()?;
    let params: Option<Vec<u32>> = params_str.split(';').map(|s| s.parse().ok()).collect();
    let params = params?;
    let consumed = DA2_PREFIX.len() + term_pos + 1;
    Some(DeviceAttrOutcome::Matched { report: CapabilityReport::Secondary(params), consumed })
}

/// `DCS ! | ... ST` — tertiary device attributes (unit ID string).
fn try_da3(buf: &[u8]) -> Option<DeviceAttrOutcome> {
    if !buf.starts_with(DA3_PREFIX) {
        return if DA3_PREFIX.starts_with(buf) { Some(DeviceAttrOutcome::Incomplete) } else { None };
    }
    let body = &buf[DA3_PREFIX.len()..];
    let term_pos = find_subslice(body, DA3_TERM)?;
    let unit_id = String::from_utf8_lossy(&body[..term_pos]).into_owned();
    let consumed = DA3_PREFIX.len() + term_pos + DA3_TERM.len();
    Some(DeviceAttrOutcome::Matched { report: CapabilityReport::Tertiary(unit_id), consumed })
}

/// `CSI 6 ; h ; w t` — text-area size in pixels, reported in response to a cell-size
/// query (`spec.md` §6 "Capability queries").
fn try_cell_size(buf: &[u8]) -> Option<DeviceAttrOutcome> {
    if !buf.starts_with(CELL_SIZE_PREFIX) {
        return if CELL_SIZE_PREFIX.starts_with(buf) { Some(DeviceAttrOutcome::Incomplete) } else { None };
    }
    let body = &buf[CELL_SIZE_PREFIX.len()..];
    let term_pos = body.iter().position(|&b| b == b't')?;
    let params_str = std::str::from_utf8(&body[..term_pos]).ok()?;
    let mut parts = params_str.split(';');
    let (Some(h_s), Some(w_s)) = (parts.next(), parts.next()) else {
        return Some(DeviceAttrOutcome::NoMatch);
    };
    let (Ok(height_px), Ok(width_px)) = (h_s.parse::<u32>(), w_s.parse::<u32>()) else {
        return Some(DeviceAttrOutcome::NoMatch);
    };
    let consumed = CELL_SIZE_PREFIX.len() + term_pos + 1;
    Some(DeviceAttrOutcome::Matched {
        report: CapabilityReport::CellSizePixels { height_px, width_px },
        consumed,
    })
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_device_attributes_parses_params() {
        let buf = b"\x1b[?62;1;2c";
        match try_match(buf) {
            DeviceAttrOutcome::Matched { report, consumed } => {
                assert_eq!(consumed, buf.len());
                assert_eq!(report, CapabilityReport::Primary(vec![62, 1, 2]));
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn secondary_device_attributes_parses_params() {
        let buf = b"\x1b[>1;10;0c";
        match try_match(buf) {
            DeviceAttrOutcome::Matched { report, .. } => {
                assert_eq!(report, CapabilityReport::Secondary(vec![1, 10, 0]));
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn cell_size_report_parses_pixel_dimensions() {
        let buf = b"\x1b[6;16;8t";
        match try_match(buf) {
            DeviceAttrOutcome::Matched { report, consumed } => {
                assert_eq!(consumed, buf.len());
                assert_eq!(
                    report,
                    CapabilityReport::CellSizePixels { height_px: 16, width_px: 8 }
                );
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn incomplete_without_terminator() {
        assert_eq!(try_match(b"\x1b[?62;1"), DeviceAttrOutcome::Incomplete);
    }

    #[test]
    fn tertiary_device_attributes_parses_unit_id() {
        let buf = b"\x1bP!|00000000\x1b\\";
        match try_match(buf) {
            DeviceAttrOutcome::Matched { report, consumed } => {
                assert_eq!(consumed, buf.len());
                assert_eq!(report, CapabilityReport::Tertiary("00000000".to_string()));
            }
            other => panic!("expected Matched, got {other:?}"),
        }
    }
}
