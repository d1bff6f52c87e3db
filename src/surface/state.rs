//! Flat state snapshots.
//!
//! A snapshot is one line per widget holding a value:
//!
//! ```text
//! <widget index> <csv value>
//! ```
//!
//! List values join their elements with commas; scalar fields decode
//! back to typed values where they parse as JSON numbers, booleans, or
//! `null`. Restore is tolerant: malformed lines and unknown indices are
//! skipped and counted, never fatal, since snapshots travel through
//! hand-edited session files.

use thiserror::Error;

use crate::surface::ControlSurface;
use crate::value::{from_csv, to_csv, Value};
use crate::widget::{SyncFlags, Widget, WidgetId};

/// A snapshot line failed to parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// The line has no space-separated value field.
    #[error("line {line}: missing value field")]
    MissingValue {
        /// 1-based line number.
        line: usize,
    },
    /// The index field is not a widget index.
    #[error("line {line}: invalid widget index `{index}`")]
    BadIndex {
        /// 1-based line number.
        line: usize,
        /// The offending index field.
        index: String,
    },
}

/// Outcome of a [`restore`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreStats {
    /// Lines applied to a widget.
    pub applied: usize,
    /// Lines skipped: malformed, or targeting an unknown widget.
    pub skipped: usize,
}

/// Serialize every widget value on the surface, one line each.
///
/// Widgets without a value are omitted; restoring the result touches
/// only the widgets the snapshot names.
pub fn snapshot(surface: &ControlSurface) -> String {
    let mut lines = Vec::new();
    for (id, widget) in surface.iter() {
        if let Some(value) = widget.current_value() {
            lines.push(format!("{} {}", id.0, to_csv(value)));
        }
    }
    lines.join("\n")
}

/// Parse one snapshot line into a widget id and decoded value.
///
/// The value field is everything after the first space, so values
/// containing spaces survive.
pub fn parse_snapshot_line(line_no: usize, line: &str) -> Result<(WidgetId, Value), StateError> {
    let (index, rest) = line
        .split_once(' ')
        .ok_or(StateError::MissingValue { line: line_no })?;
    let id: u16 = index.trim().parse().map_err(|_| StateError::BadIndex {
        line: line_no,
        index: index.to_string(),
    })?;
    Ok((WidgetId::new(id), from_csv(rest)))
}

/// Apply a snapshot to the surface's widgets.
///
/// Each decoded value goes through the target widget's value write with
/// `flags`, so restored values re-resolve against entries and propagate
/// the way the caller asks. Blank lines are ignored.
pub fn restore(surface: &mut ControlSurface, text: &str, flags: SyncFlags) -> RestoreStats {
    let mut stats = RestoreStats::default();
    for (line_index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = line_index + 1;
        match parse_snapshot_line(line_no, line) {
            Ok((id, value)) => match surface.widget_mut(id) {
                Some(widget) => {
                    widget.set_value(value, flags);
                    stats.applied += 1;
                }
                None => {
                    log::warn!("state line {line_no} targets unknown widget {}", id.0);
                    stats.skipped += 1;
                }
            },
            Err(err) => {
                log::warn!("skipping state line: {err}");
                stats.skipped += 1;
            }
        }
    }
    stats
}
