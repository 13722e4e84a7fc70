// SPDX-License-Identifier: MIT
//
// Window geometry discovery.
//
// Two strategies. The fast path asks the OS (`TIOCGWINSZ`). Not every
// terminal answers that, and some answer with zero columns, so the
// portable path pushes the cursor into the bottom-right corner and asks
// the terminal where it ended up. The reply, `ESC [ rows ; cols R`, is
// read one byte at a time into a small bounded buffer.

use tracing::debug;

use crate::abuf::AppendBuffer;
use crate::ansi;
use crate::error::{Result, TermError};
use crate::tty::Tty;

/// Most bytes the cursor-position probe will read before giving up.
pub const MAX_REPORT_LEN: usize = 31;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    /// Whether both dimensions are non-zero.
    #[inline]
    #[must_use]
    pub const fn is_usable(self) -> bool {
        self.cols > 0 && self.rows > 0
    }
}

// ─── Probing ────────────────────────────────────────────────────────────────

/// Determine the terminal size.
///
/// Uses the OS query when it succeeds with non-zero dimensions, otherwise
/// falls back to [`cursor_position`] after moving the cursor as far right
/// and down as it will go.
///
/// # Errors
///
/// [`TermError::GeometryProbe`] if the fallback's reply is malformed, or
/// the write error if the probe sequences cannot be sent.
pub fn probe_window_size(tty: &mut impl Tty) -> Result<Size> {
    match tty.window_size() {
        Ok(size) if size.is_usable() => {
            debug!(?size, "window size from ioctl");
            return Ok(size);
        }
        Ok(size) => debug!(?size, "ioctl reported an empty window, probing"),
        Err(err) => debug!(%err, "ioctl window size failed, probing"),
    }

    let mut ab = AppendBuffer::new();
    ansi::cursor_forward(&mut ab, ansi::FAR_EDGE).map_err(TermError::Write)?;
    ansi::cursor_down(&mut ab, ansi::FAR_EDGE).map_err(TermError::Write)?;
    ab.flush_to(tty)?;

    let size = cursor_position(tty)?;
    debug!(?size, "window size from cursor probe");
    Ok(size)
}

/// Ask the terminal where the cursor is, as a 1-indexed `Size`.
///
/// Reads at most [`MAX_REPORT_LEN`] bytes, stopping early at the `R`
/// terminator or at the first read that yields no byte. Whatever was
/// collected is then parsed.
///
/// # Errors
///
/// [`TermError::GeometryProbe`] if the collected bytes are not a
/// well-formed cursor report.
pub fn cursor_position(tty: &mut impl Tty) -> Result<Size> {
    let mut ab = AppendBuffer::new();
    ansi::request_cursor_position(&mut ab).map_err(TermError::Write)?;
    ab.flush_to(tty)?;

    let mut buf = [0u8; MAX_REPORT_LEN];
    let mut len = 0;
    while len < MAX_REPORT_LEN {
        match tty.read(&mut buf[len..=len]) {
            Ok(1) => {}
            _ => break,
        }
        if buf[len] == b'R' {
            break;
        }
        len += 1;
    }

    let report = &buf[..len];
    parse_cursor_report(report).ok_or_else(|| {
        TermError::geometry(format!(
            "malformed cursor position report {:?}",
            String::from_utf8_lossy(report)
        ))
    })
}

/// Parse the body of a cursor position report, `ESC [ rows ; cols`, with
/// the trailing `R` already stripped.
///
/// Returns `None` unless the prefix is present and both fields are
/// positive integers.
#[must_use]
pub fn parse_cursor_report(report: &[u8]) -> Option<Size> {
    let body = report.strip_prefix(b"\x1b[")?;
    let body = std::str::from_utf8(body).ok()?;
    let (rows, cols) = body.split_once(';')?;
    let size = Size {
        rows: rows.parse().ok()?,
        cols: cols.parse().ok()?,
    };
    size.is_usable().then_some(size)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
