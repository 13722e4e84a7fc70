// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write VT100 escape sequences to any `impl Write`.
// No state, no decisions about when to emit. The renderer decides what
// goes into a frame; this module only knows the bytes.
//
// All cursor positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (ANSI CUP uses 1-based coordinates).
use std::io::{self, Write};

/// Column/row count used to push the cursor against the bottom-right
/// corner. Terminals clamp CUF/CUD at the screen edge, so any value larger
/// than a real screen works.
pub const FAR_EDGE: u16 = 999;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using the CUP (Cursor Position) sequence.
///
/// Our coordinates are 0-indexed; ANSI CUP is 1-indexed.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Move the cursor to the top-left corner (CUP with no parameters).
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

/// Move the cursor `n` columns right (CUF). Stops at the right margin.
#[inline]
pub fn cursor_forward(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}C")
}

/// Move the cursor `n` rows down (CUD). Stops at the bottom margin.
#[inline]
pub fn cursor_down(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}B")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

/// Ask the terminal to report the cursor position (DSR 6).
///
/// The reply arrives on input as `ESC [ row ; col R`.
#[inline]
pub fn request_cursor_position(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[6n")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Erase from the cursor to the end of the line (EL 0).
#[inline]
pub fn erase_line(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ──────────────────────────────────────────────────────

    #[test]
    fn cursor_to_origin() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
    }

    #[test]
    fn cursor_to_is_row_then_column() {
        assert_eq!(emit(|w| cursor_to(w, 79, 23)), "\x1b[24;80H");
    }

    #[test]
    fn cursor_to_max_does_not_overflow() {
        assert_eq!(
            emit(|w| cursor_to(w, u16::MAX, u16::MAX)),
            "\x1b[65536;65536H"
        );
    }

    #[test]
    fn cursor_home_sequence() {
        assert_eq!(emit(|w| cursor_home(w)), "\x1b[H");
    }

    #[test]
    fn cursor_forward_and_down() {
        assert_eq!(emit(|w| cursor_forward(w, FAR_EDGE)), "\x1b[999C");
        assert_eq!(emit(|w| cursor_down(w, FAR_EDGE)), "\x1b[999B");
    }

    #[test]
    fn cursor_visibility() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    #[test]
    fn cursor_position_request() {
        assert_eq!(emit(|w| request_cursor_position(w)), "\x1b[6n");
    }

    // ── Screen ──────────────────────────────────────────────────────

    #[test]
    fn clear_screen_sequence() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J");
    }

    #[test]
    fn erase_line_sequence() {
        assert_eq!(emit(|w| erase_line(w)), "\x1b[K");
    }
}
