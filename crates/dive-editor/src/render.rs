//! Screen renderer — one frame, one write.
//!
//! A frame is built into a fresh [`AppendBuffer`] in this order:
//!
//! 1. hide the cursor
//! 2. home the cursor
//! 3. every row: row content, erase to end of line, `\r\n` except after
//!    the last row (a newline there would scroll the screen)
//! 4. place the cursor at the editor cursor
//! 5. home the cursor
//! 6. show the cursor
//!
//! and handed to the terminal in a single write. Nothing is written
//! directly, so a partially drawn frame is never visible.
//!
//! What goes *in* a row is up to a [`RowRenderer`]. The renderer itself only
//! owns the framing: erase-line, line breaks, and cursor handling.

use std::io::{self, Write};

use dive_term::abuf::AppendBuffer;
use dive_term::ansi;
use dive_term::geometry::Size;
use dive_term::tty::Tty;
use dive_term::{Result, TermError};
use tracing::trace;

use crate::config::EditorConfig;
use crate::position::Position;
use crate::state::EditorState;

// ---------------------------------------------------------------------------
// Row content
// ---------------------------------------------------------------------------

/// Draws the content of one screen row.
///
/// Implementations must not emit line breaks or erase sequences; the frame
/// builder adds those.
pub trait RowRenderer {
    /// Append the content of row `row` (0-indexed) of a `size` screen.
    ///
    /// # Errors
    ///
    /// Propagates errors from writing into `ab`.
    fn draw_row(&self, ab: &mut AppendBuffer, row: u16, size: Size) -> io::Result<()>;
}

/// The empty-editor screen: a tilde on every row and a centered banner a
/// third of the way down.
#[derive(Debug, Clone)]
pub struct WelcomeScreen {
    banner: String,
}

impl WelcomeScreen {
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            banner: config.banner(),
        }
    }

    /// Row that carries the banner.
    #[inline]
    #[must_use]
    pub const fn banner_row(size: Size) -> u16 {
        size.rows / 3
    }
}

impl RowRenderer for WelcomeScreen {
    fn draw_row(&self, ab: &mut AppendBuffer, row: u16, size: Size) -> io::Result<()> {
        if row == Self::banner_row(size) {
            draw_banner(ab, self.banner.as_bytes(), size.cols);
        } else {
            ab.append(b"~");
        }
        Ok(())
    }
}

/// Center `banner` in `cols` columns, truncating it if it does not fit.
///
/// The left padding starts with the row's tilde. A truncated banner fills
/// the row exactly and gets no padding at all.
fn draw_banner(ab: &mut AppendBuffer, banner: &[u8], cols: u16) {
    let cols = usize::from(cols);
    let len = banner.len().min(cols);
    let mut padding = (cols - len) / 2;
    if padding > 0 {
        ab.append(b"~");
        padding -= 1;
    }
    for _ in 0..padding {
        ab.append(b" ");
    }
    ab.append(&banner[..len]);
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Append every row of a `size` screen to `ab`.
///
/// # Errors
///
/// Propagates errors from `rows` or from writing into `ab`.
pub fn draw_rows(ab: &mut AppendBuffer, size: Size, rows: &impl RowRenderer) -> io::Result<()> {
    for y in 0..size.rows {
        rows.draw_row(ab, y, size)?;
        ansi::erase_line(ab)?;
        if y + 1 < size.rows {
            ab.write_all(b"\r\n")?;
        }
    }
    Ok(())
}

/// Build a complete frame without writing it.
///
/// # Errors
///
/// Propagates errors from `rows` or from writing into the buffer.
pub fn build_frame(
    size: Size,
    cursor: Position,
    rows: &impl RowRenderer,
) -> io::Result<AppendBuffer> {
    let mut ab = AppendBuffer::new();

    ansi::cursor_hide(&mut ab)?;
    ansi::cursor_home(&mut ab)?;
    draw_rows(&mut ab, size, rows)?;
    ansi::cursor_to(&mut ab, cursor.col, cursor.row)?;
    ansi::cursor_home(&mut ab)?;
    ansi::cursor_show(&mut ab)?;

    Ok(ab)
}

/// Redraw the whole screen from `state`.
///
/// # Errors
///
/// `TermError::Write` or `TermError::ShortWrite` if the frame cannot be
/// written in full.
pub fn refresh_screen<T: Tty>(state: &mut EditorState<T>, rows: &impl RowRenderer) -> Result<()> {
    let frame = build_frame(state.size(), state.cursor, rows).map_err(TermError::Write)?;
    trace!(bytes = frame.len(), "flushing frame");
    frame.flush_to(state.tty_mut())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SIZE: Size = Size { cols: 80, rows: 24 };

    fn welcome() -> WelcomeScreen {
        WelcomeScreen::new(&EditorConfig::default())
    }

    fn rows_of(size: Size) -> Vec<Vec<u8>> {
        let mut ab = AppendBuffer::new();
        draw_rows(&mut ab, size, &welcome()).unwrap();
        ab.as_bytes()
            .split(|&b| b == b'\n')
            .map(<[u8]>::to_vec)
            .collect()
    }

    // -- Rows ---------------------------------------------------------------

    #[test]
    fn plain_rows_are_a_tilde_and_erase() {
        let rows = rows_of(SIZE);
        assert_eq!(rows.len(), 24);
        for (y, row) in rows.iter().enumerate() {
            if y == 8 {
                continue;
            }
            let expected: &[u8] = if y == 23 { b"~\x1b[K" } else { b"~\x1b[K\r" };
            assert_eq!(row.as_slice(), expected, "row {y}");
        }
    }

    #[test]
    fn banner_row_is_centered() {
        let rows = rows_of(SIZE);
        let banner = "DIVE EDITOR -- VERSION 0.0.1";
        let padding = (80 - banner.len()) / 2;
        let expected = format!("~{}{banner}\x1b[K\r", " ".repeat(padding - 1));
        assert_eq!(String::from_utf8_lossy(&rows[8]), expected);
    }

    #[test]
    fn banner_row_is_a_third_down() {
        assert_eq!(WelcomeScreen::banner_row(SIZE), 8);
        assert_eq!(WelcomeScreen::banner_row(Size { cols: 80, rows: 2 }), 0);
    }

    #[test]
    fn only_last_row_lacks_line_break() {
        let mut ab = AppendBuffer::new();
        draw_rows(&mut ab, SIZE, &welcome()).unwrap();
        let bytes = ab.as_bytes();
        assert_eq!(bytes.windows(2).filter(|w| *w == b"\r\n").count(), 23);
        assert!(bytes.ends_with(b"\x1b[K"));
    }

    #[test]
    fn narrow_screen_truncates_banner() {
        let size = Size { cols: 10, rows: 3 };
        let rows = rows_of(size);
        assert_eq!(rows[1].as_slice(), b"DIVE EDITO\x1b[K\r");
    }

    #[test]
    fn exact_width_banner_has_no_padding() {
        let banner_len = u16::try_from(welcome().banner.len()).unwrap();
        let size = Size {
            cols: banner_len,
            rows: 3,
        };
        let rows = rows_of(size);
        assert_eq!(
            String::from_utf8_lossy(&rows[1]),
            "DIVE EDITOR -- VERSION 0.0.1\x1b[K\r"
        );
    }

    #[test]
    fn one_column_of_slack_has_no_tilde() {
        let banner_len = u16::try_from(welcome().banner.len()).unwrap();
        let size = Size {
            cols: banner_len + 1,
            rows: 3,
        };
        let rows = rows_of(size);
        assert_eq!(
            String::from_utf8_lossy(&rows[1]),
            "DIVE EDITOR -- VERSION 0.0.1\x1b[K\r"
        );
    }

    #[test]
    fn two_columns_of_slack_is_a_lone_tilde() {
        let banner_len = u16::try_from(welcome().banner.len()).unwrap();
        let size = Size {
            cols: banner_len + 2,
            rows: 3,
        };
        let rows = rows_of(size);
        assert_eq!(
            String::from_utf8_lossy(&rows[1]),
            "~DIVE EDITOR -- VERSION 0.0.1\x1b[K\r"
        );
    }

    #[test]
    fn single_row_screen() {
        let size = Size { cols: 40, rows: 1 };
        let mut ab = AppendBuffer::new();
        draw_rows(&mut ab, size, &welcome()).unwrap();
        assert!(!ab.as_bytes().contains(&b'\n'));
        assert!(ab.as_bytes().ends_with(b"DIVE EDITOR -- VERSION 0.0.1\x1b[K"));
    }

    // -- Frame --------------------------------------------------------------

    #[test]
    fn frame_is_bracketed_by_cursor_sequences() {
        let frame = build_frame(SIZE, Position::ZERO, &welcome()).unwrap();
        let bytes = frame.as_bytes();
        assert!(bytes.starts_with(b"\x1b[?25l\x1b[H~"));
        assert!(bytes.ends_with(b"\x1b[K\x1b[1;1H\x1b[H\x1b[?25h"));
    }

    #[test]
    fn frame_places_cursor_one_indexed() {
        let frame = build_frame(SIZE, Position::new(4, 9), &welcome()).unwrap();
        assert!(frame.as_bytes().ends_with(b"\x1b[5;10H\x1b[H\x1b[?25h"));
    }

    struct Numbered;

    impl RowRenderer for Numbered {
        fn draw_row(&self, ab: &mut AppendBuffer, row: u16, _size: Size) -> io::Result<()> {
            write!(ab, "{row}")
        }
    }

    #[test]
    fn custom_row_renderer() {
        let frame = build_frame(Size { cols: 5, rows: 3 }, Position::ZERO, &Numbered).unwrap();
        assert_eq!(
            String::from_utf8_lossy(frame.as_bytes()),
            "\x1b[?25l\x1b[H0\x1b[K\r\n1\x1b[K\r\n2\x1b[K\x1b[1;1H\x1b[H\x1b[?25h"
        );
    }

    #[test]
    fn refresh_writes_one_frame_once() {
        use dive_term::mock::MockTty;

        let tty = MockTty::new();
        let handle = tty.handle();
        let mut state = EditorState::init(tty).unwrap();
        let before = handle.writes();

        refresh_screen(&mut state, &welcome()).unwrap();

        assert_eq!(handle.writes(), before + 1);
        let expected = build_frame(SIZE, Position::ZERO, &welcome()).unwrap();
        assert_eq!(handle.output(), expected.as_bytes());
    }
}
