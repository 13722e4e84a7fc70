//! Process-wide editor state.
//!
//! One `EditorState` is created at startup and passed by reference to every
//! component that needs it. Each field has exactly one writer:
//!
//! | Field       | Written by                       | When               |
//! |-------------|----------------------------------|--------------------|
//! | `terminal`  | `RawTerminal::enter` (original)  | once, at startup   |
//! | `size`      | `geometry::probe_window_size`    | once, at startup   |
//! | `cursor`    | the key handler                  | per keypress       |
//!
//! Dropping the state drops the raw-mode guard, which restores the
//! terminal.

use dive_term::Result;
use dive_term::geometry::{self, Size};
use dive_term::terminal::{RawTerminal, TerminalConfiguration};
use dive_term::tty::Tty;
use tracing::info;

use crate::position::Position;

/// Cursor, window size, and the terminal held in raw mode.
pub struct EditorState<T: Tty> {
    pub cursor: Position,
    size: Size,
    terminal: RawTerminal<T>,
}

impl<T: Tty> EditorState<T> {
    /// Put `tty` into raw mode and measure it.
    ///
    /// # Errors
    ///
    /// Any error from entering raw mode or probing the window size. If the
    /// probe fails the terminal has already been restored on return.
    pub fn init(tty: T) -> Result<Self> {
        let mut terminal = RawTerminal::enter(tty)?;
        let size = geometry::probe_window_size(terminal.tty_mut())?;
        info!(rows = size.rows, cols = size.cols, "editor initialised");

        Ok(Self {
            cursor: Position::ZERO,
            size,
            terminal,
        })
    }

    /// Window size, positive in both dimensions.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// The terminal settings captured before raw mode was entered.
    #[inline]
    #[must_use]
    pub const fn original_configuration(&self) -> &TerminalConfiguration {
        self.terminal.original()
    }

    /// Whether the terminal is still in raw mode.
    #[inline]
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.terminal.is_raw()
    }

    pub fn tty_mut(&mut self) -> &mut T {
        self.terminal.tty_mut()
    }

    /// Restore the original terminal settings now rather than on drop.
    ///
    /// # Errors
    ///
    /// `TermError::TerminalSet` if the settings cannot be applied.
    pub fn restore(&mut self) -> Result<()> {
        self.terminal.restore()
    }
}
