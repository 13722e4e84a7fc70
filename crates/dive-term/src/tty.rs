// SPDX-License-Identifier: MIT
//
// The terminal device seam.
//
// Safety: `StdTty` necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), and raw fd reads and writes. These are
// the standard POSIX interfaces for terminal control. Each unsafe block
// is a single libc call on a buffer we own.
#![allow(unsafe_code)]
//
// Raw `read(2)`/`write(2)` are used instead of `io::stdin()`/`io::stdout()`
// on purpose: std's stdout is line-buffered, which would split a frame into
// several writes, and std's stdin is buffered, which would swallow the
// terminal's cursor-position report before the prober sees it.

use std::io;

use crate::geometry::Size;
use crate::terminal::TerminalConfiguration;

/// Everything the editor needs from a terminal device.
///
/// Implemented by [`StdTty`] for the controlling terminal and by the
/// scripted `MockTty` in tests.
pub trait Tty {
    /// Snapshot the current line-discipline settings.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the device is not a terminal or the query fails.
    fn get_attr(&mut self) -> io::Result<TerminalConfiguration>;

    /// Apply line-discipline settings, discarding pending input.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the settings cannot be applied.
    fn set_attr(&mut self, config: &TerminalConfiguration) -> io::Result<()>;

    /// Ask the OS for the window size directly.
    ///
    /// A successful result may still carry zero dimensions; callers decide
    /// whether that is usable.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the query is unsupported.
    fn window_size(&mut self) -> io::Result<Size>;

    /// Read up to `buf.len()` bytes of input. `Ok(0)` means the raw-mode
    /// read timeout expired with nothing to read.
    ///
    /// # Errors
    ///
    /// Returns the OS error on a failed read.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Issue one write of `bytes`, returning how many were accepted.
    ///
    /// # Errors
    ///
    /// Returns the OS error on a failed write.
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize>;
}

/// The process's controlling terminal: input on stdin, output on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdTty;

impl StdTty {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Tty for StdTty {
    fn get_attr(&mut self) -> io::Result<TerminalConfiguration> {
        let mut termios: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &raw mut termios) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(TerminalConfiguration::from_termios(termios))
    }

    fn set_attr(&mut self, config: &TerminalConfiguration) -> io::Result<()> {
        let termios = config.as_termios();
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, termios) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn window_size(&mut self) -> io::Result<Size> {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        if unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };
        // Negative only on error; the conversion fails exactly then.
        usize::try_from(n).map_err(|_| io::Error::last_os_error())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let n = unsafe { libc::write(libc::STDOUT_FILENO, bytes.as_ptr().cast(), bytes.len()) };
        usize::try_from(n).map_err(|_| io::Error::last_os_error())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
