// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode and RAII restoration.
//
// `RawTerminal` owns the terminal device for the lifetime of the editor.
// Entering captures the original line-discipline settings, derives the raw
// variant from them, and applies it. The guard exists before the raw
// settings are applied, so a failure partway through entry still restores.
// Leaving puts the original back, either explicitly through `restore` or
// implicitly on drop, which also covers early returns and panic unwinding.
//
// State machine: Uninitialized → enter → Raw → restore/drop → Restored.
// There is no way back to Raw without a fresh `enter`.

use std::fmt;

use tracing::{debug, warn};

use crate::abuf::AppendBuffer;
use crate::ansi;
use crate::error::{Result, TermError};
use crate::tty::Tty;

/// Minimum bytes a raw read waits for (VMIN). Zero lets reads time out.
pub const READ_MIN_BYTES: libc::cc_t = 0;

/// Raw read timeout in tenths of a second (VTIME). One tick is 100ms.
pub const READ_TIMEOUT_DECISECONDS: libc::cc_t = 1;

// ─── TerminalConfiguration ───────────────────────────────────────────────────

/// Opaque snapshot of the terminal's line-discipline settings.
#[derive(Clone, Copy)]
pub struct TerminalConfiguration(libc::termios);

impl TerminalConfiguration {
    /// Wrap a termios record read from the OS.
    #[must_use]
    pub const fn from_termios(termios: libc::termios) -> Self {
        Self(termios)
    }

    /// The underlying termios record.
    #[must_use]
    pub const fn as_termios(&self) -> &libc::termios {
        &self.0
    }

    /// Derive the raw-mode settings from these.
    ///
    /// Input side: no break signal, no CR→NL, no parity check, no 8th-bit
    /// strip, no XON/XOFF. Output side: no post-processing. Local side: no
    /// echo, no canonical lines, no extended input, no signal keys. Eight-bit
    /// characters. Reads return after [`READ_TIMEOUT_DECISECONDS`] even with
    /// nothing to read.
    #[must_use]
    pub fn make_raw(&self) -> Self {
        let mut raw = self.0;
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag = (raw.c_cflag & !libc::CSIZE) | libc::CS8;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        raw.c_cc[libc::VMIN] = READ_MIN_BYTES;
        raw.c_cc[libc::VTIME] = READ_TIMEOUT_DECISECONDS;
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn input_flags(&self) -> libc::tcflag_t {
        self.0.c_iflag
    }

    #[inline]
    #[must_use]
    pub const fn output_flags(&self) -> libc::tcflag_t {
        self.0.c_oflag
    }

    #[inline]
    #[must_use]
    pub const fn control_flags(&self) -> libc::tcflag_t {
        self.0.c_cflag
    }

    #[inline]
    #[must_use]
    pub const fn local_flags(&self) -> libc::tcflag_t {
        self.0.c_lflag
    }

    /// VMIN: bytes a read waits for before returning.
    #[inline]
    #[must_use]
    pub const fn min_bytes(&self) -> libc::cc_t {
        self.0.c_cc[libc::VMIN]
    }

    /// VTIME: read timeout in deciseconds.
    #[inline]
    #[must_use]
    pub const fn read_timeout(&self) -> libc::cc_t {
        self.0.c_cc[libc::VTIME]
    }
}

impl PartialEq for TerminalConfiguration {
    fn eq(&self, other: &Self) -> bool {
        self.0.c_iflag == other.0.c_iflag
            && self.0.c_oflag == other.0.c_oflag
            && self.0.c_cflag == other.0.c_cflag
            && self.0.c_lflag == other.0.c_lflag
            && self.0.c_cc == other.0.c_cc
    }
}

impl Eq for TerminalConfiguration {}

impl fmt::Debug for TerminalConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalConfiguration")
            .field("iflag", &format_args!("{:#x}", self.0.c_iflag))
            .field("oflag", &format_args!("{:#x}", self.0.c_oflag))
            .field("cflag", &format_args!("{:#x}", self.0.c_cflag))
            .field("lflag", &format_args!("{:#x}", self.0.c_lflag))
            .field("vmin", &self.min_bytes())
            .field("vtime", &self.read_timeout())
            .finish()
    }
}

// ─── RawTerminal ─────────────────────────────────────────────────────────────

/// A terminal held in raw mode, restored when dropped.
///
/// # Example
///
/// ```no_run
/// use dive_term::terminal::RawTerminal;
/// use dive_term::tty::StdTty;
///
/// let mut term = RawTerminal::enter(StdTty::new())?;
/// // ... render frames, read keys through term.tty_mut() ...
/// term.restore()?;
/// # Ok::<(), dive_term::TermError>(())
/// ```
pub struct RawTerminal<T: Tty> {
    tty: T,
    /// Captured once in `enter`, never written again.
    original: TerminalConfiguration,
    raw: bool,
}

impl<T: Tty> RawTerminal<T> {
    /// Put `tty` into raw mode.
    ///
    /// # Errors
    ///
    /// [`TermError::TerminalQuery`] if the current settings cannot be read,
    /// [`TermError::TerminalSet`] if the raw settings cannot be applied. In
    /// the latter case the original settings are restored before returning.
    pub fn enter(mut tty: T) -> Result<Self> {
        let original = tty.get_attr().map_err(TermError::TerminalQuery)?;
        let raw = original.make_raw();

        let mut term = Self {
            tty,
            original,
            raw: true,
        };
        term.tty.set_attr(&raw).map_err(TermError::TerminalSet)?;

        debug!(?original, "entered raw mode");
        Ok(term)
    }

    /// Put the original settings back. Idempotent.
    ///
    /// # Errors
    ///
    /// [`TermError::TerminalSet`] if the settings cannot be applied. The
    /// terminal is left marked raw so a later drop retries.
    pub fn restore(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.tty
            .set_attr(&self.original)
            .map_err(TermError::TerminalSet)?;
        self.raw = false;
        debug!("restored original terminal settings");
        Ok(())
    }

    /// Whether raw settings are currently in effect.
    #[inline]
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.raw
    }

    /// The settings captured on entry.
    #[inline]
    #[must_use]
    pub const fn original(&self) -> &TerminalConfiguration {
        &self.original
    }

    #[inline]
    pub fn tty_mut(&mut self) -> &mut T {
        &mut self.tty
    }
}

impl<T: Tty> Drop for RawTerminal<T> {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(%err, "failed to restore terminal on drop");
        }
    }
}

// ─── Screen wipe ─────────────────────────────────────────────────────────────

/// Clear the screen and home the cursor in a single write.
///
/// Used on the way out, both for a normal quit and after a fatal error.
///
/// # Errors
///
/// [`TermError::Write`] or [`TermError::ShortWrite`] if the write fails.
pub fn wipe_screen(tty: &mut impl Tty) -> Result<()> {
    let mut ab = AppendBuffer::new();
    ansi::clear_screen(&mut ab).map_err(TermError::Write)?;
    ansi::cursor_home(&mut ab).map_err(TermError::Write)?;
    ab.flush_to(tty)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
