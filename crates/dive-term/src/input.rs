// SPDX-License-Identifier: MIT
//
// Key input — one byte at a time from a raw-mode terminal.
//
// With VMIN=0 and VTIME=1 a read returns after at most 100ms, possibly
// with nothing. `read_key` hides that polling: it keeps reading until a
// byte arrives, and only a real read failure escapes.
//
// Decoding is deliberately shallow. A single byte maps to a key code and
// modifiers; escape sequences (arrows, function keys) arrive as separate
// bytes starting with Escape and are left for a richer keymap to assemble.

use std::io;

use bitflags::bitflags;

use crate::error::{Result, TermError};
use crate::tty::Tty;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character. For control chords this is the lowercase letter.
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    /// A byte with no other meaning (NUL, the remaining C0 controls, or a
    /// byte of a multi-byte sequence).
    Byte(u8),
}

bitflags! {
    /// Keyboard modifier flags.
    ///
    /// Only Ctrl is recoverable from a single raw byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const CTRL = 0b0000_0100;
    }
}

impl KeyEvent {
    /// A key with no modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Ctrl plus the given ASCII letter, e.g. `KeyEvent::ctrl('q')`.
    #[must_use]
    pub const fn ctrl(letter: char) -> Self {
        Self {
            code: KeyCode::Char(letter.to_ascii_lowercase()),
            modifiers: Modifiers::CTRL,
        }
    }

    /// Decode one raw byte.
    ///
    /// Tab, Enter and Escape are checked before the control range because
    /// they share bytes with Ctrl-I, Ctrl-M and Ctrl-[.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            b'\t' => Self::plain(KeyCode::Tab),
            b'\r' => Self::plain(KeyCode::Enter),
            0x1B => Self::plain(KeyCode::Escape),
            0x7F => Self::plain(KeyCode::Backspace),
            b @ 0x01..=0x1A => Self::ctrl((b + b'a' - 1) as char),
            b @ 0x20..=0x7E => Self::plain(KeyCode::Char(b as char)),
            b => Self::plain(KeyCode::Byte(b)),
        }
    }
}

/// The byte a terminal sends for Ctrl plus `key`: the low five bits.
#[inline]
#[must_use]
pub const fn ctrl_key(key: u8) -> u8 {
    key & 0x1f
}

// ─── Reading ────────────────────────────────────────────────────────────────

/// Block until one byte of input is available and return it.
///
/// Reads that time out (zero bytes, `EAGAIN`) or are interrupted by a
/// signal are retried.
///
/// # Errors
///
/// [`TermError::Read`] for any other read failure.
pub fn read_key(tty: &mut impl Tty) -> Result<u8> {
    let mut byte = [0u8; 1];
    loop {
        match tty.read(&mut byte) {
            Ok(1) => return Ok(byte[0]),
            Ok(_) => {}
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) => {}
            Err(err) => return Err(TermError::Read(err)),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
