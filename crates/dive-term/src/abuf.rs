// SPDX-License-Identifier: MIT
//
// Append buffer — one frame, one write.
//
// Every byte of a frame (escape sequences and text alike) is staged here
// and handed to the terminal in a single write call, so the user never
// sees a half-drawn screen. A buffer is created empty for each frame and
// consumed by `flush_to`; nothing carries over between frames.
//
// Growth is exact: each append reserves room for precisely the new bytes.
// If that reservation fails the bytes are dropped and the buffer keeps its
// previous contents. A frame missing a few bytes beats a crash, and an
// allocator that is out of memory will surface again on the next call.

use std::io::{self, Write};

use tracing::warn;

use crate::error::{Result, TermError};
use crate::tty::Tty;

/// A growable byte sequence holding one pending frame.
#[derive(Debug, Default)]
pub struct AppendBuffer {
    buf: Vec<u8>,
}

impl AppendBuffer {
    /// An empty buffer. Allocates nothing until the first append.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Append `bytes`, dropping them if the buffer cannot grow.
    pub fn append(&mut self, bytes: &[u8]) {
        if let Err(err) = self.try_append(bytes) {
            warn!(%err, dropped = bytes.len(), "append buffer growth failed");
        }
    }

    /// Append `bytes`, reporting a failed reservation.
    ///
    /// # Errors
    ///
    /// [`TermError::AllocationFailure`] if the buffer cannot grow. The
    /// contents are unchanged in that case.
    pub fn try_append(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.try_reserve_exact(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Number of bytes staged.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The staged bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Write the whole buffer to `tty` in one call and release it.
    ///
    /// An empty buffer issues no write.
    ///
    /// # Errors
    ///
    /// [`TermError::Write`] if the write fails, [`TermError::ShortWrite`] if
    /// the terminal accepts fewer bytes than were staged.
    pub fn flush_to(self, tty: &mut impl Tty) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let expected = self.buf.len();
        let written = tty.write(&self.buf).map_err(TermError::Write)?;
        if written != expected {
            return Err(TermError::ShortWrite { written, expected });
        }
        Ok(())
    }
}

/// Lets the `ansi` encoders and `write!` target the buffer directly.
///
/// Never fails: bytes that cannot be staged are dropped as in [`append`].
///
/// [`append`]: AppendBuffer::append
impl Write for AppendBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
