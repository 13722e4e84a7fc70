// SPDX-License-Identifier: MIT
//
// Error taxonomy for terminal operations.
//
// Every variant is fatal to the editor except `AllocationFailure`, which
// the append buffer absorbs by dropping the bytes it could not stage.

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Result alias used across the terminal layer.
pub type Result<T> = std::result::Result<T, TermError>;

/// A failed terminal operation.
#[derive(Debug, Error)]
pub enum TermError {
    /// Reading the current terminal configuration failed.
    #[error("tcgetattr: {0}")]
    TerminalQuery(#[source] io::Error),

    /// Applying a terminal configuration failed.
    #[error("tcsetattr: {0}")]
    TerminalSet(#[source] io::Error),

    /// Neither the direct query nor the cursor probe produced a size.
    #[error("getWindowSize: {reason}")]
    GeometryProbe { reason: String },

    /// Reading input failed for a reason other than a timeout.
    #[error("read: {0}")]
    Read(#[source] io::Error),

    /// Writing output failed.
    #[error("write: {0}")]
    Write(#[source] io::Error),

    /// The terminal accepted fewer bytes than were handed to it.
    #[error("write: short write ({written} of {expected} bytes)")]
    ShortWrite { written: usize, expected: usize },

    /// Growing the append buffer failed.
    #[error("alloc: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

impl TermError {
    /// Build a [`GeometryProbe`](Self::GeometryProbe) error.
    #[must_use]
    pub fn geometry(reason: impl Into<String>) -> Self {
        Self::GeometryProbe {
            reason: reason.into(),
        }
    }

    /// Name of the OS operation that failed, for diagnostics.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::TerminalQuery(_) => "tcgetattr",
            Self::TerminalSet(_) => "tcsetattr",
            Self::GeometryProbe { .. } => "getWindowSize",
            Self::Read(_) => "read",
            Self::Write(_) | Self::ShortWrite { .. } => "write",
            Self::AllocationFailure(_) => "alloc",
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
