// SPDX-License-Identifier: MIT
//
// dive-term — Terminal layer for the dive editor.
//
// Everything that touches the controlling terminal lives here: entering
// and leaving raw mode, discovering the window size, staging a frame in
// an append buffer and writing it in one call, reading keys one byte at
// a time, and turning an unrecoverable OS failure into a clean exit.
//
// All OS access is funnelled through the `Tty` trait. The real
// implementation talks to stdin/stdout through libc; tests use a scripted
// in-memory terminal. Nothing above this crate issues a syscall.

#[cfg(not(unix))]
compile_error!("dive-term drives a termios terminal and builds on Unix only");

pub mod abuf;
pub mod ansi;
pub mod error;
pub mod fatal;
pub mod geometry;
pub mod input;
pub mod terminal;
pub mod tty;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{Result, TermError};
