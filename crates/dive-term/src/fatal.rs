// SPDX-License-Identifier: MIT
//
// Fatal error reporting.
//
// A broken terminal channel cannot be edited around, so every fatal error
// ends the process. Normally the raw-mode guard has already restored the
// terminal by the time `report` runs. If that restore is what failed, output
// processing is still off, so the line ends in an explicit `\r\n`. The
// screen is wiped first so the message is not buried under the last frame.

use std::io::Write;

use tracing::error;

use crate::error::TermError;
use crate::terminal;
use crate::tty::Tty;

/// Prefix for the one-line diagnostic.
pub const PROGRAM: &str = "dive";

/// Wipe the screen and print `dive: <operation>: <cause>` to `diag`.
///
/// Best-effort throughout: the terminal may be the thing that failed. The
/// caller exits non-zero afterwards.
pub fn report(err: &TermError, tty: &mut impl Tty, diag: &mut impl Write) {
    error!(%err, operation = err.operation(), "fatal terminal error");

    let _ = terminal::wipe_screen(tty);
    let _ = write!(diag, "{PROGRAM}: {err}\r\n");
    let _ = diag.flush();
}

// ─── Tests ───────────────────────────────────────────────────────────────────
