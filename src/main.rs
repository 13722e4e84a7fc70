// SPDX-License-Identifier: MIT
//
// dive — a character-mode terminal screen editor.
//
// This is the binary that wires the two crates together:
//
//   dive-term   → raw mode, geometry, framed output, key input, fatal reports
//   dive-editor → editor state, screen renderer, key dispatch, the loop
//
// Lifecycle:
//
//   open (raw mode + size) → loop { render; read key; dispatch } → close
//
// Every exit path goes through `close` or the raw-mode guard's drop, so the
// shell gets its terminal back whether the user quit or something broke.
// Fatal errors are reported only after that restore.
//
// Logging never goes to the terminal being drawn on. Set DIVE_LOG to a file
// path to get a trace, filtered by RUST_LOG (default `warn`).

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Mutex;

use dive_editor::config::EditorConfig;
use dive_editor::editor::Editor;
use dive_term::fatal;
use dive_term::tty::{StdTty, Tty};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file.
const LOG_ENV: &str = "DIVE_LOG";

/// Process status after the quit chord.
const EXIT_OK: u8 = 0;
/// Process status after a fatal terminal error.
const EXIT_FATAL: u8 = 1;

fn main() -> ExitCode {
    init_logging();

    let result = Editor::open(StdTty::new(), EditorConfig::default()).and_then(|mut editor| {
        let outcome = editor.run();
        // Restore even if the loop failed; the loop's error wins.
        let restored = editor.close();
        outcome.and(restored)
    });

    ExitCode::from(exit_status(result, &mut StdTty::new(), &mut io::stderr()))
}

/// Turn the session outcome into a process status, reporting a fatal error
/// on the way out.
fn exit_status(
    result: dive_term::Result<()>,
    tty: &mut impl Tty,
    diag: &mut impl Write,
) -> u8 {
    match result {
        Ok(()) => {
            tracing::info!("clean exit");
            EXIT_OK
        }
        Err(err) => {
            fatal::report(&err, tty, diag);
            EXIT_FATAL
        }
    }
}

/// Install a file-backed subscriber if `DIVE_LOG` is set. Otherwise logging
/// stays off.
fn init_logging() {
    let Some(path) = env::var_os(LOG_ENV) else {
        return;
    };
    let Ok(file) = File::create(&path) else {
        return;
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "dive starting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use dive_term::TermError;
    use dive_term::input::ctrl_key;
    use dive_term::mock::MockTty;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_quit_exits_zero_silently() {
        let mut tty = MockTty::new();
        let handle = tty.handle();
        let mut diag = Vec::new();

        assert_eq!(exit_status(Ok(()), &mut tty, &mut diag), 0);
        assert_eq!(handle.writes(), 0);
        assert!(diag.is_empty());
    }

    #[test]
    fn fatal_error_exits_one_after_reporting() {
        let mut tty = MockTty::new();
        let handle = tty.handle();
        let mut diag = Vec::new();

        let err = TermError::geometry("no cursor position report");
        assert_eq!(exit_status(Err(err), &mut tty, &mut diag), 1);
        assert_eq!(handle.output(), b"\x1b[2J\x1b[H");
        assert_eq!(
            String::from_utf8(diag).unwrap(),
            "dive: getWindowSize: no cursor position report\r\n"
        );
    }

    #[test]
    fn quit_chord_session_exits_zero() {
        let tty = MockTty::new().with_input(&[b'x', ctrl_key(b'q')]);
        let handle = tty.handle();
        let result = Editor::open(tty, EditorConfig::default()).and_then(|mut editor| {
            let outcome = editor.run();
            outcome.and(editor.close())
        });
        let mut diag = Vec::new();

        assert_eq!(exit_status(result, &mut MockTty::new(), &mut diag), 0);
        assert!(handle.output().ends_with(b"\x1b[2J\x1b[H"));
        assert!(diag.is_empty());
    }
}
