//! End-to-end editor sessions against a scripted terminal.

use dive_editor::config::EditorConfig;
use dive_editor::editor::Editor;
use dive_term::TermError;
use dive_term::geometry::{MAX_REPORT_LEN, Size};
use dive_term::input::ctrl_key;
use dive_term::mock::{MockTty, cooked_configuration};
use pretty_assertions::assert_eq;

const QUIT: u8 = 0x11;

/// Split recorded output into the lines of the first frame.
fn frame_rows(output: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(output);
    let body = text
        .strip_prefix("\x1b[?25l\x1b[H")
        .expect("frame starts by hiding and homing the cursor");
    let end = body.find("\x1b[1;1H").expect("frame places the cursor");
    body[..end].split("\r\n").map(str::to_owned).collect()
}

#[test]
fn quit_key_matches_ctrl_chord() {
    assert_eq!(QUIT, ctrl_key(b'q'));
}

#[test]
fn full_session_with_cursor_probe() {
    let tty = MockTty::new()
        .with_window_size(None)
        .with_input(b"\x1b[24;80R")
        .with_input(&[QUIT]);
    let handle = tty.handle();

    let mut editor = Editor::open(tty, EditorConfig::default()).unwrap();
    assert_eq!(editor.state().size(), Size { cols: 80, rows: 24 });
    assert_eq!(handle.take_output(), b"\x1b[999C\x1b[999B\x1b[6n");

    editor.run().unwrap();
    editor.close().unwrap();

    let output = handle.output();
    let rows = frame_rows(&output);
    assert_eq!(rows.len(), 24);
    for (y, row) in rows.iter().enumerate() {
        if y == 8 {
            assert!(row.starts_with('~'), "banner row starts with a tilde");
            assert!(row.contains("DIVE EDITOR -- VERSION 0.0.1"));
            assert!(row.ends_with("\x1b[K"));
        } else {
            assert_eq!(row, "~\x1b[K", "row {y}");
        }
    }
    assert!(output.ends_with(b"\x1b[1;1H\x1b[H\x1b[?25h\x1b[2J\x1b[H"));
    assert_eq!(handle.config(), cooked_configuration());
}

#[test]
fn full_session_with_direct_size() {
    let tty = MockTty::new()
        .with_window_size(Some(Size { cols: 20, rows: 6 }))
        .with_input(b"hello")
        .with_input(&[QUIT]);
    let handle = tty.handle();

    let mut editor = Editor::open(tty, EditorConfig::default()).unwrap();
    editor.run().unwrap();
    editor.close().unwrap();

    // Five ignored keys and the quit key: six frames, then the wipe.
    assert_eq!(handle.writes(), 7);
    let output = handle.output();
    let rows = frame_rows(&output);
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[2], "DIVE EDITOR -- VERSI\x1b[K");
    assert_eq!(handle.config(), cooked_configuration());
}

#[test]
fn garbled_probe_reply_fails_cleanly() {
    let tty = MockTty::new()
        .with_window_size(None)
        .with_input(&[b'x'; 64]);
    let handle = tty.handle();

    let err = Editor::open(tty, EditorConfig::default()).err().unwrap();

    assert!(matches!(err, TermError::GeometryProbe { .. }));
    assert_eq!(err.operation(), "getWindowSize");
    assert_eq!(handle.reads(), MAX_REPORT_LEN);
    assert_eq!(handle.config(), cooked_configuration());
}

#[test]
fn not_a_terminal_fails_before_raw_mode() {
    let tty = MockTty::new().fail_get_attr();
    let handle = tty.handle();

    let err = Editor::open(tty, EditorConfig::default()).err().unwrap();

    assert!(matches!(err, TermError::TerminalQuery(_)));
    assert_eq!(handle.set_attr_calls(), 0);
}

#[test]
fn dropped_editor_restores_terminal() {
    let tty = MockTty::new().with_input(b"abc");
    let handle = tty.handle();

    let mut editor = Editor::open(tty, EditorConfig::default()).unwrap();
    assert_eq!(handle.config(), cooked_configuration().make_raw());
    // Runs out of scripted input and fails.
    assert!(editor.run().is_err());
    drop(editor);

    assert_eq!(handle.config(), cooked_configuration());
}
