//! The editor loop.
//!
//! Render, then block for a key, then dispatch it. Rendering always comes
//! first so the screen shows the latest state before the editor waits. The
//! loop ends on the quit chord or on the first fatal error; there is no
//! other way out.

use dive_term::Result;
use dive_term::tty::Tty;
use tracing::info;

use crate::config::EditorConfig;
use crate::keymap::{self, Action, KeyHandler, Unbound};
use crate::render::{self, RowRenderer, WelcomeScreen};
use crate::state::EditorState;

/// A running editor: state plus the row and key hooks.
pub struct Editor<T: Tty, R: RowRenderer = WelcomeScreen, H: KeyHandler = Unbound> {
    state: EditorState<T>,
    config: EditorConfig,
    rows: R,
    keys: H,
}

impl<T: Tty> Editor<T> {
    /// Open an editor on `tty` with the welcome screen and no key bindings.
    ///
    /// # Errors
    ///
    /// Any error from entering raw mode or measuring the window.
    pub fn open(tty: T, config: EditorConfig) -> Result<Self> {
        let rows = WelcomeScreen::new(&config);
        Self::with_hooks(tty, config, rows, Unbound)
    }
}

impl<T: Tty, R: RowRenderer, H: KeyHandler> Editor<T, R, H> {
    /// Open an editor with custom row content and key handling.
    ///
    /// # Errors
    ///
    /// Any error from entering raw mode or measuring the window.
    pub fn with_hooks(tty: T, config: EditorConfig, rows: R, keys: H) -> Result<Self> {
        let state = EditorState::init(tty)?;
        Ok(Self {
            state,
            config,
            rows,
            keys,
        })
    }

    /// One cycle: redraw, then read and dispatch one key.
    ///
    /// # Errors
    ///
    /// Any fatal terminal error from rendering or reading.
    pub fn step(&mut self) -> Result<Action> {
        render::refresh_screen(&mut self.state, &self.rows)?;
        keymap::process_keypress(&mut self.state, &self.config, &mut self.keys)
    }

    /// Cycle until the quit chord.
    ///
    /// # Errors
    ///
    /// The first fatal terminal error. The terminal is still raw at that
    /// point; [`close`](Self::close) or drop restores it.
    pub fn run(&mut self) -> Result<()> {
        info!("editor loop started");
        while self.step()? == Action::Continue {}
        info!("editor loop finished");
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> &EditorState<T> {
        &self.state
    }

    /// Restore the terminal and release it.
    ///
    /// # Errors
    ///
    /// `TermError::TerminalSet` if the original settings cannot be applied.
    pub fn close(mut self) -> Result<()> {
        self.state.restore()
    }
}
