//! Key dispatch.
//!
//! [`process_keypress`] reads exactly one key and decides what it means.
//! The quit chord is handled here: it wipes the screen and tells the loop to
//! stop. Every other key goes to a [`KeyHandler`], which is where a real
//! command set plugs in. The default handler, [`Unbound`], ignores everything.

use dive_term::Result;
use dive_term::input::{self, KeyEvent};
use dive_term::terminal;
use dive_term::tty::Tty;
use tracing::{debug, trace};

use crate::config::EditorConfig;
use crate::position::Position;
use crate::state::EditorState;

/// What the loop should do after a key has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep going.
    Continue,
    /// Leave the loop cleanly.
    Quit,
}

/// Consumer for keys the dispatcher does not handle itself.
pub trait KeyHandler {
    /// Handle `key`. May move the cursor.
    fn on_key(&mut self, key: KeyEvent, cursor: &mut Position) -> Action;
}

/// A handler with no bindings.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unbound;

impl KeyHandler for Unbound {
    fn on_key(&mut self, _key: KeyEvent, _cursor: &mut Position) -> Action {
        Action::Continue
    }
}

/// Read one key and dispatch it.
///
/// # Errors
///
/// `TermError::Read` if reading fails, or a write error if the quit chord
/// cannot wipe the screen.
pub fn process_keypress<T: Tty>(
    state: &mut EditorState<T>,
    config: &EditorConfig,
    handler: &mut impl KeyHandler,
) -> Result<Action> {
    let byte = input::read_key(state.tty_mut())?;
    let key = KeyEvent::from_byte(byte);
    trace!(?key, "key");

    if key == config.quit_key {
        debug!("quit requested");
        terminal::wipe_screen(state.tty_mut())?;
        return Ok(Action::Quit);
    }

    Ok(handler.on_key(key, &mut state.cursor))
}
