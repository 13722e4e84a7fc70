// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Scripted in-memory terminal for tests.
//
// `MockTty` plays the terminal's side of every exchange: it holds a
// current line-discipline configuration, answers the window-size query,
// serves input from a script of bytes, timeouts and errors, and records
// every write. State lives behind `Rc<RefCell<_>>` so a test can keep a
// `MockHandle` and inspect it after the tty has been moved into (and
// dropped with) a `RawTerminal`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use crate::geometry::Size;
use crate::terminal::TerminalConfiguration;
use crate::tty::Tty;

/// A typical cooked-mode configuration, as a shell leaves it.
#[must_use]
pub fn cooked_configuration() -> TerminalConfiguration {
    let mut t: libc::termios = unsafe { std::mem::zeroed() };
    t.c_iflag = libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON;
    t.c_oflag = libc::OPOST | libc::ONLCR;
    t.c_cflag = libc::CS7 | libc::CREAD;
    t.c_lflag = libc::ECHO | libc::ECHOE | libc::ICANON | libc::IEXTEN | libc::ISIG;
    t.c_cc[libc::VMIN] = 1;
    t.c_cc[libc::VTIME] = 0;
    TerminalConfiguration::from_termios(t)
}

/// One scripted response to a read call.
#[derive(Debug)]
enum Input {
    Byte(u8),
    Timeout,
    Error(io::ErrorKind),
}

#[derive(Debug)]
struct State {
    config: TerminalConfiguration,
    window: Option<Size>,
    input: VecDeque<Input>,
    output: Vec<u8>,
    reads: usize,
    writes: usize,
    set_attr_calls: usize,
    fail_get_attr: bool,
    fail_next_set_attr: bool,
    fail_writes: bool,
    write_limit: Option<usize>,
}

/// A scripted terminal. See the module docs.
#[derive(Debug)]
pub struct MockTty {
    state: Rc<RefCell<State>>,
}

/// Read-side view of a [`MockTty`]'s state.
#[derive(Debug, Clone)]
pub struct MockHandle {
    state: Rc<RefCell<State>>,
}

impl Default for MockTty {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTty {
    /// An 80×24 terminal in cooked mode with no pending input.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                config: cooked_configuration(),
                window: Some(Size { cols: 80, rows: 24 }),
                input: VecDeque::new(),
                output: Vec::new(),
                reads: 0,
                writes: 0,
                set_attr_calls: 0,
                fail_get_attr: false,
                fail_next_set_attr: false,
                fail_writes: false,
                write_limit: None,
            })),
        }
    }

    #[must_use]
    pub fn handle(&self) -> MockHandle {
        MockHandle {
            state: Rc::clone(&self.state),
        }
    }

    /// Set what the window-size query answers. `None` makes it fail.
    #[must_use]
    pub fn with_window_size(self, size: Option<Size>) -> Self {
        self.state.borrow_mut().window = size;
        self
    }

    #[must_use]
    pub fn with_input(self, bytes: &[u8]) -> Self {
        self.push_input(bytes);
        self
    }

    /// Make the configuration query fail.
    #[must_use]
    pub fn fail_get_attr(self) -> Self {
        self.state.borrow_mut().fail_get_attr = true;
        self
    }

    /// Make the next configuration change fail (once).
    #[must_use]
    pub fn fail_next_set_attr(self) -> Self {
        self.state.borrow_mut().fail_next_set_attr = true;
        self
    }

    /// Make every write fail.
    #[must_use]
    pub fn fail_writes(self) -> Self {
        self.state.borrow_mut().fail_writes = true;
        self
    }

    /// Accept at most `limit` bytes per write.
    #[must_use]
    pub fn limit_writes_to(self, limit: usize) -> Self {
        self.state.borrow_mut().write_limit = Some(limit);
        self
    }

    /// Queue bytes, one per read call.
    pub fn push_input(&self, bytes: &[u8]) {
        self.state
            .borrow_mut()
            .input
            .extend(bytes.iter().copied().map(Input::Byte));
    }

    /// Queue a read that returns zero bytes.
    pub fn push_timeout(&self) {
        self.state.borrow_mut().input.push_back(Input::Timeout);
    }

    /// Queue a read that fails with `kind`.
    pub fn push_read_error(&self, kind: io::ErrorKind) {
        self.state.borrow_mut().input.push_back(Input::Error(kind));
    }
}

impl MockHandle {
    /// The configuration currently applied.
    #[must_use]
    pub fn config(&self) -> TerminalConfiguration {
        self.state.borrow().config
    }

    /// Everything written so far.
    #[must_use]
    pub fn output(&self) -> Vec<u8> {
        self.state.borrow().output.clone()
    }

    /// Take everything written so far, leaving the record empty.
    #[must_use]
    pub fn take_output(&self) -> Vec<u8> {
        std::mem::take(&mut self.state.borrow_mut().output)
    }

    /// Number of read calls made.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.state.borrow().reads
    }

    /// Number of write calls made.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }

    /// Number of configuration changes attempted.
    #[must_use]
    pub fn set_attr_calls(&self) -> usize {
        self.state.borrow().set_attr_calls
    }

    /// Scripted reads not yet consumed.
    #[must_use]
    pub fn pending_input(&self) -> usize {
        self.state.borrow().input.len()
    }

    /// Make the next configuration change fail (once).
    pub fn set_fail_next_set_attr(&self) {
        self.state.borrow_mut().fail_next_set_attr = true;
    }
}

impl Tty for MockTty {
    fn get_attr(&mut self) -> io::Result<TerminalConfiguration> {
        let state = self.state.borrow();
        if state.fail_get_attr {
            return Err(io::Error::from_raw_os_error(libc::ENOTTY));
        }
        Ok(state.config)
    }

    fn set_attr(&mut self, config: &TerminalConfiguration) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.set_attr_calls += 1;
        if std::mem::take(&mut state.fail_next_set_attr) {
            return Err(io::Error::from_raw_os_error(libc::EIO));
        }
        state.config = *config;
        Ok(())
    }

    fn window_size(&mut self) -> io::Result<Size> {
        self.state
            .borrow()
            .window
            .ok_or_else(|| io::Error::from_raw_os_error(libc::ENOTTY))
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        state.reads += 1;
        match state.input.pop_front() {
            Some(Input::Byte(b)) => {
                buf[0] = b;
                Ok(1)
            }
            Some(Input::Timeout) => Ok(0),
            Some(Input::Error(kind)) => Err(kind.into()),
            None => Err(io::ErrorKind::UnexpectedEof.into()),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        state.writes += 1;
        if state.fail_writes {
            return Err(io::Error::from_raw_os_error(libc::EIO));
        }
        let n = state.write_limit.map_or(bytes.len(), |limit| bytes.len().min(limit));
        state.output.extend_from_slice(&bytes[..n]);
        Ok(n)
    }
}
