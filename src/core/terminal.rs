//! Terminal trait and lifecycle helpers.

/// Minimal terminal interface for the TUI.
pub trait Terminal {
    /// Start the terminal with input and resize handlers.
    fn start(
        &mut self,
        on_input: Box<dyn FnMut(String) + Send>,
        on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<()>;

    /// Stop the terminal and restore state.
    fn stop(&mut self) -> std::io::Result<()>;

    /// Write output to the terminal.
    fn write(&mut self, data: &str);

    /// Terminal dimensions.
    fn columns(&self) -> u16;
    fn rows(&self) -> u16;
}

/// Started terminal that is stopped on drop unless stopped explicitly first.
///
/// Terminal restoration runs on every exit path, including early returns and
/// unwinding panics.
pub struct TerminalGuard<T: Terminal> {
    terminal: T,
    active: bool,
}

impl<T: Terminal> TerminalGuard<T> {
    /// Start `terminal` and take ownership of its lifecycle.
    pub fn start(
        mut terminal: T,
        on_input: Box<dyn FnMut(String) + Send>,
        on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<Self> {
        terminal.start(on_input, on_resize)?;
        Ok(Self {
            terminal,
            active: true,
        })
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    /// Stop the terminal now. Later calls (and drop) are no-ops.
    pub fn stop(&mut self) -> std::io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.terminal.stop()
    }
}

impl<T: Terminal> Drop for TerminalGuard<T> {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            let _ = self.terminal.stop();
        }
    }
}
