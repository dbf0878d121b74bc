//! Terminal setup and teardown.
//!
//! [`TerminalGuard`] puts the terminal into raw mode on the alternate screen
//! and restores it when dropped, including on an early return or a panic
//! unwinding through the event loop.

use std::io;

use crossterm::terminal;

use crate::renderer::DiffRenderer;

/// Current terminal size as `(columns, rows)`.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    terminal::size()
}

pub struct TerminalGuard {
    renderer: DiffRenderer,
    active: bool,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut renderer = DiffRenderer::new();
        if let Err(e) = renderer.enter_fullscreen() {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self {
            renderer,
            active: true,
        })
    }

    /// Leave the alternate screen and raw mode.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let screen = self.renderer.exit_fullscreen();
        terminal::disable_raw_mode()?;
        screen
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best effort; nothing useful can be done with an error here.
        let _ = self.restore();
    }
}
