//! Terminal lifecycle.
//!
//! [`init`] switches the terminal into raw mode on the alternate screen and
//! hands back a guard that restores it on drop. A panic hook is installed
//! so the shell comes back intact even when the event loop panics mid-draw.

use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::CrosstermBackend;

type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Restores the terminal when dropped; derefs to the ratatui terminal.
pub struct TerminalGuard {
    terminal: Terminal,
}

/// Enter raw mode and the alternate screen, wire the panic hook, and build
/// the ratatui terminal.
pub fn init() -> io::Result<TerminalGuard> {
    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        hook(info);
    }));

    let terminal = ratatui::Terminal::new(CrosstermBackend::new(io::stdout()))?;
    Ok(TerminalGuard { terminal })
}

/// Undo what [`init`] did to the terminal. Safe to call more than once.
fn restore() -> io::Result<()> {
    execute!(io::stdout(), cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

impl Deref for TerminalGuard {
    type Target = Terminal;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore();
    }
}
