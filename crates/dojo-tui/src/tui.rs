//! Terminal lifecycle: raw mode, alternate screen, and restoring both on
//! exit, on error reports, and on panic.

use std::io::{Stdout, stdout};

use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand, cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};

pub type Backend = CrosstermBackend<Stdout>;

/// An entered terminal. Dropping it puts the terminal back.
pub struct Tui {
    terminal: Terminal<Backend>,
}

impl Tui {
    /// Switch to raw mode and the alternate screen.
    pub fn enter() -> Result<Self> {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        terminal::enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(EnableMouseCapture)?;
        stdout().execute(cursor::Hide)?;
        terminal.clear()?;
        Ok(Self { terminal })
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Best-effort restoration; every step runs even if an earlier one fails.
fn restore_terminal() {
    let _ = stdout().execute(cursor::Show);
    let _ = stdout().execute(DisableMouseCapture);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Install color-eyre's report hook and a panic hook that restores the
/// terminal before printing.
///
/// Must run before [`Tui::enter`] so panics during start-up print cleanly.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        panic_hook(info);
    }));

    Ok(())
}
