//! Terminal setup and teardown.

use std::io::{self, Stdout};

use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        cursor::{Hide, Show},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enters raw mode on the alternate screen.
///
/// Installs a panic hook that restores the terminal before the report is
/// printed.
///
/// # Errors
/// Returns an error if the terminal cannot be switched.
pub fn init() -> io::Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;

    install_panic_hook();

    Terminal::new(CrosstermBackend::new(io::stdout()))
}

fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        tracing::error!("Panic: {panic_info}");
        hook(panic_info);
    }));
}

/// Leaves the alternate screen and raw mode.
///
/// # Errors
/// Returns an error if the terminal cannot be restored.
pub fn restore() -> io::Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()
}
