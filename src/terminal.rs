//! Raw mode and alternate screen handling.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use crossterm::ExecutableCommand;
use crossterm::cursor::Show;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Switch the terminal into full-screen mode.
pub fn init() -> io::Result<AppTerminal> {
    PANIC_HOOK.call_once(install_panic_hook);
    enable_raw_mode()?;
    if let Err(err) = io::stdout().execute(EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err);
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Give the terminal back to the shell.
pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(LeaveAlternateScreen)?;
    stdout.execute(Show)?;
    Ok(())
}

/// Restore the terminal before the default hook prints the panic message,
/// otherwise it lands on the alternate screen and vanishes.
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        tracing::error!(%panic_info, "client panicked");
        default_hook(panic_info);
    }));
}
