use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use tetris::config::Args;
use tetris::driver::{spawn_ticker, Driver};
use tetris::game::TICK_RATE_MS;
use tetris::input::spawn_key_reader;
use tetris::journal::Journal;
use tetris::ui::TerminalRenderer;

fn main() -> Result<()> {
    let args = Args::parse();
    let seed = args.resolve_seed();
    let journal = args.log.as_deref().map(Journal::create).transpose()?;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let (tx, rx) = mpsc::channel();
    spawn_ticker(tx.clone(), Duration::from_millis(TICK_RATE_MS));
    spawn_key_reader(tx);

    let mut driver = Driver::new(seed, TerminalRenderer::new(terminal));
    if let Some(journal) = journal {
        driver = driver.with_journal(journal);
    }
    let result = driver.run(&rx);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}
