// src/main.rs
mod app;
mod config;
mod contact;
mod content;
mod input;
mod links;
mod logging;
mod models;
mod nav;
mod observer;
mod page;
mod scroll;
mod skills;
mod theme;
mod ui;
mod utils;
mod viewport;

use std::{io, time::Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{error, info};

use crate::app::App;
use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Personal portfolio in your terminal", long_about = None)]
struct Args {
    /// TOML file replacing the built-in portfolio content
    #[arg(long)]
    content: Option<String>,

    /// Section id to scroll to on start, e.g. `projects`
    #[arg(long)]
    section: Option<String>,

    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Do not capture the mouse
    #[arg(long, default_value_t = false)]
    no_mouse: bool,
}

/// Restores the terminal however `run` exits.
struct TerminalGuard {
    mouse: bool,
}

impl TerminalGuard {
    fn enter(mouse: bool) -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        if mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        Ok(Self { mouse })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Settings::new().context("failed to load settings")?;

    let level = args.log_level.as_deref().unwrap_or(&settings.log_level);
    logging::init_logging(level, &settings.log_path())?;
    crate::config::seed_user_config();

    let content_path = args.content.as_deref().or(settings.content_path.as_deref());
    let portfolio = content::load(content_path)?;

    let result = run(App::new(portfolio, &settings), &args);
    if let Err(e) = &result {
        error!(error = %format!("{:#}", e), "folio exited with an error");
    }
    result
}

fn run(mut app: App, args: &Args) -> anyhow::Result<()> {
    let _guard = TerminalGuard::enter(!args.no_mouse)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.resize(size.width, size.height);
    app.tick(Instant::now());
    if let Some(id) = &args.section {
        app.scroll_to_section(id);
    }
    info!(width = size.width, height = size.height, "folio started");

    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::render(f, &app))?;

        if event::poll(app.poll_timeout())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if !input::handle_key(&mut app, key)? {
                        break;
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }
    }

    info!("folio stopped");
    Ok(())
}
