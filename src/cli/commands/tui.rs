use anyhow::Result;
use clap::{Args, Subcommand};
use crossterm::{
    event::{self, Event, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::{Duration, Instant};

use guty_tv::catalog::ChannelCatalog;
use guty_tv::config::Config;
use guty_tv::movies::MovieCatalog;
use guty_tv::tui::{TvApp, view};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Args)]
pub struct TuiCommands {
    #[command(subcommand)]
    pub command: Option<TuiSubcommands>,
}

#[derive(Subcommand)]
pub enum TuiSubcommands {
    /// Launch the interactive channel browser (default)
    Launch,
}

pub async fn tui_command(
    args: TuiCommands,
    config: &Config,
    catalog: ChannelCatalog,
    movies: MovieCatalog,
) -> Result<()> {
    match args.command {
        Some(TuiSubcommands::Launch) | None => {
            launch_tui(config, catalog, movies).await?;
        }
    }
    Ok(())
}

async fn launch_tui(config: &Config, catalog: ChannelCatalog, movies: MovieCatalog) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TvApp::new(config, catalog).with_movies(movies);

    let result = run_tui(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut TvApp) -> Result<()> {
    // Some terminals repeat arrow keys within a few ms; drop those so the
    // settle guard isn't what eats them
    let mut last_key_event: Option<(KeyEvent, Instant)> = None;
    const DEDUP_WINDOW_MS: u128 = 10;

    loop {
        let frame_start = Instant::now();

        // Process all pending events first for minimal input latency
        let mut should_quit = false;
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if let Some((last_key, last_time)) = last_key_event {
                    let elapsed = frame_start.duration_since(last_time).as_millis();
                    if elapsed < DEDUP_WINDOW_MS && last_key.code == key.code && last_key.modifiers == key.modifiers {
                        log::debug!("Skipping duplicate key event: {:?} ({}ms since last)", key.code, elapsed);
                        continue;
                    }
                }
                last_key_event = Some((key, frame_start));

                if !app.handle_key(key) {
                    should_quit = true;
                    break;
                }
            }
        }

        if should_quit {
            break;
        }

        app.tick();

        terminal.draw(|frame| view::render(frame, app))?;

        // Sleep for remainder of the frame
        if let Some(remaining) = FRAME.checked_sub(frame_start.elapsed()) {
            tokio::time::sleep(remaining).await;
        }
    }

    Ok(())
}
