use anyhow::Result;
use clap::Parser;
use log::{debug, info};

mod cli;

use cli::Cli;
use cli::app::Commands;
use cli::commands::TuiCommands;
use guty_tv::catalog::ChannelCatalog;
use guty_tv::config::Config;
use guty_tv::movies::MovieCatalog;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run); the terminal belongs to the UI
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("guty-tv.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    info!("Starting guty-tv");

    let config = Config::load()?;
    // The command-line flag beats both the environment and the config file
    let channels_path = cli.channels.clone().unwrap_or_else(|| config.channels_path());
    let movies_path = cli.movies.clone().unwrap_or_else(|| config.movies_path());
    debug!("Using channels file {:?} and movies file {:?}", channels_path, movies_path);

    match cli.command {
        Some(Commands::Config(args)) => cli::commands::config_command(args, &config)?,
        Some(Commands::Channels(args)) => {
            let catalog = ChannelCatalog::load(&channels_path);
            cli::commands::channels_command(args, &catalog)?;
        }
        Some(Commands::Movies(args)) => {
            let movies = MovieCatalog::load(&movies_path);
            cli::commands::movies_command(args, &movies)?;
        }
        Some(Commands::Tui(args)) => {
            let catalog = ChannelCatalog::load(&channels_path);
            let movies = MovieCatalog::load(&movies_path);
            cli::commands::tui_command(args, &config, catalog, movies).await?;
        }
        None => {
            let catalog = ChannelCatalog::load(&channels_path);
            let movies = MovieCatalog::load(&movies_path);
            cli::commands::tui_command(TuiCommands { command: None }, &config, catalog, movies).await?;
        }
    }

    Ok(())
}
