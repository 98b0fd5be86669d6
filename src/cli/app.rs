use super::commands::channels::ChannelsCommands;
use super::commands::config::ConfigCommands;
use super::commands::movies::MoviesCommands;
use super::commands::tui::TuiCommands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "guty-tv")]
#[command(about = "Browse the 365GUTY-TV channel grid with a TV remote layout")]
pub struct Cli {
    /// Channels JSON file (overrides the config file and GUTY_TV_CHANNELS)
    #[arg(long, global = true)]
    pub channels: Option<PathBuf>,

    /// Movies JSON file (overrides the config file and GUTY_TV_MOVIES)
    #[arg(long, global = true)]
    pub movies: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive channel browser (default)
    Tui(TuiCommands),
    /// List channels from the catalog
    Channels(ChannelsCommands),
    /// List movies and series
    Movies(MoviesCommands),
    /// Show or create the configuration file
    Config(ConfigCommands),
}
