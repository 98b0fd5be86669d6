pub mod channels;
pub mod config;
pub mod movies;
pub mod tui;

pub use channels::{ChannelsCommands, channels_command};
pub use config::{ConfigCommands, config_command};
pub use movies::{MoviesCommands, movies_command};
pub use tui::{TuiCommands, tui_command};
