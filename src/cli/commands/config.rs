use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;

use guty_tv::config::Config;

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: Option<ConfigSubcommands>,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Print the config path and effective settings (default)
    Show,
    /// Write the current settings to the config file
    Init,
}

pub fn config_command(args: ConfigCommands, config: &Config) -> Result<()> {
    match args.command {
        Some(ConfigSubcommands::Show) | None => show(config),
        Some(ConfigSubcommands::Init) => {
            let path = config.save()?;
            println!("  {} {}", "✓ Config written to".bright_green(), path.display().to_string().cyan());
            Ok(())
        }
    }
}

fn show(config: &Config) -> Result<()> {
    let path = Config::get_config_path()?;
    let settings = &config.settings;

    println!();
    println!("  {}", "⚙️  guty-tv settings".bright_blue().bold());
    println!("  {}: {}", "Config file".dimmed(), path.display().to_string().cyan());
    println!("  {}: {}", "Channels".dimmed(), config.channels_path().display().to_string().cyan());
    println!("  {}: {}", "Movies".dimmed(), config.movies_path().display().to_string().cyan());
    println!("  {}: {}", "Grid columns".dimmed(), settings.grid_columns);
    println!("  {}: {}ms", "Settle delay".dimmed(), settings.settle_delay_ms);
    println!("  {}: {}ms", "Load delay".dimmed(), settings.load_delay_ms);
    println!("  {}: {}ms", "Controls hide".dimmed(), settings.controls_hide_ms);
    println!("  {}: {}ms", "Info hide".dimmed(), settings.info_hide_ms);
    println!("  {}: {}ms", "Indicator hide".dimmed(), settings.indicator_hide_ms);
    println!("  {}: {}s", "Seek step".dimmed(), settings.seek_step_secs);
    Ok(())
}
