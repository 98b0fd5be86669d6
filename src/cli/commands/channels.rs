//! Print the channel catalog

use anyhow::Result;
use clap::Args;
use colored::*;

use guty_tv::catalog::{ALL_CATEGORIES, ChannelCatalog};
use guty_tv::player::VideoFormat;

#[derive(Args)]
pub struct ChannelsCommands {
    /// Only show channels in this category
    #[arg(long, short, default_value = ALL_CATEGORIES)]
    pub category: String,

    /// Case-insensitive name filter
    #[arg(long, short)]
    pub search: Option<String>,
}

pub fn channels_command(args: ChannelsCommands, catalog: &ChannelCatalog) -> Result<()> {
    let channels = catalog.search(&args.category, args.search.as_deref().unwrap_or(""));

    println!();
    println!("  {}", "📺 365GUTY💙-TV".bright_blue().bold());
    println!("  {}", "══════════════".bright_blue());
    println!(
        "  {}: {}",
        "Categorías".dimmed(),
        catalog.categories().join(", ").cyan()
    );
    println!();

    if channels.is_empty() {
        println!("  {}", "⚠️  No hay canales para ese filtro".bright_yellow().bold());
        return Ok(());
    }

    for channel in &channels {
        let status = if channel.has_stream() {
            let format = VideoFormat::detect(&channel.url);
            format!("● VIVO ({})", format.mime_type().unwrap_or("directo")).bright_green()
        } else {
            "○ sin señal".dimmed()
        };
        println!(
            "  {} {} {} {}",
            channel.numero.bright_white().bold(),
            channel.nombre.white(),
            format!("[{}]", channel.categoria).cyan(),
            status
        );
        if !channel.descripcion.is_empty() {
            println!("     {}", channel.descripcion.dimmed());
        }
    }

    println!();
    println!("  {} {}", channels.len().to_string().bright_white().bold(), "canales".dimmed());
    Ok(())
}
