//! Print the movie and series catalog

use anyhow::Result;
use clap::Args;
use colored::*;

use guty_tv::catalog::ALL_CATEGORIES;
use guty_tv::movies::MovieCatalog;
use guty_tv::player::VideoFormat;

#[derive(Args)]
pub struct MoviesCommands {
    /// Only show titles in this genre
    #[arg(long, short, default_value = ALL_CATEGORIES)]
    pub genre: String,

    /// Case-insensitive title filter
    #[arg(long, short)]
    pub search: Option<String>,

    /// List each series' episodes
    #[arg(long, short)]
    pub episodes: bool,
}

pub fn movies_command(args: MoviesCommands, catalog: &MovieCatalog) -> Result<()> {
    let movies = catalog.search(&args.genre, args.search.as_deref().unwrap_or(""));

    println!();
    println!("  {}", "🎬 Películas y series".bright_blue().bold());
    println!("  {}", "═════════════════════".bright_blue());
    println!("  {}: {}", "Géneros".dimmed(), catalog.genres().join(", ").cyan());
    println!();

    if movies.is_empty() {
        println!("  {}", "⚠️  No hay títulos para ese filtro".bright_yellow().bold());
        return Ok(());
    }

    for movie in &movies {
        let year = movie.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        println!(
            "  {}{} {} {}",
            movie.title.bright_white().bold(),
            year.dimmed(),
            format!("[{}]", movie.genre).cyan(),
            movie.kind.label().magenta()
        );

        let mut meta = Vec::new();
        if !movie.duration.is_empty() {
            meta.push(movie.duration.clone());
        }
        if !movie.rating.is_empty() {
            meta.push(format!("★ {}", movie.rating));
        }
        if !movie.video_url.is_empty() {
            let format = VideoFormat::detect(&movie.video_url);
            meta.push(format.mime_type().unwrap_or("directo").to_string());
        }
        if !meta.is_empty() {
            println!("     {}", meta.join(" • ").dimmed());
        }

        if args.episodes && movie.is_series() {
            for (season, episodes) in movie.episodes_by_season() {
                println!("     {}", format!("Temporada {}", season).bright_blue());
                for episode in episodes {
                    println!(
                        "       {}. {} {}",
                        episode.episode_number,
                        episode.title.white(),
                        episode.duration.dimmed()
                    );
                }
            }
        }
    }

    println!();
    println!("  {} {}", movies.len().to_string().bright_white().bold(), "títulos".dimmed());
    Ok(())
}
