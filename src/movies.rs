//! Movie and series catalog.
//!
//! Loaded from a JSON file shaped like `{"peliculas": [...]}`. Series carry
//! their episodes inline; durations are free text (`"2h 15min"`, `"45 min"`)
//! and are parsed into seconds for the player's position bar.

use anyhow::{Context, Result};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::catalog::ALL_CATEGORIES;

const CAST_PREVIEW: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Movie,
    Series,
}

impl MediaKind {
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Movie => "Película",
            MediaKind::Series => "Serie",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub season: u32,
    pub episode_number: u32,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub video_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub director: String,
    /// Comma separated
    #[serde(default)]
    pub cast: String,
    #[serde(rename = "type", default)]
    pub kind: MediaKind,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl Movie {
    /// Id of the movie card in the grid
    pub fn element_id(&self) -> String {
        format!("movie-{}", self.id)
    }

    pub fn is_series(&self) -> bool {
        self.kind == MediaKind::Series
    }

    /// First few cast members for the details panel
    pub fn cast_preview(&self) -> String {
        let names: Vec<&str> = self
            .cast
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .take(CAST_PREVIEW)
            .collect();
        if names.is_empty() {
            "Reparto no disponible".to_string()
        } else {
            names.join(", ")
        }
    }

    /// Episodes grouped by season, each season ordered by episode number
    pub fn episodes_by_season(&self) -> BTreeMap<u32, Vec<&Episode>> {
        let mut seasons: BTreeMap<u32, Vec<&Episode>> = BTreeMap::new();
        for episode in &self.episodes {
            seasons.entry(episode.season).or_default().push(episode);
        }
        for episodes in seasons.values_mut() {
            episodes.sort_by_key(|e| e.episode_number);
        }
        seasons
    }

    /// Episodes in viewing order: season, then episode number
    pub fn episodes_in_order(&self) -> Vec<Episode> {
        self.episodes_by_season()
            .into_values()
            .flatten()
            .cloned()
            .collect()
    }

    pub fn duration_secs(&self) -> Option<f64> {
        parse_duration(&self.duration)
    }
}

/// Parse a human duration (`"2h 15min"`, `"45 min"`, `"1h"`, `"90"`) into
/// seconds. A bare number is read as minutes.
pub fn parse_duration(text: &str) -> Option<f64> {
    let text = text.trim().to_lowercase();
    let mut total = 0.0;
    let mut chars = text.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut number = String::new();
        while let Some(c) = chars.peek().copied().filter(|c| c.is_ascii_digit() || *c == '.') {
            number.push(c);
            chars.next();
        }
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let mut unit = String::new();
        while let Some(c) = chars.peek().copied().filter(|c| c.is_alphabetic()) {
            unit.push(c);
            chars.next();
        }

        if number.is_empty() {
            // Skip separators and stray words
            if unit.is_empty() {
                chars.next();
            }
            continue;
        }

        let value: f64 = number.parse().ok()?;
        let scale = match unit.as_str() {
            "h" | "hr" | "hrs" | "hora" | "horas" => 3600.0,
            "" | "m" | "min" | "mins" | "minutos" => 60.0,
            "s" | "seg" | "segundos" => 1.0,
            _ => return None,
        };
        total += value * scale;
    }

    (total > 0.0).then_some(total)
}

#[derive(Debug, Deserialize, Serialize)]
struct MovieFile {
    peliculas: Vec<Movie>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieCatalog {
    movies: Vec<Movie>,
}

impl MovieCatalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    /// Load movies; an unreadable file leaves the section empty
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Error loading movies: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        debug!("Loading movies from: {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read movies file: {:?}", path))?;
        let catalog = Self::from_json(&content)
            .with_context(|| format!("Failed to parse movies file: {:?}", path))?;
        info!("Loaded {} movies and series", catalog.len());
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: MovieFile = serde_json::from_str(content)?;
        Ok(Self::new(file.peliculas))
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn find_by_element_id(&self, element_id: &str) -> Option<&Movie> {
        let id = element_id.strip_prefix("movie-")?.parse().ok()?;
        self.get(id)
    }

    /// `Todos` followed by each genre in first-seen order
    pub fn genres(&self) -> Vec<String> {
        let mut genres = vec![ALL_CATEGORIES.to_string()];
        for movie in &self.movies {
            if !movie.genre.is_empty() && !genres.contains(&movie.genre) {
                genres.push(movie.genre.clone());
            }
        }
        genres
    }

    /// Case-insensitive title search within a genre
    pub fn search(&self, genre: &str, query: &str) -> Vec<&Movie> {
        let query = query.trim().to_lowercase();
        self.movies
            .iter()
            .filter(|m| genre == ALL_CATEGORIES || m.genre == genre)
            .filter(|m| query.is_empty() || m.title.to_lowercase().contains(&query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "peliculas": [
            {"id": 1, "title": "El Camino", "year": 2019, "duration": "2h 2min", "genre": "Drama",
             "rating": "8.1", "cast": "Aaron Paul, Jesse Plemons, Krysten Ritter, Charles Baker, Matt Jones",
             "type": "movie", "videoUrl": "https://cdn.example.com/el-camino.mp4"},
            {"id": 2, "title": "La Casa", "genre": "Suspenso", "type": "series", "duration": "50 min",
             "episodes": [
                {"id": 12, "title": "T1E2", "season": 1, "episodeNumber": 2, "duration": "48 min", "videoUrl": "https://cdn.example.com/t1e2.mp4"},
                {"id": 21, "title": "T2E1", "season": 2, "episodeNumber": 1, "videoUrl": "https://cdn.example.com/t2e1.mp4"},
                {"id": 11, "title": "T1E1", "season": 1, "episodeNumber": 1, "videoUrl": "https://cdn.example.com/t1e1.mp4"}
             ]},
            {"id": 3, "title": "Camino Rojo", "genre": "Drama"}
        ]
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = MovieCatalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.genres(), vec!["Todos", "Drama", "Suspenso"]);

        let movie = catalog.get(1).unwrap();
        assert_eq!(movie.kind, MediaKind::Movie);
        assert_eq!(movie.year, Some(2019));
        assert_eq!(movie.element_id(), "movie-1");
        assert_eq!(catalog.find_by_element_id("movie-1"), Some(movie));
        assert_eq!(catalog.find_by_element_id("tv-channel-1"), None);

        // Missing type defaults to a movie
        assert!(!catalog.get(3).unwrap().is_series());
        assert!(catalog.get(2).unwrap().is_series());
    }

    #[test]
    fn test_search_by_genre_and_title() {
        let catalog = MovieCatalog::from_json(SAMPLE).unwrap();
        let ids: Vec<_> = catalog.search("Drama", "").iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
        let ids: Vec<_> = catalog.search(ALL_CATEGORIES, "CAMINO").iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(catalog.search("Suspenso", "camino").is_empty());
    }

    #[test]
    fn test_episode_order() {
        let catalog = MovieCatalog::from_json(SAMPLE).unwrap();
        let series = catalog.get(2).unwrap();

        let seasons = series.episodes_by_season();
        assert_eq!(seasons.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(seasons[&1].iter().map(|e| e.id).collect::<Vec<_>>(), vec![11, 12]);

        let order: Vec<_> = series.episodes_in_order().iter().map(|e| e.id).collect();
        assert_eq!(order, vec![11, 12, 21]);
    }

    #[test]
    fn test_cast_preview() {
        let catalog = MovieCatalog::from_json(SAMPLE).unwrap();
        assert_eq!(
            catalog.get(1).unwrap().cast_preview(),
            "Aaron Paul, Jesse Plemons, Krysten Ritter, Charles Baker"
        );
        assert_eq!(catalog.get(3).unwrap().cast_preview(), "Reparto no disponible");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("2h 15min"), Some(8100.0));
        assert_eq!(parse_duration("2h15m"), Some(8100.0));
        assert_eq!(parse_duration("45 min"), Some(2700.0));
        assert_eq!(parse_duration("1h"), Some(3600.0));
        assert_eq!(parse_duration("90"), Some(5400.0));
        assert_eq!(parse_duration("1 hora 30 minutos"), Some(5400.0));
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("0 min"), None);
        assert_eq!(parse_duration("3 temporadas"), None);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MovieCatalog::load(&dir.path().join("nope.json")).is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        assert_eq!(MovieCatalog::load(file.path()).len(), 3);
    }
}
