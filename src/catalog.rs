use anyhow::{Context, Result};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Pseudo-category that matches every channel
pub const ALL_CATEGORIES: &str = "Todos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: u32,
    pub numero: String,
    pub nombre: String,
    #[serde(default)]
    pub logo: String,
    pub categoria: String,
    #[serde(default)]
    pub descripcion: String,
    /// Empty when the channel has no stream
    #[serde(default)]
    pub url: String,
}

impl Channel {
    /// Id of the channel card in the grid
    pub fn element_id(&self) -> String {
        format!("tv-channel-{}", self.id)
    }

    pub fn has_stream(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct ChannelFile {
    canales: Vec<Channel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCatalog {
    channels: Vec<Channel>,
}

impl ChannelCatalog {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }

    /// Load channels, falling back to the built-in channel on any failure
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Error loading channels: {:#}", e);
                Self::fallback()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        debug!("Loading channels from: {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read channels file: {:?}", path))?;
        let catalog = Self::from_json(&content)
            .with_context(|| format!("Failed to parse channels file: {:?}", path))?;
        info!("Loaded {} channels", catalog.len());
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: ChannelFile = serde_json::from_str(content)?;
        Ok(Self::new(file.canales))
    }

    pub fn fallback() -> Self {
        Self::new(vec![Channel {
            id: 1,
            numero: "01".to_string(),
            nombre: "365 GUTY TV".to_string(),
            logo: String::new(),
            categoria: "Nacional".to_string(),
            descripcion: "Canal principal de 365GUTY-TV".to_string(),
            url: String::new(),
        }])
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn find_by_element_id(&self, element_id: &str) -> Option<&Channel> {
        let id = element_id.strip_prefix("tv-channel-")?.parse().ok()?;
        self.get(id)
    }

    /// `Todos` followed by each category in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for channel in &self.channels {
            if !categories.contains(&channel.categoria) {
                categories.push(channel.categoria.clone());
            }
        }
        categories
    }

    pub fn filter(&self, category: &str) -> Vec<&Channel> {
        self.channels
            .iter()
            .filter(|c| category == ALL_CATEGORIES || c.categoria == category)
            .collect()
    }

    /// Case-insensitive name search within a category
    pub fn search(&self, category: &str, query: &str) -> Vec<&Channel> {
        let query = query.trim().to_lowercase();
        self.filter(category)
            .into_iter()
            .filter(|c| query.is_empty() || c.nombre.to_lowercase().contains(&query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "canales": [
            {"id": 1, "numero": "01", "nombre": "365 GUTY TV", "logo": "", "categoria": "Nacional", "descripcion": "Principal", "url": ""},
            {"id": 2, "numero": "02", "nombre": "Deportes Uno", "logo": "", "categoria": "Deportes", "descripcion": "", "url": "https://cdn.example.com/dep.m3u8"},
            {"id": 3, "numero": "03", "nombre": "Noticias 24", "categoria": "Nacional", "url": "https://cdn.example.com/n24.m3u8"},
            {"id": 4, "numero": "04", "nombre": "Deportes Dos", "categoria": "Deportes"}
        ]
    }"#;

    #[test]
    fn test_parse_and_categories() {
        let catalog = ChannelCatalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.categories(), vec!["Todos", "Nacional", "Deportes"]);
        assert!(catalog.get(2).unwrap().has_stream());
        assert!(!catalog.get(4).unwrap().has_stream());
    }

    #[test]
    fn test_filter_and_search() {
        let catalog = ChannelCatalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.filter(ALL_CATEGORIES).len(), 4);

        let ids: Vec<_> = catalog.filter("Deportes").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert!(catalog.filter("Infantil").is_empty());

        let ids: Vec<_> = catalog.search(ALL_CATEGORIES, "DEPORTES").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 4]);
        let ids: Vec<_> = catalog.search("Nacional", "noti").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3]);
        assert_eq!(catalog.search("Nacional", "  ").len(), 2);
    }

    #[test]
    fn test_element_ids() {
        let catalog = ChannelCatalog::from_json(SAMPLE).unwrap();
        let channel = catalog.get(3).unwrap();
        assert_eq!(channel.element_id(), "tv-channel-3");
        assert_eq!(catalog.find_by_element_id("tv-channel-3"), Some(channel));
        assert_eq!(catalog.find_by_element_id("menu-3"), None);
        assert_eq!(catalog.find_by_element_id("tv-channel-99"), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let catalog = ChannelCatalog::load(file.path());
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_load_falls_back_on_missing_or_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ChannelCatalog::load(&dir.path().join("nope.json"));
        assert_eq!(missing, ChannelCatalog::fallback());

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        assert!(ChannelCatalog::try_load(&bad).is_err());
        let catalog = ChannelCatalog::load(&bad);
        assert_eq!(catalog.channels()[0].nombre, "365 GUTY TV");
        assert_eq!(catalog.categories(), vec!["Todos", "Nacional"]);
    }
}
