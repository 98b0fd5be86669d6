use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::navigation::NavigationConfig;
use crate::player::PlayerConfig;

/// Environment variable that overrides the channels file
pub const CHANNELS_ENV: &str = "GUTY_TV_CHANNELS";
pub const DEFAULT_CHANNELS_FILE: &str = "data/canales_tv.json";
/// Environment variable that overrides the movies file
pub const MOVIES_ENV: &str = "GUTY_TV_MOVIES";
pub const DEFAULT_MOVIES_FILE: &str = "data/peliculas.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub channels_file: Option<PathBuf>,
    #[serde(default)]
    pub movies_file: Option<PathBuf>,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_grid_columns")]
    pub grid_columns: usize,
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,
    #[serde(default = "default_controls_hide_ms")]
    pub controls_hide_ms: u64,
    #[serde(default = "default_info_hide_ms")]
    pub info_hide_ms: u64,
    #[serde(default = "default_indicator_hide_ms")]
    pub indicator_hide_ms: u64,
    #[serde(default = "default_seek_step_secs")]
    pub seek_step_secs: u64,
}

fn default_grid_columns() -> usize {
    6
}

fn default_settle_delay_ms() -> u64 {
    50
}

fn default_load_delay_ms() -> u64 {
    2000
}

fn default_controls_hide_ms() -> u64 {
    3000
}

fn default_info_hide_ms() -> u64 {
    5000
}

fn default_indicator_hide_ms() -> u64 {
    2000
}

fn default_seek_step_secs() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_columns: default_grid_columns(),
            settle_delay_ms: default_settle_delay_ms(),
            load_delay_ms: default_load_delay_ms(),
            controls_hide_ms: default_controls_hide_ms(),
            info_hide_ms: default_info_hide_ms(),
            indicator_hide_ms: default_indicator_hide_ms(),
            seek_step_secs: default_seek_step_secs(),
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("guty-tv")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".guty-tv")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        debug!("Saving config to: {:?}", config_path);

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    /// Channels file from the environment, then the config file, then the default
    pub fn channels_path(&self) -> PathBuf {
        resolve_path(
            std::env::var(CHANNELS_ENV).ok(),
            self.channels_file.as_deref(),
            DEFAULT_CHANNELS_FILE,
        )
    }

    /// Movies file, resolved like [`channels_path`](Self::channels_path)
    pub fn movies_path(&self) -> PathBuf {
        resolve_path(
            std::env::var(MOVIES_ENV).ok(),
            self.movies_file.as_deref(),
            DEFAULT_MOVIES_FILE,
        )
    }

    pub fn navigation(&self) -> NavigationConfig {
        NavigationConfig {
            columns: self.settings.grid_columns.max(1),
            settle_delay: Duration::from_millis(self.settings.settle_delay_ms),
        }
    }

    pub fn player(&self) -> PlayerConfig {
        PlayerConfig {
            load_delay: Duration::from_millis(self.settings.load_delay_ms),
            controls_hide: Duration::from_millis(self.settings.controls_hide_ms),
            info_hide: Duration::from_millis(self.settings.info_hide_ms),
            seek_step: self.settings.seek_step_secs as f64,
        }
    }

    pub fn indicator_hide(&self) -> Duration {
        Duration::from_millis(self.settings.indicator_hide_ms)
    }
}

fn resolve_path(env_value: Option<String>, configured: Option<&Path>, default: &str) -> PathBuf {
    env_value
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| configured.map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_navigation_and_player() {
        let config = Config::default();
        assert_eq!(config.navigation(), NavigationConfig::default());
        assert_eq!(config.player(), PlayerConfig::default());
        assert_eq!(config.indicator_hide(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            channels_file = "/srv/tv/canales.json"

            [settings]
            settle_delay_ms = 0
            grid_columns = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.channels_file, Some(PathBuf::from("/srv/tv/canales.json")));
        assert_eq!(config.navigation().columns, 4);
        assert!(config.navigation().settle_delay.is_zero());
        assert_eq!(config.settings.controls_hide_ms, 3000);
    }

    #[test]
    fn test_zero_columns_is_treated_as_one() {
        let mut config = Config::default();
        config.settings.grid_columns = 0;
        assert_eq!(config.navigation().columns, 1);
    }

    #[test]
    fn test_data_path_precedence() {
        assert_eq!(resolve_path(None, None, DEFAULT_CHANNELS_FILE), PathBuf::from(DEFAULT_CHANNELS_FILE));

        let configured = Path::new("from-config.json");
        assert_eq!(resolve_path(None, Some(configured), DEFAULT_MOVIES_FILE), configured.to_path_buf());
        assert_eq!(
            resolve_path(Some(" ".into()), Some(configured), DEFAULT_MOVIES_FILE),
            configured.to_path_buf()
        );
        assert_eq!(
            resolve_path(Some("from-env.json".into()), Some(configured), DEFAULT_MOVIES_FILE),
            PathBuf::from("from-env.json")
        );
    }

    #[test]
    fn test_movies_file_from_config() {
        let config: Config = toml::from_str(r#"movies_file = "/srv/tv/peliculas.json""#).unwrap();
        assert_eq!(config.movies_file, Some(PathBuf::from("/srv/tv/peliculas.json")));
        assert_eq!(config.channels_file, None);
    }

    #[test]
    fn test_save_and_load_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let mut config = Config::default();
        config.settings.seek_step_secs = 30;
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);

        fs::write(&path, "settings = 3").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
