use crate::engine::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::Result;
use crate::presets;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 150;
const DEFAULT_PRESET: &str = "otc";

/// Keys accepted by [`RxviewConfig::get`] and [`RxviewConfig::set`].
pub const CONFIG_KEYS: &[&str] = &["page-size", "search-debounce-ms", "default-preset"];

/// Configuration for rxview, stored in .rxview/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RxviewConfig {
    /// Rows per page (1..=100)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Pause before a typed search query is applied
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Preset used when no view definition file is given
    #[serde(default = "default_preset")]
    pub default_preset: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}

impl Default for RxviewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            default_preset: default_preset(),
        }
    }
}

impl RxviewConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: RxviewConfig = serde_json::from_str(&content)?;
        config.page_size = config.page_size.clamp(1, MAX_PAGE_SIZE);
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Sets the page size, clamped to `1..=MAX_PAGE_SIZE`
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.clamp(1, MAX_PAGE_SIZE);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "page-size" => Some(self.page_size.to_string()),
            "search-debounce-ms" => Some(self.search_debounce_ms.to_string()),
            "default-preset" => Some(self.default_preset.clone()),
            _ => None,
        }
    }

    /// Sets a key from its textual value. Errors are user-facing messages.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match key {
            "page-size" => {
                let size = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid page size: {}", value))?;
                self.set_page_size(size);
            }
            "search-debounce-ms" => {
                self.search_debounce_ms = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid debounce interval: {}", value))?;
            }
            "default-preset" => {
                let preset = presets::preset(value).ok_or_else(|| {
                    format!(
                        "Unknown preset: {} (available: {})",
                        value,
                        presets::preset_names().join(", ")
                    )
                })?;
                self.default_preset = preset.name.clone();
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RxviewConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.search_debounce(), Duration::from_millis(150));
        assert_eq!(config.default_preset, "otc");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = RxviewConfig::load(dir.path().join("absent")).unwrap();
        assert_eq!(config, RxviewConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();

        let mut config = RxviewConfig::default();
        config.set("page-size", "25").unwrap();
        config.set("default-preset", "FDA").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = RxviewConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.page_size, 25);
        assert_eq!(loaded.default_preset, "fda");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"page_size": 500}"#).unwrap();

        let loaded = RxviewConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.page_size, MAX_PAGE_SIZE);
        assert_eq!(loaded.search_debounce_ms, 150);
    }

    #[test]
    fn test_set_page_size_clamps() {
        let mut config = RxviewConfig::default();
        config.set("page-size", "0").unwrap();
        assert_eq!(config.get("page-size").as_deref(), Some("1"));
        config.set("page-size", "1000").unwrap();
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = RxviewConfig::default();
        assert!(config.set("page-size", "many").is_err());
        assert!(config.set("default-preset", "nope").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, RxviewConfig::default());
        assert_eq!(config.get("colour"), None);
    }
}
