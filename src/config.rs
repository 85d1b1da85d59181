use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "catalog";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchWeights {
    pub title: f64,
    pub album: f64,
    pub lyricist: f64,
    pub composer: f64,
    pub arranger: f64,
    #[serde(default = "default_composite_weight")]
    pub composite: f64,
}

impl Default for SearchWeights {
    fn default() -> Self {
        Self {
            title: 0.35,
            album: 0.25,
            lyricist: 0.2,
            composer: 0.1,
            arranger: 0.1,
            composite: default_composite_weight(),
        }
    }
}

fn default_composite_weight() -> f64 {
    0.05
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_min_match_char_length")]
    pub min_match_char_length: usize,
    #[serde(default)]
    pub weights: SearchWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            min_match_char_length: default_min_match_char_length(),
            weights: SearchWeights::default(),
        }
    }
}

fn default_threshold() -> f64 {
    0.4
}

fn default_min_match_char_length() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default = "default_type_priority")]
    pub type_priority: Vec<String>,
    #[serde(default)]
    pub search: SearchConfig,
}

fn default_items_per_page() -> usize {
    20
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_cache_capacity() -> usize {
    4
}

fn default_type_priority() -> Vec<String> {
    ["Original", "Arrangement", "Cover", "Remix", "Instrumental", "Medley"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
            debounce_ms: default_debounce_ms(),
            cache_capacity: default_cache_capacity(),
            type_priority: default_type_priority(),
            search: SearchConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

pub fn config_root() -> Result<PathBuf> {
    if let Ok(override_dir) = env::var("CATALOG_CONFIG_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .context("neither HOME nor USERPROFILE is set")?;
    Ok(PathBuf::from(home).join(".config").join(APP_DIR))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_root()?.join(CONFIG_FILE))
}

pub fn load_config() -> Result<EngineConfig> {
    load_config_from_path(&config_path()?)
}

pub fn load_config_from_path(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

pub fn save_config(config: &EngineConfig) -> Result<PathBuf> {
    let path = config_path()?;
    save_config_to_path(&path, config)?;
    Ok(path)
}

pub fn save_config_to_path(path: &Path, config: &EngineConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
