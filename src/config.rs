use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::esg::keywords::KeywordIndex;
use crate::models::Category;

/// Root configuration structure, deserialized from `.esg-rater/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Per-category keyword lists replacing the built-in ones, keyed by
    /// category name (`environment`, `social`, `governance`).
    #[serde(default)]
    pub keywords: BTreeMap<String, Vec<String>>,
    /// Ollama connection and sampling settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Settings for the local Ollama service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub num_predict: u32,
    pub timeout_secs: u64,
    /// Models considered suitable for ESG prompts, most preferred first.
    pub preferred_models: Vec<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        LlmConfig {
            url: "http://localhost:11434".to_string(),
            model: "gemma3:4b".to_string(),
            temperature: 0.7,
            top_p: 0.9,
            num_predict: 500,
            timeout_secs: 60,
            preferred_models: vec![
                "llama3.2:3b".to_string(),
                "llama3.1:8b".to_string(),
                "gemma3:4b".to_string(),
                "mistral:7b".to_string(),
            ],
        }
    }
}

impl Config {
    /// Build the keyword index, applying any overrides from the config file.
    pub fn keyword_index(&self) -> Result<KeywordIndex> {
        let mut overrides = BTreeMap::new();
        for (name, words) in &self.keywords {
            let category: Category = name.parse()?;
            overrides.insert(category, words.clone());
        }
        Ok(KeywordIndex::with_overrides(&overrides)?)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.esg-rater/config.toml`
/// 3. `~/.config/esg-rater/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local = Path::new(".esg-rater").join("config.toml");
    if local.exists() {
        return read_config(&local);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("esg-rater").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    tracing::debug!("no config file found, using built-in defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    tracing::debug!(path = %path.display(), "loading config");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}
