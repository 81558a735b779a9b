//! Configuration loaded from `.nbforge.toml`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Remote generation backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the generation backend (e.g. an ngrok tunnel)
    pub base_url: Option<String>,

    /// Timeout for generation requests, in seconds. Backend image
    /// generation is slow, so this is minutes-scale.
    #[serde(default = "default_generate_timeout")]
    pub generate_timeout_secs: u64,

    /// Timeout for health probes, in seconds
    #[serde(default = "default_health_timeout")]
    pub health_timeout_secs: u64,

    /// Timeout for notebook-by-URL fetches, in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            generate_timeout_secs: default_generate_timeout(),
            health_timeout_secs: default_health_timeout(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

fn default_generate_timeout() -> u64 {
    300
}

fn default_health_timeout() -> u64 {
    10
}

fn default_fetch_timeout() -> u64 {
    30
}

/// Enrichment backend settings; the API key comes from `OPENAI_API_KEY`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default = "default_enrichment_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_enrichment_model")]
    pub model: String,

    #[serde(default = "default_enrichment_timeout")]
    pub timeout_secs: u64,

    /// Code sent for enrichment is truncated to this many characters
    #[serde(default = "default_max_code_chars")]
    pub max_code_chars: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            endpoint: default_enrichment_endpoint(),
            model: default_enrichment_model(),
            timeout_secs: default_enrichment_timeout(),
            max_code_chars: default_max_code_chars(),
        }
    }
}

fn default_enrichment_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_enrichment_model() -> String {
    "gpt-4.1-nano".to_string()
}

fn default_enrichment_timeout() -> u64 {
    30
}

fn default_max_code_chars() -> usize {
    8000
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NbforgeConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

static CONFIG: OnceLock<NbforgeConfig> = OnceLock::new();

fn try_load_config_from_path(path: &Path) -> Option<NbforgeConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read config file {}: {}", path.display(), e);
            }
            return None;
        }
    };

    match toml::from_str(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: failed to parse {}: {}. Using defaults.", path.display(), e);
            None
        }
    }
}

/// Search for `.nbforge.toml` upward from the current directory
pub fn load_config() -> NbforgeConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("Failed to get current directory: {e}. Using default config.");
            return NbforgeConfig::default();
        }
    };

    std::iter::successors(Some(current), |dir: &PathBuf| {
        let mut parent = dir.clone();
        parent.pop().then_some(parent)
    })
    .take(MAX_TRAVERSAL_DEPTH)
    .map(|dir| dir.join(".nbforge.toml"))
    .find_map(|path| try_load_config_from_path(&path))
    .unwrap_or_default()
}

/// Get the cached configuration
pub fn get_config() -> &'static NbforgeConfig {
    CONFIG.get_or_init(load_config)
}

/// Write a starter configuration file into the current directory
pub fn init_config(force: bool) -> anyhow::Result<()> {
    let config_path = PathBuf::from(".nbforge.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# nbforge configuration

[backend]
# base_url = "https://xxxx.ngrok-free.app"
generate_timeout_secs = 300
health_timeout_secs = 10
fetch_timeout_secs = 30

[enrichment]
# API key is read from the OPENAI_API_KEY environment variable
model = "gpt-4.1-nano"
timeout_secs = 30
"#;

    fs::write(&config_path, default_config)?;
    println!("Created .nbforge.toml configuration file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_adapter_contract() {
        let config = NbforgeConfig::default();
        assert_eq!(config.backend.generate_timeout_secs, 300);
        assert_eq!(config.backend.health_timeout_secs, 10);
        assert_eq!(config.enrichment.max_code_chars, 8000);
        assert!(config.backend.base_url.is_none());
    }

    #[test]
    fn partial_toml_falls_back_per_field() {
        let config: NbforgeConfig =
            toml::from_str("[backend]\nbase_url = \"http://x/\"\n").unwrap();
        assert_eq!(config.backend.base_url.as_deref(), Some("http://x/"));
        assert_eq!(config.backend.generate_timeout_secs, 300);
        assert_eq!(config.enrichment.model, "gpt-4.1-nano");
    }
}
