use crate::error::Result;
use crate::utils::DEFAULT_DATA_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Base URL of the API used by client commands
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub metadata: MetadataConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            api_base: default_api_base(),
            metadata: MetadataConfig::default(),
        }
    }
}

/// Settings for `tiosa serve`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// JSON document path, relative paths resolve against the working directory
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Maximum accepted request body in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            data_file: default_data_file(),
            body_limit: default_body_limit(),
        }
    }
}

/// Settings for the autofill collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// `gemini`, `glm` or `page`
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Overrides the provider's default model
    #[serde(default)]
    pub model: Option<String>,
    /// Language the provider should answer in
    #[serde(default = "default_language")]
    pub language: String,
    /// Custom user-agent string for page downloads
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            model: None,
            language: default_language(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_api_base() -> String {
    "http://localhost:3001/api".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:3001".to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_body_limit() -> usize {
    1024 * 1024
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_language() -> String {
    "Simplified Chinese".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) \
     Version/18.5 Safari/605.1.15"
        .to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from default location (~/.config/tiosa/config.yml)
    /// Falls back to default config if file doesn't exist
    pub fn load() -> Self {
        let config_path = crate::utils::get_config_dir().join("config.yml");

        if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!(
                        "Failed to load config from {:?}: {}; using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Apply `PORT` and `TIOSA_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(port) = lookup("PORT").filter(|p| p.parse::<u16>().is_ok()) {
            let host = self
                .server
                .bind
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "127.0.0.1".to_string());
            self.server.bind = format!("{}:{}", host, port);
        }
        if let Some(base) = lookup("TIOSA_API_BASE") {
            self.api_base = base;
        }
        if let Some(provider) = lookup("TIOSA_AI_PROVIDER") {
            self.metadata.provider = provider.to_lowercase();
        }
        if let Some(key) = lookup("TIOSA_AI_API_KEY") {
            self.metadata.api_key = Some(key);
        }
        if let Some(model) = lookup("TIOSA_AI_MODEL") {
            self.metadata.model = Some(model);
        }
        self
    }

    /// API base without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}
