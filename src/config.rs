use crate::storage::{self, StorageManager};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default backend address (the product API mounted under its v1 prefix).
const DEFAULT_BASE_URL: &str = "http://localhost:8888/api/v1/product";
/// Default page size for listing and search queries
const DEFAULT_PAGE_SIZE: usize = 15;
/// Default nearest-neighbor search mode passed to the backend
const DEFAULT_SEARCH_TYPE: &str = "KNN";
/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the remote backend connection
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the product search service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Configuration for search behavior
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Page size for listing and similarity queries
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Search mode tag sent to the backend (e.g. "KNN")
    #[serde(default = "default_search_type")]
    pub search_type: String,

    /// Use the OpenAI embedding provider by default
    #[serde(default)]
    pub openai_embeddings: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_type: DEFAULT_SEARCH_TYPE.to_string(),
            openai_embeddings: false,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_search_type() -> String {
    DEFAULT_SEARCH_TYPE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

impl Config {
    fn validate(&self) -> anyhow::Result<()> {
        Url::parse(&self.backend.base_url).with_context(|| {
            format!("backend.base_url is not a valid url: {}", self.backend.base_url)
        })?;

        if self.backend.timeout_secs == 0 {
            bail!("backend.timeout_secs must be greater than 0");
        }

        if self.search.page_size == 0 {
            bail!("search.page_size must be greater than 0");
        }

        if self.search.search_type.trim().is_empty() {
            bail!("search.search_type must not be empty");
        }

        Ok(())
    }

    pub fn load_with(base_path: &str) -> anyhow::Result<Self> {
        let store = storage::BackendLocal::new(base_path)?;

        // create new if does not exist
        if !store.exists("config.yaml") {
            store.write(
                "config.yaml",
                serde_yml::to_string(&Self::default())
                    .context("failed to serialize default config")?
                    .as_bytes(),
            )?;
        }

        let config_str = String::from_utf8(store.read("config.yaml")?)
            .context("config file is not valid utf8")?;
        let mut config: Self =
            serde_yml::from_str(&config_str).context("config is malformed")?;

        config.base_path = base_path.to_string();

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let store = storage::BackendLocal::new(&self.base_path)?;

        let config_str = serde_yml::to_string(&self)?;
        store.write("config.yaml", config_str.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_default_config() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_with(tmp.path().to_str().unwrap()).unwrap();

        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.search.page_size, 15);
        assert_eq!(config.search.search_type, "KNN");
        assert!(!config.search.openai_embeddings);
        assert!(tmp.path().join("config.yaml").exists());
    }

    #[test]
    fn test_load_rejects_bad_base_url() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("config.yaml"),
            "backend:\n  base_url: \"not a url\"\n",
        )
        .unwrap();

        assert!(Config::load_with(tmp.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_rejects_zero_page_size() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("config.yaml"),
            "search:\n  page_size: 0\n",
        )
        .unwrap();

        assert!(Config::load_with(tmp.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("config.yaml"),
            "search:\n  openai_embeddings: true\n",
        )
        .unwrap();

        let config = Config::load_with(tmp.path().to_str().unwrap()).unwrap();
        assert!(config.search.openai_embeddings);
        assert_eq!(config.search.page_size, 15);
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
    }
}
