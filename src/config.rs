use anyhow::{anyhow, Result};
use config::Config;
use std::collections::HashMap;
use std::path::Path;

/// RIPE database full-text search endpoint
pub const DEFAULT_API_URL: &str =
    "https://apps.db.ripe.net/db-web-ui/api/rest/fulltextsearch/select";

/// Number of results requested per page
pub const DEFAULT_PAGE_SIZE: u64 = 100;

pub struct RipeqConfig {
    /// Full-text search endpoint queried for results
    pub api_url: String,

    /// Number of results fetched per request (default: 100)
    pub page_size: u64,
}

impl Default for RipeqConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RipeqConfig {
    /// Build the configuration from defaults, an optional TOML file and the environment
    ///
    /// An explicit `path` must exist. Without one, `$HOME/.ripeq/ripeq.toml` is
    /// read when present. Nothing is ever written.
    pub fn new(path: &Option<String>) -> Result<RipeqConfig> {
        let mut builder = Config::builder();

        match path {
            Some(p) => {
                if !Path::new(p.as_str()).exists() {
                    return Err(anyhow!("Config file {} does not exist", p));
                }
                builder = builder.add_source(config::File::with_name(p.as_str()));
            }
            None => {
                if let Some(p) = Self::config_file_path() {
                    if Path::new(p.as_str()).exists() {
                        builder = builder.add_source(config::File::with_name(p.as_str()));
                    }
                }
            }
        }

        // Add in settings from the environment (with a prefix of RIPEQ)
        // E.g., `RIPEQ_PAGE_SIZE=50 ./ripeq -q ...` would fetch 50 results per request
        builder = builder.add_source(config::Environment::with_prefix("RIPEQ"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        Self::from_map(&config)
    }

    /// Build the configuration out of already collected key/value settings
    pub fn from_map(settings: &HashMap<String, String>) -> Result<RipeqConfig> {
        let api_url = settings
            .get("api_url")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let page_size = match settings.get("page_size") {
            Some(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|e| anyhow!("Invalid page_size '{}': {}", s, e))?,
            None => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            return Err(anyhow!("page_size must be at least 1"));
        }

        Ok(RipeqConfig { api_url, page_size })
    }

    /// Default config file location, `$HOME/.ripeq/ripeq.toml`
    pub fn config_file_path() -> Option<String> {
        dirs::home_dir().map(|h| format!("{}/.ripeq/ripeq.toml", h.to_string_lossy()))
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        [
            format!("API URL:     {}", self.api_url),
            format!("Page Size:   {}", self.page_size),
        ]
        .join("\n")
    }
}
