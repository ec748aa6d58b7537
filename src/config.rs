use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON movie catalog; the bundled sample catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// JSON rating profiles; the bundled sample ratings are used when unset
    #[serde(default)]
    pub ratings_path: Option<PathBuf>,

    /// Number of recommendations returned when a request does not say
    #[serde(default = "default_recommendation_count")]
    pub default_recommendation_count: usize,

    /// Number of movies offered to a new user for rating
    #[serde(default = "default_rating_sample_size")]
    pub rating_sample_size: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_recommendation_count() -> usize {
    5
}

fn default_rating_sample_size() -> usize {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: None,
            ratings_path: None,
            default_recommendation_count: default_recommendation_count(),
            rating_sample_size: default_rating_sample_size(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
