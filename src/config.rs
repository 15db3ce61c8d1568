use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Desktop Chrome identity; many recipe sites block or degrade non-browser clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main extractor configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractorConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User-Agent header sent with every page and image request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Where downloaded recipe images go
    #[serde(default)]
    pub images: ImagesConfig,
}

/// Configuration for the local image store
#[derive(Debug, Deserialize, Clone)]
pub struct ImagesConfig {
    /// Directory images are written to
    #[serde(default = "default_images_dir")]
    pub dir: String,
    /// Prefix of the path returned for a stored image
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            dir: default_images_dir(),
            public_prefix: default_public_prefix(),
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            images: ImagesConfig::default(),
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_images_dir() -> String {
    "images".to_string()
}

fn default_public_prefix() -> String {
    "/images".to_string()
}

impl ExtractorConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_CATALOG__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_CATALOG__IMAGES__DIR
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`ExtractorConfig::load`] for the priority order.
pub fn load_config() -> Result<ExtractorConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_CATALOG__IMAGES__DIR
        .add_source(
            Environment::with_prefix("RECIPE_CATALOG")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
