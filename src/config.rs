use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub content_api: ContentApiConfig,
    #[serde(default)]
    pub culture_zine: CultureZineConfig,
    #[serde(default)]
    pub curated_collections: CuratedCollectionsConfig,
    #[serde(default)]
    pub apps_we_love: AppsWeLoveConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentApiConfig {
    #[serde(default = "default_content_api_base")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    /// `limit` sent with every listing request.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

fn default_content_api_base() -> String {
    "https://api.glitch.com".to_string()
}
fn default_timeout_ms() -> u64 { 5000 }
fn default_page_limit() -> u32 { 100 }

impl Default for ContentApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_content_api_base(),
            request_timeout_ms: default_timeout_ms(),
            page_limit: default_page_limit(),
        }
    }
}

impl ContentApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// The external zine (Ghost content API) that supplies featured posts.
#[derive(Debug, Deserialize, Clone)]
pub struct CultureZineConfig {
    #[serde(default = "default_zine_base")]
    pub base_url: String,
    #[serde(default = "default_zine_posts_path")]
    pub posts_path: String,
    #[serde(default = "default_zine_client_id")]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_zine_post_limit")]
    pub post_limit: u32,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_zine_base() -> String {
    "https://culture-zine.glitch.me".to_string()
}
fn default_zine_posts_path() -> String {
    "/culture/ghost/api/v0.1/posts/".to_string()
}
fn default_zine_client_id() -> String {
    "ghost-frontend".to_string()
}
fn default_zine_post_limit() -> u32 { 4 }

impl Default for CultureZineConfig {
    fn default() -> Self {
        Self {
            base_url: default_zine_base(),
            posts_path: default_zine_posts_path(),
            client_id: default_zine_client_id(),
            client_secret: String::new(),
            post_limit: default_zine_post_limit(),
            request_timeout_ms: default_timeout_ms(),
        }
    }
}

impl CultureZineConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CuratedCollectionsConfig {
    /// Stop collecting avatars once more than this many distinct users are known.
    #[serde(default = "default_collection_max_users")]
    pub max_users: usize,
    /// Decorative styles handed out by position when a descriptor has none.
    #[serde(default = "default_collection_styles")]
    pub styles: Vec<String>,
}

fn default_collection_max_users() -> usize { 5 }
fn default_collection_styles() -> Vec<String> {
    ["wavey", "diagonal", "triangle"].iter().map(|s| s.to_string()).collect()
}

impl Default for CuratedCollectionsConfig {
    fn default() -> Self {
        Self {
            max_users: default_collection_max_users(),
            styles: default_collection_styles(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppsWeLoveConfig {
    /// Size of the single users page requested per project.
    #[serde(default = "default_apps_user_page_limit")]
    pub user_page_limit: u32,
    #[serde(default = "default_apps_max_users")]
    pub max_users: usize,
}

fn default_apps_user_page_limit() -> u32 { 100 }
fn default_apps_max_users() -> usize { 10 }

impl Default for AppsWeLoveConfig {
    fn default() -> Self {
        Self {
            user_page_limit: default_apps_user_page_limit(),
            max_users: default_apps_max_users(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Base document authored in the editor.
    #[serde(default = "default_home_document")]
    pub home_document: PathBuf,
    /// Where the aggregated payload is published.
    #[serde(default = "default_payload")]
    pub payload: PathBuf,
}

fn default_home_document() -> PathBuf {
    PathBuf::from("dist/home.json")
}
fn default_payload() -> PathBuf {
    PathBuf::from("dist/home-data.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            home_document: default_home_document(),
            payload: default_payload(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .with_context(|| "Failed to parse config TOML")?;
        if config.curated_collections.styles.is_empty() {
            anyhow::bail!("curated_collections.styles must list at least one style");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses() {
        let config = Config::load(Path::new("config.toml")).unwrap();
        assert_eq!(config.content_api.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.content_api.page_limit, 100);
        assert_eq!(config.culture_zine.post_limit, 4);
        assert_eq!(config.curated_collections.max_users, 5);
        assert_eq!(config.curated_collections.styles[0], "wavey");
        assert_eq!(config.apps_we_love.max_users, 10);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.content_api.base_url, "https://api.glitch.com");
        assert_eq!(config.culture_zine.request_timeout_ms, 5000);
        assert_eq!(config.curated_collections.styles, vec!["wavey", "diagonal", "triangle"]);
        assert_eq!(config.apps_we_love.user_page_limit, 100);
        assert_eq!(config.output.payload, PathBuf::from("dist/home-data.json"));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::parse("[content_api]\nrequest_timeout_ms = 250\n").unwrap();
        assert_eq!(config.content_api.request_timeout(), Duration::from_millis(250));
        assert_eq!(config.content_api.page_limit, 100);
    }

    #[test]
    fn test_empty_style_palette_is_rejected() {
        assert!(Config::parse("[curated_collections]\nstyles = []\n").is_err());
    }
}
