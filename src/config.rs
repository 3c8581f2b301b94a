use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://hn.algolia.com/api/v1";
pub const DEFAULT_HITS_PER_PAGE: u32 = 50;
pub const DEFAULT_QUERY: &str = "";

/// Settings for talking to the search API.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub hits_per_page: u32,
    pub timeout: Duration,
    /// Term searched once at startup
    pub default_query: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            hits_per_page: DEFAULT_HITS_PER_PAGE,
            timeout: Duration::from_secs(30),
            default_query: DEFAULT_QUERY.to_string(),
        }
    }
}
