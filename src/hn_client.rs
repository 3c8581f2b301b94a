use reqwest::blocking::Client;

use crate::config::Config;
use crate::error::SearchError;
use crate::models::ResultPage;

/// The search endpoint as seen by the controller. Implementations are moved
/// onto a worker thread for each fetch.
pub trait SearchApi: Clone + Send + 'static {
    fn search(&self, term: &str, page: u32) -> Result<ResultPage, SearchError>;
}

#[derive(Clone)]
pub struct HackerNewsClient {
    client: Client,
    base_url: String,
    hits_per_page: u32,
}

impl HackerNewsClient {
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            hits_per_page: config.hits_per_page,
        })
    }

    pub fn search_url(&self, term: &str, page: u32) -> String {
        format!(
            "{}/search?query={}&page={}&hitsPerPage={}",
            self.base_url,
            urlencoding::encode(term),
            page,
            self.hits_per_page
        )
    }
}

impl SearchApi for HackerNewsClient {
    fn search(&self, term: &str, page: u32) -> Result<ResultPage, SearchError> {
        let url = self.search_url(term, page);
        tracing::debug!(%url, "requesting search page");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        // Read the body first so a bad shape is reported as a decode error
        let body = response.text()?;
        let result: ResultPage = serde_json::from_str(&body)?;

        tracing::debug!(term, page = result.page, hits = result.hits.len(), "search page received");
        Ok(result)
    }
}
