use serde::{Deserialize, Deserializer};

/// Cache key for accumulated results. Compared by exact string equality.
pub type SearchTerm = String;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HackerNewsItem {
    #[serde(rename = "objectID")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_comments: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: i64,
}

impl HackerNewsItem {
    // Link to open when the title is clicked; Ask HN posts have no url
    pub fn link(&self) -> String {
        if self.url.is_empty() {
            format!("https://news.ycombinator.com/item?id={}", self.id)
        } else {
            self.url.clone()
        }
    }
}

/// One page of search results as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResultPage {
    pub page: u32,
    pub hits: Vec<HackerNewsItem>,
    /// Total pages for the query, when the API reports it
    #[serde(rename = "nbPages", default)]
    pub nb_pages: Option<u32>,
}

// Algolia sends explicit nulls for missing fields on some records
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) fn test_item(id: &str, title: &str) -> HackerNewsItem {
    HackerNewsItem {
        id: id.to_string(),
        title: title.to_string(),
        url: format!("https://example.com/{}", id),
        author: "pg".to_string(),
        num_comments: 3,
        points: 10,
    }
}
