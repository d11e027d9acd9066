use serde::Deserialize;

use super::ClientError;
use crate::models::SavedBook;

pub const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com";
const NO_AUTHOR: &str = "No author to display";

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: String,
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    #[serde(default)]
    title: String,
    authors: Option<Vec<String>>,
    description: Option<String>,
    image_links: Option<ImageLinks>,
    info_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl From<Volume> for SavedBook {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;
        SavedBook {
            book_id: volume.id,
            authors: info
                .authors
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| vec![NO_AUTHOR.to_string()]),
            description: Some(info.description.unwrap_or_default()),
            title: info.title,
            image: info.image_links.and_then(|links| links.thumbnail),
            link: info.info_link,
        }
    }
}

/// Search against the public Google Books volumes API
#[derive(Clone)]
pub struct GoogleBooksClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for GoogleBooksClient {
    fn default() -> Self {
        Self::new(GOOGLE_BOOKS_URL)
    }
}

impl GoogleBooksClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Volumes matching `query`, mapped to the shape `saveBook` accepts.
    /// A blank query returns no results without a request.
    pub async fn search(&self, query: &str) -> Result<Vec<SavedBook>, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let response: VolumesResponse = self
            .http
            .get(format!("{}/books/v1/volumes", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.items.into_iter().map(SavedBook::from).collect())
    }
}
