use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::catalog::wire::ListEnvelope;
use crate::catalog::{CatalogClient, CatalogConfig, CatalogError};
use crate::domain::Page;

pub const DEFAULT_BASE_URL: &str = "https://api.jikan.moe/v4";
pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct HttpCatalog {
    client: Client,
    base_url: Url,
    page_size: usize,
    sfw: bool,
}

impl HttpCatalog {
    pub fn new() -> Result<Self, url::ParseError> {
        Self::with_config(&CatalogConfig::default())
    }

    pub fn with_config(config: &CatalogConfig) -> Result<Self, url::ParseError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .user_agent("mikan/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            page_size: config.page_size,
            sfw: config.sfw,
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("catalog base URL cannot be a base")
            .pop_if_empty()
            .extend(path.split('/'));
        url
    }

    async fn get_page(&self, mut url: Url, page: u32) -> Result<Page, CatalogError> {
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &self.page_size.to_string());
        if self.sfw {
            url.query_pairs_mut().append_pair("sfw", "true");
        }

        tracing::debug!(%url, "requesting catalog page");

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;

        let envelope: ListEnvelope = response
            .json()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))?;

        Ok(envelope.into_page(page, self.page_size))
    }
}

#[async_trait]
impl CatalogClient for HttpCatalog {
    async fn top(&self, page: u32) -> Result<Page, CatalogError> {
        self.get_page(self.endpoint("top/anime"), page).await
    }

    async fn search(&self, page: u32, query: &str) -> Result<Page, CatalogError> {
        let mut url = self.endpoint("anime");
        url.query_pairs_mut().append_pair("q", query);
        self.get_page(url, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_paths() {
        let catalog = HttpCatalog::new().unwrap();
        assert_eq!(
            catalog.endpoint("top/anime").as_str(),
            "https://api.jikan.moe/v4/top/anime"
        );
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let config = CatalogConfig {
            base_url: "https://api.jikan.moe/v4/".into(),
            ..CatalogConfig::default()
        };
        let catalog = HttpCatalog::with_config(&config).unwrap();
        assert_eq!(
            catalog.endpoint("anime").as_str(),
            "https://api.jikan.moe/v4/anime"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = CatalogConfig {
            base_url: "not a url".into(),
            ..CatalogConfig::default()
        };
        assert!(HttpCatalog::with_config(&config).is_err());
    }
}
