pub mod http;
pub mod wire;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::Page;

pub use http::HttpCatalog;

/// Failures from the remote catalog. All variants are recoverable from the
/// caller's perspective: no retry happens at this layer, the user decides.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("server returned status {status}")]
    ServerError { status: u16 },

    #[error("request timed out")]
    Timeout,

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else if let Some(status) = err.status() {
            CatalogError::ServerError {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            CatalogError::Malformed(err.to_string())
        } else {
            CatalogError::NetworkUnavailable(err.to_string())
        }
    }
}

/// Access to the remote paginated catalog. Page size and the adult-content
/// exclusion flag are construction-time constants of the implementation,
/// not per-call parameters.
#[async_trait]
pub trait CatalogClient {
    /// Fetch one page of the top list.
    async fn top(&self, page: u32) -> Result<Page, CatalogError>;

    /// Fetch one page of search results for `query`.
    async fn search(&self, page: u32, query: &str) -> Result<Page, CatalogError>;
}

/// Remote catalog settings, loaded from the `[catalog]` config section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub page_size: usize,
    /// Exclude adult content from all requests.
    pub sfw: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: http::DEFAULT_BASE_URL.to_string(),
            page_size: http::DEFAULT_PAGE_SIZE,
            sfw: true,
        }
    }
}
