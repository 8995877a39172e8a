//! Adapter for the remote saved-link source.

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::types::{ExportError, LinkRecord};

/// Default base of the Curius public API.
pub const DEFAULT_BASE_URL: &str = "https://curius.app/api/";

#[derive(Debug, Deserialize)]
struct SearchLinksResponse {
    #[serde(default)]
    links: Vec<LinkRecord>,
}

/// Fetches a user's saved links from the Curius API.
///
/// One GET per run, no retries, no pagination beyond what the endpoint
/// returns in a single response.
#[derive(Clone, Debug)]
pub struct CuriusSource {
    client: Client,
    base_url: Url,
}

impl CuriusSource {
    /// Creates a source against the public Curius API.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }

    /// Overrides the API base URL (primarily for tests against a mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    fn links_url(&self, user_id: u64) -> Result<Url, ExportError> {
        self.base_url
            .join(&format!("users/{user_id}/searchLinks"))
            .map_err(|err| ExportError::InvalidUserId(err.to_string()))
    }

    /// Fetches the full link set for `user_id`.
    ///
    /// Failure is explicit: a non-2xx status or transport error surfaces as
    /// an [`ExportError`] so callers can distinguish "fetch failed" from
    /// "user has zero links". Use [`fetch_or_empty`](Self::fetch_or_empty)
    /// when the conflated behavior is wanted.
    pub async fn fetch(&self, user_id: u64) -> Result<Vec<LinkRecord>, ExportError> {
        let url = self.links_url(user_id)?;
        let response = self
            .client
            .get(url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(ExportError::SourceTransport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::SourceStatus {
                status: status.as_u16(),
            });
        }

        let body: SearchLinksResponse =
            response.json().await.map_err(ExportError::SourceTransport)?;
        tracing::info!(user_id, links = body.links.len(), "fetched link collection");
        Ok(body.links)
    }

    /// Fetches links, logging and swallowing failures as an empty set.
    ///
    /// An empty result here means "no data, possibly due to failure", never
    /// a confirmed zero-link collection.
    pub async fn fetch_or_empty(&self, user_id: u64) -> Vec<LinkRecord> {
        match self.fetch(user_id).await {
            Ok(links) => links,
            Err(err) => {
                tracing::error!(user_id, error = %err, "failed to fetch links");
                Vec::new()
            }
        }
    }
}

/// Parses a textual user identifier into the numeric id the API expects.
pub fn parse_user_id(raw: &str) -> Result<u64, ExportError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ExportError::InvalidUserId(raw.to_string()))
}
