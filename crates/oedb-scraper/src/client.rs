//! HTTP client for the parts catalog's OE lookup pages.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;

use crate::error::ScrapeError;
use crate::types::RawPage;

/// HTTP client for catalog listing and product detail pages.
///
/// One GET per call, no internal retries: the variant loop upstream is the
/// retry mechanism, and every fetch error is recoverable there. 404 and
/// other non-2xx statuses come back as typed errors.
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the OE listing page for one query variant.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::NotFound`] — HTTP 404; the variant has no listing.
    /// - [`ScrapeError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScrapeError::Http`] — network or timeout failure.
    pub async fn fetch_listing(
        &self,
        base_url: &str,
        variant: &str,
    ) -> Result<RawPage, ScrapeError> {
        let url = Self::lookup_url(base_url, variant);
        self.fetch_page(&url).await
    }

    /// Fetches an arbitrary absolute URL (used for product detail pages).
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`CatalogClient::fetch_listing`].
    pub async fn fetch_page(&self, url: &str) -> Result<RawPage, ScrapeError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScrapeError::NotFound {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await?;
        Ok(RawPage {
            url: final_url,
            body,
        })
    }

    /// Builds the OE lookup URL for one variant.
    ///
    /// Whitespace and hyphens are stripped here, at URL-construction time: a
    /// variant may intentionally carry formatting characters for matching
    /// against page text, but the URL path must be bare.
    #[must_use]
    pub fn lookup_url(base_url: &str, variant: &str) -> String {
        let bare: String = variant
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        let encoded = utf8_percent_encode(&bare, NON_ALPHANUMERIC);
        format!("{}/oe/{encoded}", base_url.trim_end_matches('/'))
    }
}
