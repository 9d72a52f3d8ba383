use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use url::Url;

use crate::config::AppConfig;
use crate::{Error, Result};

const MAX_FEED_BYTES: usize = 5 * 1024 * 1024;

// Fixed browser-like User-Agent; several feed providers reject the
// default library UA outright.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// HTTP fetcher for feed endpoints.
///
/// Failures never propagate to the pipeline: any network, status or
/// decode problem is logged and surfaces as empty content, so one dead
/// source degrades the digest instead of aborting the run. No retries.
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.content.request_timeout_secs))
            .default_headers(Self::build_headers())
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client })
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,application/rss+xml,application/atom+xml,text/csv,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers
    }

    /// Fetch a URL and return its body as text. Returns an empty string
    /// on any failure.
    pub async fn fetch_text(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Error fetching {}: {}", url, e);
                String::new()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String> {
        Url::parse(url)?;

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::FeedParse(format!("HTTP {} for URL: {}", status, url)));
        }

        let body = response.text().await?;
        if body.len() > MAX_FEED_BYTES {
            return Err(Error::FeedParse(format!(
                "Response too large ({} bytes) for URL: {}",
                body.len(),
                url
            )));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_yields_empty_content() {
        let fetcher = FeedFetcher::new(&AppConfig::default()).unwrap();
        assert_eq!(fetcher.fetch_text("not a url").await, "");
    }

    #[test]
    fn test_headers_carry_browser_user_agent() {
        let headers = FeedFetcher::build_headers();
        let ua = headers.get(USER_AGENT).unwrap().to_str().unwrap();
        assert!(ua.contains("Mozilla/5.0"));
        assert!(ua.contains("Chrome"));
    }
}
