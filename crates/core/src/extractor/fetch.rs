use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION, PRAGMA, USER_AGENT};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::quote::PriceQuote;

use super::strategies::{default_strategies, ExtractionStrategy};
use super::traits::PriceSource;

/// The fixed public page the price is scraped from.
pub const PRICE_PAGE_URL: &str = "https://www.bankbazaar.com/gold-rate-coimbatore.html";

/// Bound on the page fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

const QUOTE_KARAT: &str = "22K";
const QUOTE_CURRENCY: &str = "INR";
const QUOTE_UNIT: &str = "gram";
const QUOTE_CITY: &str = "Coimbatore";
const QUOTE_SOURCE: &str = "bankbazaar.com";

/// Fetches the source page and runs the extraction cascade over it.
///
/// No side effects beyond the network read — persistence is the caller's
/// concern.
pub struct PriceExtractor {
    client: Client,
    url: String,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl PriceExtractor {
    pub fn new(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            url: url.into(),
            strategies: default_strategies(),
        }
    }

    /// Run the cascade over raw HTML. Pure apart from logging — fixture
    /// tests drive this directly.
    pub fn extract_price(&self, html: &str) -> Result<f64, CoreError> {
        let doc = Html::parse_document(html);
        for strategy in &self.strategies {
            match strategy.extract(&doc) {
                Some(price) => {
                    debug!(strategy = strategy.name(), price, "extracted gold price");
                    return Ok(price);
                }
                None => {
                    debug!(strategy = strategy.name(), "strategy found no price, falling back");
                }
            }
        }
        warn!("extraction cascade exhausted without a match");
        Err(CoreError::PriceNotFound)
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new(PRICE_PAGE_URL)
    }
}

#[async_trait]
impl PriceSource for PriceExtractor {
    fn name(&self) -> &str {
        QUOTE_SOURCE
    }

    async fn fetch_current_price(&self) -> Result<PriceQuote, CoreError> {
        let response = self
            .client
            .get(&self.url)
            .headers(browser_headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Network(format!(
                "price source returned HTTP {status}"
            )));
        }

        let body = response.text().await?;
        let price = self.extract_price(&body)?;

        Ok(PriceQuote {
            price,
            karat: QUOTE_KARAT.to_string(),
            currency: QUOTE_CURRENCY.to_string(),
            unit: QUOTE_UNIT.to_string(),
            city: QUOTE_CITY.to_string(),
            timestamp: Utc::now(),
            source: QUOTE_SOURCE.to_string(),
        })
    }
}

/// Realistic browser-identifying headers. The source page serves different
/// markup (or a block page) to clients that look like bots.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert("DNT", HeaderValue::from_static("1"));
    headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));
    headers
}
