use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::PriceQuote;

/// Trait abstraction over the current-price source.
///
/// The production implementation scrapes a public HTML page; tests swap in
/// a mock. If the source page changes or a proper API appears, only the
/// implementation behind this trait is touched.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the current reference price, or fail with
    /// `CoreError::Network` / `CoreError::PriceNotFound`.
    async fn fetch_current_price(&self) -> Result<PriceQuote, CoreError>;
}
