use crate::errors::CoreError;
use crate::extractor::fetch::PRICE_PAGE_URL;
use crate::storage::remote::RemoteConfig;

/// Environment variable holding the portfolio access password.
pub const ACCESS_PASSWORD_ENV: &str = "GOLD_ACCESS_PASSWORD";

/// Environment variable holding the snapshot encryption passphrase.
pub const STORAGE_PASSPHRASE_ENV: &str = "GOLD_STORAGE_PASSPHRASE";

/// Environment variable overriding the price source page URL.
pub const PRICE_URL_ENV: &str = "GOLD_PRICE_URL";

/// Environment variable enabling price-history points for manual updates.
pub const MANUAL_HISTORY_ENV: &str = "GOLD_RECORD_MANUAL_PRICE_HISTORY";

/// All injected configuration for the tracker.
///
/// Secrets come from the environment, never from source literals, and the
/// access password is deliberately distinct from the encryption passphrase.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Password gating the portfolio view
    pub access_password: String,

    /// Passphrase the snapshot encryption key is derived from
    pub storage_passphrase: String,

    /// Remote content API coordinates and credential
    pub remote: RemoteConfig,

    /// Page the reference price is scraped from
    pub price_url: String,

    /// Whether manual price updates also append to the price history.
    /// The automatic extraction path always records history.
    pub record_manual_price_history: bool,
}

impl TrackerConfig {
    /// Assemble configuration from the environment. The access password
    /// and storage passphrase are required; the remote credential is
    /// checked lazily by the store so read-only flows can start without it.
    pub fn from_env() -> Result<Self, CoreError> {
        let access_password = require_env(ACCESS_PASSWORD_ENV)?;
        let storage_passphrase = require_env(STORAGE_PASSPHRASE_ENV)?;

        let price_url =
            std::env::var(PRICE_URL_ENV).unwrap_or_else(|_| PRICE_PAGE_URL.to_string());

        let record_manual_price_history = std::env::var(MANUAL_HISTORY_ENV)
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            access_password,
            storage_passphrase,
            remote: RemoteConfig::from_env(),
            price_url,
            record_manual_price_history,
        })
    }
}

fn require_env(name: &str) -> Result<String, CoreError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CoreError::Config(format!("{name} is not set")))
}
