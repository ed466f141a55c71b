use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A successfully extracted gold price with its provenance.
///
/// Matches the JSON payload of the price endpoint:
/// `{success, price, karat, currency, unit, city, timestamp, source}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Price per unit mass, in the quoted currency
    pub price: f64,

    /// Purity grade, e.g. "22K"
    pub karat: String,

    /// ISO currency code, e.g. "INR"
    pub currency: String,

    /// Unit of mass the price applies to, e.g. "gram"
    pub unit: String,

    /// City the quote is published for
    pub city: String,

    /// When the quote was extracted
    pub timestamp: DateTime<Utc>,

    /// Hostname of the source page
    pub source: String,
}
