use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single gold purchase record.
///
/// **Important**: `effective_price_per_gram` and `total_investment` are
/// derived once when the entry is written and stored frozen. They are NOT
/// recomputed on read — editing the base price or extra charges replaces
/// the whole record and re-derives both fields.
///
/// Serialized with camelCase field names for compatibility with the legacy
/// JSON representation of the same data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldEntry {
    /// Unique identifier, reused across edits of the same purchase
    pub id: Uuid,

    /// Purchase date (daily granularity)
    pub date: NaiveDate,

    /// Base market price per gram at purchase time
    pub price_per_gram: f64,

    /// Making charges, GST, and other additional costs per gram
    pub extra_charges_per_gram: f64,

    /// Frozen: `price_per_gram + extra_charges_per_gram`
    pub effective_price_per_gram: f64,

    /// Total mass purchased, in grams
    pub total_grams: f64,

    /// Frozen: `effective_price_per_gram * total_grams`
    pub total_investment: f64,

    /// Optional free-text notes (e.g., "22k coins", "jewelry")
    #[serde(default)]
    pub notes: Option<String>,
}

/// The shape of a user submission — everything except the identifier and
/// the derived fields. Validated by `PortfolioService` before it becomes
/// a `GoldEntry`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryInput {
    pub date: NaiveDate,
    pub price_per_gram: f64,
    pub extra_charges_per_gram: f64,
    pub total_grams: f64,
    pub notes: Option<String>,
}

impl GoldEntry {
    /// Build an entry from validated input, deriving the frozen fields.
    /// `id` is fresh for a new purchase or reused when editing.
    pub fn from_input(id: Uuid, input: EntryInput) -> Self {
        let effective_price_per_gram = input.price_per_gram + input.extra_charges_per_gram;
        let total_investment = effective_price_per_gram * input.total_grams;
        Self {
            id,
            date: input.date,
            price_per_gram: input.price_per_gram,
            extra_charges_per_gram: input.extra_charges_per_gram,
            effective_price_per_gram,
            total_grams: input.total_grams,
            total_investment,
            notes: input.notes,
        }
    }
}
