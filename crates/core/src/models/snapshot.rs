use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::GoldEntry;

/// Fallback reference price per gram (INR) used when no snapshot exists yet.
pub const DEFAULT_GOLD_PRICE: f64 = 6500.0;

/// Maximum number of retained price-history points (one year of daily data).
pub const PRICE_HISTORY_CAP: usize = 365;

/// One recorded reference-price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistoryPoint {
    /// Calendar day of the observation
    pub date: NaiveDate,

    /// Reference price per gram on that day
    pub price: f64,

    /// Exact moment the observation was recorded
    pub timestamp: DateTime<Utc>,
}

/// The complete persisted state — the sole unit of persistence.
///
/// Exactly one snapshot exists per user; it is loaded whole and overwritten
/// whole on every save. There are no partial updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldData {
    /// All purchase records, in insertion order.
    /// Date ordering is a display-time concern (`entries_by_date_desc`).
    pub entries: Vec<GoldEntry>,

    /// Current reference price per gram used to value all holdings
    pub current_gold_price: f64,

    /// When the reference price was last updated
    pub last_updated: DateTime<Utc>,

    /// Recent reference-price observations, capped at `PRICE_HISTORY_CAP`
    #[serde(default)]
    pub price_history: Vec<PriceHistoryPoint>,
}

impl GoldData {
    /// Fresh snapshot with the fallback reference price and no entries.
    pub fn with_defaults(now: DateTime<Utc>) -> Self {
        Self {
            entries: Vec::new(),
            current_gold_price: DEFAULT_GOLD_PRICE,
            last_updated: now,
            price_history: Vec::new(),
        }
    }

    /// Entries sorted newest-first for display. Does not reorder storage.
    #[must_use]
    pub fn entries_by_date_desc(&self) -> Vec<&GoldEntry> {
        let mut entries: Vec<&GoldEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// Find an entry by its identifier.
    #[must_use]
    pub fn find_entry(&self, id: Uuid) -> Option<&GoldEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Record a reference-price observation.
    ///
    /// A second observation on the same calendar day replaces the first,
    /// so the history holds at most one point per day. Oldest points are
    /// dropped once the cap is reached.
    pub fn push_history(&mut self, price: f64, now: DateTime<Utc>) {
        let day = now.date_naive();
        let point = PriceHistoryPoint {
            date: day,
            price,
            timestamp: now,
        };

        if let Some(existing) = self.price_history.iter_mut().find(|p| p.date == day) {
            *existing = point;
            return;
        }

        self.price_history.push(point);
        if self.price_history.len() > PRICE_HISTORY_CAP {
            let excess = self.price_history.len() - PRICE_HISTORY_CAP;
            self.price_history.drain(..excess);
        }
    }
}

impl Default for GoldData {
    fn default() -> Self {
        Self::with_defaults(Utc::now())
    }
}
