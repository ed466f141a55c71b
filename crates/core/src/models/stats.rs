use serde::{Deserialize, Serialize};

/// Mass of one standard gold coin, in grams.
pub const COIN_GRAMS: f64 = 8.0;

/// Accumulation target, in coins.
pub const TARGET_COINS: u64 = 100;

/// Aggregate investment figures derived from the current entry list and
/// reference price. Never persisted — recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    /// Sum of entry masses, in grams
    pub total_grams: f64,

    /// Sum of entries' frozen `total_investment` values
    pub total_investment: f64,

    /// `total_grams * current reference price`
    pub current_value: f64,

    /// `current_value - total_investment`
    pub profit_loss: f64,

    /// `profit_loss / total_investment * 100`, or 0 when nothing is invested
    pub profit_loss_percentage: f64,
}

impl PortfolioStats {
    /// Whole coins currently owned.
    #[must_use]
    pub fn owned_coins(&self) -> u64 {
        (self.total_grams / COIN_GRAMS).floor() as u64
    }

    /// Whole coins remaining to reach the target.
    #[must_use]
    pub fn coins_to_target(&self) -> u64 {
        TARGET_COINS.saturating_sub(self.owned_coins())
    }

    /// Grams remaining to reach the target mass.
    #[must_use]
    pub fn grams_to_target(&self) -> f64 {
        (TARGET_COINS as f64 * COIN_GRAMS - self.total_grams).max(0.0)
    }

    /// Money needed to buy the remaining whole coins at the given price.
    #[must_use]
    pub fn amount_needed(&self, current_price: f64) -> f64 {
        self.coins_to_target() as f64 * COIN_GRAMS * current_price
    }
}

/// Valuation of a single entry at the current reference price, for display
/// next to its frozen purchase figures.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryValuation {
    pub current_value: f64,
    pub profit_loss: f64,
    pub profit_loss_percentage: f64,
}
