use crate::models::entry::GoldEntry;
use crate::models::snapshot::GoldData;
use crate::models::stats::{EntryValuation, PortfolioStats};

/// Derives aggregate investment figures from the entry list and the
/// current reference price. Pure functions over the snapshot — nothing
/// here is persisted.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate statistics per the portfolio formulas:
    /// total mass, total investment (sum of frozen per-entry investments),
    /// current value at the reference price, and profit/loss. The
    /// percentage is zero when nothing is invested — no divide-by-zero
    /// leaks out.
    #[must_use]
    pub fn portfolio_stats(&self, snapshot: &GoldData) -> PortfolioStats {
        let total_grams: f64 = snapshot.entries.iter().map(|e| e.total_grams).sum();
        let total_investment: f64 = snapshot.entries.iter().map(|e| e.total_investment).sum();
        let current_value = total_grams * snapshot.current_gold_price;
        let profit_loss = current_value - total_investment;
        let profit_loss_percentage = if total_investment > 0.0 {
            profit_loss / total_investment * 100.0
        } else {
            0.0
        };

        PortfolioStats {
            total_grams,
            total_investment,
            current_value,
            profit_loss,
            profit_loss_percentage,
        }
    }

    /// Valuation of one entry at the given reference price, for display
    /// alongside its frozen purchase figures.
    #[must_use]
    pub fn entry_valuation(&self, entry: &GoldEntry, current_price: f64) -> EntryValuation {
        let current_value = entry.total_grams * current_price;
        let profit_loss = current_value - entry.total_investment;
        let profit_loss_percentage = if entry.total_investment > 0.0 {
            profit_loss / entry.total_investment * 100.0
        } else {
            0.0
        };

        EntryValuation {
            current_value,
            profit_loss,
            profit_loss_percentage,
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
