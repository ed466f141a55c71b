use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::entry::{EntryInput, GoldEntry};
use crate::models::snapshot::GoldData;

/// Manages the entry list and the reference price inside a snapshot.
///
/// Pure business logic — no I/O, no network. Persistence is the facade's
/// concern.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Validate and append a new purchase. Derived fields are computed here
    /// and frozen into the stored record.
    pub fn add_entry(
        &self,
        snapshot: &mut GoldData,
        input: EntryInput,
    ) -> Result<GoldEntry, CoreError> {
        Self::validate_input(&input)?;
        let entry = GoldEntry::from_input(Uuid::new_v4(), input);
        snapshot.entries.push(entry.clone());
        Ok(entry)
    }

    /// Replace an existing purchase wholesale. The identifier is reused and
    /// both derived fields are re-derived from the new input — entries are
    /// never partially mutated in place.
    pub fn update_entry(
        &self,
        snapshot: &mut GoldData,
        id: Uuid,
        input: EntryInput,
    ) -> Result<GoldEntry, CoreError> {
        Self::validate_input(&input)?;
        let slot = snapshot
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()))?;
        let entry = GoldEntry::from_input(id, input);
        *slot = entry.clone();
        Ok(entry)
    }

    /// Remove a purchase by identifier. Returns the removed record.
    pub fn delete_entry(&self, snapshot: &mut GoldData, id: Uuid) -> Result<GoldEntry, CoreError> {
        let idx = snapshot
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()))?;
        Ok(snapshot.entries.remove(idx))
    }

    /// Shared price-update path for both the extraction flow and manual
    /// entry. Updates the reference price and the last-updated timestamp;
    /// appends a history point when `record_history` is set.
    pub fn set_price(
        &self,
        snapshot: &mut GoldData,
        price: f64,
        now: DateTime<Utc>,
        record_history: bool,
    ) -> Result<(), CoreError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(CoreError::validation(
                "price",
                format!("reference price must be a positive number, got {price}"),
            ));
        }

        snapshot.current_gold_price = price;
        snapshot.last_updated = now;
        if record_history {
            snapshot.push_history(price, now);
        }
        Ok(())
    }

    /// Per-field validation, mirroring the submission form rules:
    /// base price > 0, extra charges ≥ 0, mass > 0, all finite.
    fn validate_input(input: &EntryInput) -> Result<(), CoreError> {
        if !input.price_per_gram.is_finite() || input.price_per_gram <= 0.0 {
            return Err(CoreError::validation(
                "price_per_gram",
                "price must be positive",
            ));
        }
        if !input.extra_charges_per_gram.is_finite() || input.extra_charges_per_gram < 0.0 {
            return Err(CoreError::validation(
                "extra_charges_per_gram",
                "extra charges cannot be negative",
            ));
        }
        if !input.total_grams.is_finite() || input.total_grams <= 0.0 {
            return Err(CoreError::validation(
                "total_grams",
                "weight must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
