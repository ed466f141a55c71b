use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::models::entry::GoldEntry;
use crate::models::snapshot::{GoldData, DEFAULT_GOLD_PRICE};

/// Legacy flat key holding the JSON-encoded entry array.
pub const LEGACY_ENTRIES_KEY: &str = "goldEntries";

/// Legacy flat key holding the reference price as a decimal string.
pub const LEGACY_PRICE_KEY: &str = "currentGoldPrice";

/// Flat string key/value storage — the shape of the legacy local store
/// the unencrypted data migrates out of.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory `KeyValueStore`, used in tests and by callers with no legacy
/// data to migrate.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.map.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }
}

/// One-time migration of the legacy unencrypted representation.
///
/// Assembles a snapshot from whichever of the two legacy keys are present,
/// defaulting the rest, then deletes the keys. The caller is responsible
/// for persisting the returned snapshot. Idempotent: once the keys are
/// gone, every subsequent call returns `None`.
///
/// An unparseable entry payload aborts the migration without deleting
/// anything, so the data stays available for manual recovery.
pub fn migrate_legacy(store: &mut dyn KeyValueStore, now: DateTime<Utc>) -> Option<GoldData> {
    let raw_entries = store.get(LEGACY_ENTRIES_KEY);
    let raw_price = store.get(LEGACY_PRICE_KEY);

    if raw_entries.is_none() && raw_price.is_none() {
        return None;
    }

    let entries: Vec<GoldEntry> = match raw_entries {
        Some(json) => match serde_json::from_str(&json) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "legacy entry payload is unparseable — leaving it in place");
                return None;
            }
        },
        None => Vec::new(),
    };

    let current_gold_price = raw_price
        .as_deref()
        .and_then(|p| {
            p.trim().parse::<f64>().map_err(|e| {
                warn!(error = %e, "legacy price is not a number — using default");
            })
            .ok()
        })
        .unwrap_or(DEFAULT_GOLD_PRICE);

    store.remove(LEGACY_ENTRIES_KEY);
    store.remove(LEGACY_PRICE_KEY);

    info!(entries = entries.len(), "migrated legacy portfolio data");

    Some(GoldData {
        entries,
        current_gold_price,
        last_updated: now,
        price_history: Vec::new(),
    })
}
