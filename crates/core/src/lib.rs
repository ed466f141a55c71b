pub mod config;
pub mod errors;
pub mod extractor;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use config::TrackerConfig;
use errors::CoreError;
use extractor::fetch::PriceExtractor;
use extractor::traits::PriceSource;
use models::entry::{EntryInput, GoldEntry};
use models::quote::PriceQuote;
use models::snapshot::{GoldData, PriceHistoryPoint};
use models::stats::{EntryValuation, PortfolioStats};
use services::analytics_service::AnalyticsService;
use services::portfolio_service::PortfolioService;
use session::SessionManager;
use storage::legacy::{self, KeyValueStore};
use storage::remote::RemoteStore;
use storage::traits::SnapshotStore;

/// Where the state came from on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Migrated from the legacy unencrypted local representation
    Legacy,
    /// Loaded whole from the remote store
    Remote,
    /// No snapshot anywhere yet — fresh defaults
    Fresh,
}

/// Main entry point for the gold tracker core.
///
/// Owns the in-memory snapshot (the source of truth between saves) and
/// orchestrates the session authenticator, the price extractor, and the
/// encrypted remote store. A failed network operation surfaces its error
/// and leaves the in-memory state untouched; the unsaved-changes flag
/// stays set so the caller can retry the save.
#[must_use]
pub struct GoldTracker {
    data: GoldData,
    portfolio_service: PortfolioService,
    analytics_service: AnalyticsService,
    session: SessionManager,
    price_source: Box<dyn PriceSource>,
    store: Box<dyn SnapshotStore>,
    record_manual_price_history: bool,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for GoldTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoldTracker")
            .field("entries", &self.data.entries.len())
            .field("current_gold_price", &self.data.current_gold_price)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl GoldTracker {
    /// Build a tracker with production components from injected config.
    pub fn new(config: TrackerConfig) -> Self {
        let session = SessionManager::new(config.access_password);
        let price_source: Box<dyn PriceSource> =
            Box::new(PriceExtractor::new(config.price_url));
        let store: Box<dyn SnapshotStore> = Box::new(RemoteStore::new(
            config.remote,
            config.storage_passphrase,
        ));
        Self::with_components(
            session,
            price_source,
            store,
            config.record_manual_price_history,
        )
    }

    /// Build from explicit components. Tests use this with mock seams.
    pub fn with_components(
        session: SessionManager,
        price_source: Box<dyn PriceSource>,
        store: Box<dyn SnapshotStore>,
        record_manual_price_history: bool,
    ) -> Self {
        Self {
            data: GoldData::with_defaults(Utc::now()),
            portfolio_service: PortfolioService::new(),
            analytics_service: AnalyticsService::new(),
            session,
            price_source,
            store,
            record_manual_price_history,
            dirty: false,
        }
    }

    // ── Loading & Persistence ───────────────────────────────────────

    /// Establish the working snapshot.
    ///
    /// Order: one-time legacy migration (immediately persisted remotely),
    /// else whole-snapshot remote load, else fresh defaults. A missing
    /// remote object is the normal first-run state, not an error.
    pub async fn load(
        &mut self,
        legacy_store: &mut dyn KeyValueStore,
    ) -> Result<LoadSource, CoreError> {
        if let Some(migrated) = legacy::migrate_legacy(legacy_store, Utc::now()) {
            self.data = migrated;
            self.dirty = true;
            // Persist the migrated snapshot right away; on failure the
            // migrated state stays in memory with the dirty flag set.
            self.persist().await?;
            return Ok(LoadSource::Legacy);
        }

        match self.store.load().await? {
            Some(snapshot) => {
                self.data = snapshot;
                self.dirty = false;
                Ok(LoadSource::Remote)
            }
            None => {
                self.data = GoldData::with_defaults(Utc::now());
                self.dirty = false;
                Ok(LoadSource::Fresh)
            }
        }
    }

    /// Write the in-memory snapshot to the remote store, clearing the
    /// unsaved-changes flag on success.
    pub async fn persist(&mut self) -> Result<(), CoreError> {
        self.store.save(&self.data).await?;
        self.dirty = false;
        Ok(())
    }

    // ── Entry Management ────────────────────────────────────────────

    /// Validate and add a purchase, then persist the snapshot.
    pub async fn add_entry(&mut self, input: EntryInput) -> Result<GoldEntry, CoreError> {
        let entry = self.portfolio_service.add_entry(&mut self.data, input)?;
        self.dirty = true;
        self.persist().await?;
        Ok(entry)
    }

    /// Replace a purchase wholesale (same identifier, re-derived fields),
    /// then persist the snapshot.
    pub async fn update_entry(
        &mut self,
        id: Uuid,
        input: EntryInput,
    ) -> Result<GoldEntry, CoreError> {
        let entry = self
            .portfolio_service
            .update_entry(&mut self.data, id, input)?;
        self.dirty = true;
        self.persist().await?;
        Ok(entry)
    }

    /// Remove a purchase by identifier, then persist the snapshot.
    pub async fn delete_entry(&mut self, id: Uuid) -> Result<GoldEntry, CoreError> {
        let entry = self.portfolio_service.delete_entry(&mut self.data, id)?;
        self.dirty = true;
        self.persist().await?;
        Ok(entry)
    }

    // ── Reference Price ─────────────────────────────────────────────

    /// Fetch the current price from the source and apply it.
    ///
    /// On extraction failure nothing changes — the error is surfaced for
    /// display and the caller decides when to retry.
    pub async fn refresh_price(&mut self) -> Result<PriceQuote, CoreError> {
        let quote = self.price_source.fetch_current_price().await?;
        self.portfolio_service
            .set_price(&mut self.data, quote.price, quote.timestamp, true)?;
        self.dirty = true;
        self.persist().await?;
        Ok(quote)
    }

    /// Apply a caller-supplied price through the same update path, no
    /// extraction involved. Whether this appends to the price history is
    /// a configuration choice (`record_manual_price_history`).
    pub async fn set_price_manually(&mut self, price: f64) -> Result<(), CoreError> {
        self.portfolio_service.set_price(
            &mut self.data,
            price,
            Utc::now(),
            self.record_manual_price_history,
        )?;
        self.dirty = true;
        self.persist().await?;
        Ok(())
    }

    // ── Statistics & Accessors ──────────────────────────────────────

    /// Aggregate statistics over the current entry list and price.
    #[must_use]
    pub fn stats(&self) -> PortfolioStats {
        self.analytics_service.portfolio_stats(&self.data)
    }

    /// Valuation of one entry at the current reference price.
    #[must_use]
    pub fn entry_valuation(&self, entry: &GoldEntry) -> EntryValuation {
        self.analytics_service
            .entry_valuation(entry, self.data.current_gold_price)
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[GoldEntry] {
        &self.data.entries
    }

    /// Entries sorted newest-first for display.
    #[must_use]
    pub fn entries_by_date_desc(&self) -> Vec<&GoldEntry> {
        self.data.entries_by_date_desc()
    }

    #[must_use]
    pub fn current_price(&self) -> f64 {
        self.data.current_gold_price
    }

    #[must_use]
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.data.last_updated
    }

    #[must_use]
    pub fn price_history(&self) -> &[PriceHistoryPoint] {
        &self.data.price_history
    }

    /// `true` if a mutation has not yet reached the remote store.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Session ─────────────────────────────────────────────────────

    /// Check the candidate password and establish a session on success.
    /// Callers should apply `session::LOGIN_ATTEMPT_DELAY` per attempt.
    pub fn login(&mut self, candidate: &str) -> bool {
        self.session.login(candidate)
    }

    /// Sliding-expiration authentication check.
    pub fn is_authenticated(&mut self) -> bool {
        self.session.is_authenticated()
    }

    /// Explicit logout — erases all session state.
    pub fn logout(&mut self) {
        self.session.clear_session();
    }

    /// Seconds until idle expiry, for the countdown display.
    #[must_use]
    pub fn session_remaining_seconds(&self) -> u64 {
        self.session.remaining_seconds()
    }
}
