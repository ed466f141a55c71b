use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::snapshot::GoldData;

/// Whole-snapshot persistence seam.
///
/// The production implementation (`RemoteStore`) talks to a remote content
/// API; tests swap in an in-memory store. The snapshot is always written
/// and read as one atomic unit — there are no partial updates.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the snapshot. `Ok(None)` means no snapshot exists yet — the
    /// normal empty state on first-ever load, never an error.
    async fn load(&self) -> Result<Option<GoldData>, CoreError>;

    /// Overwrite the snapshot with the given state.
    async fn save(&self, snapshot: &GoldData) -> Result<(), CoreError>;
}
