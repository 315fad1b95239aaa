//! Repository port traits for profile and history storage.

use async_trait::async_trait;
use english_quest_domain::{PlayerId, PlayerStats, SessionRecord};

use super::error::RepoError;

// =============================================================================
// Profile Storage
// =============================================================================

/// One `PlayerStats` snapshot per player, overwritten on every save.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepo: Send + Sync {
    /// `Ok(None)` when the player has never been saved.
    async fn get(&self, player_id: PlayerId) -> Result<Option<PlayerStats>, RepoError>;
    async fn save(&self, player_id: PlayerId, stats: &PlayerStats) -> Result<(), RepoError>;
}

// =============================================================================
// Session History
// =============================================================================

/// Append-only log of settled sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepo: Send + Sync {
    async fn save(&self, record: &SessionRecord) -> Result<(), RepoError>;
    /// Most recent sessions first, by `ended_at`.
    async fn list_for_player(
        &self,
        player_id: PlayerId,
        limit: usize,
    ) -> Result<Vec<SessionRecord>, RepoError>;
}
