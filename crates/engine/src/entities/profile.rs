//! Profile entity operations.

use std::sync::Arc;

use english_quest_domain::{PlayerId, PlayerStats};

use crate::infrastructure::ports::{ProfileRepo, RepoError};

/// Profile entity operations.
pub struct Profile {
    repo: Arc<dyn ProfileRepo>,
}

impl Profile {
    pub fn new(repo: Arc<dyn ProfileRepo>) -> Self {
        Self { repo }
    }

    pub async fn save(&self, player_id: PlayerId, stats: &PlayerStats) -> Result<(), RepoError> {
        self.repo.save(player_id, stats).await
    }

    /// Load the player's stats, seeding and saving defaults on first run.
    pub async fn load_or_seed(&self, player_id: PlayerId) -> Result<PlayerStats, RepoError> {
        if let Some(stats) = self.repo.get(player_id).await? {
            return Ok(stats);
        }

        let stats = PlayerStats::default();
        self.repo.save(player_id, &stats).await?;
        tracing::info!(player_id = %player_id, "Seeded new profile");
        Ok(stats)
    }

    /// Bring MaxHP back in line with the level curve, fully healing.
    ///
    /// Only writes when the stored stats are out of sync.
    pub async fn resync(
        &self,
        player_id: PlayerId,
        stats: PlayerStats,
    ) -> Result<PlayerStats, RepoError> {
        if !stats.needs_resync() {
            return Ok(stats);
        }

        let healed = stats.full_heal();
        self.repo.save(player_id, &healed).await?;
        tracing::info!(
            player_id = %player_id,
            max_hp = healed.max_hp,
            "Resynced profile HP to level curve"
        );
        Ok(healed)
    }
}
