//! Session history operations.

use std::sync::Arc;

use english_quest_domain::{PlayerId, SessionRecord};

use crate::infrastructure::ports::{RepoError, SessionRepo};

/// Append-only play history for a player.
pub struct History {
    repo: Arc<dyn SessionRepo>,
}

impl History {
    pub fn new(repo: Arc<dyn SessionRepo>) -> Self {
        Self { repo }
    }

    pub async fn record(&self, record: &SessionRecord) -> Result<(), RepoError> {
        self.repo.save(record).await
    }

    /// Newest sessions first.
    pub async fn recent(
        &self,
        player_id: PlayerId,
        limit: usize,
    ) -> Result<Vec<SessionRecord>, RepoError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.repo.list_for_player(player_id, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockSessionRepo;

    #[tokio::test]
    async fn zero_limit_skips_the_store() {
        let mut repo = MockSessionRepo::new();
        repo.expect_list_for_player().never();

        let history = History::new(Arc::new(repo));
        assert!(history.recent(PlayerId::new(), 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_forwards_the_limit() {
        let player_id = PlayerId::new();
        let mut repo = MockSessionRepo::new();
        repo.expect_list_for_player()
            .withf(move |id, limit| *id == player_id && *limit == 20)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let history = History::new(Arc::new(repo));
        history.recent(player_id, 20).await.unwrap();
    }
}
