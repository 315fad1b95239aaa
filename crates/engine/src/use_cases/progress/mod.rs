//! Progress use cases.
//!
//! Turns stored history into a report of weak and strong modes plus a short
//! action plan.

use std::sync::Arc;

use english_quest_domain::{analyze, PlayerId, PlayerStats, ProgressReport};

use crate::entities::History;
use crate::infrastructure::ports::RepoError;

/// Container for progress use cases.
pub struct ProgressUseCases {
    pub analyze: Arc<AnalyzeProgress>,
}

impl ProgressUseCases {
    pub fn new(analyze: Arc<AnalyzeProgress>) -> Self {
        Self { analyze }
    }
}

/// Build a progress report from the player's most recent sessions.
pub struct AnalyzeProgress {
    history: Arc<History>,
    history_limit: usize,
    questions_per_session: i32,
}

impl AnalyzeProgress {
    pub fn new(history: Arc<History>, history_limit: usize, questions_per_session: i32) -> Self {
        Self {
            history,
            history_limit,
            questions_per_session,
        }
    }

    pub async fn execute(
        &self,
        player_id: PlayerId,
        stats: &PlayerStats,
    ) -> Result<ProgressReport, RepoError> {
        let sessions = self.history.recent(player_id, self.history_limit).await?;
        tracing::debug!(
            player_id = %player_id,
            sessions = sessions.len(),
            "Analyzing session history"
        );
        Ok(analyze(&sessions, stats, self.questions_per_session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use english_quest_domain::{GameMode, SessionRecord, SessionSummary};

    use crate::infrastructure::ports::MockSessionRepo;

    fn record(player_id: PlayerId, mode: GameMode, correct: i32) -> SessionRecord {
        let mut summary = SessionSummary::new(mode);
        summary.correct = correct;
        SessionRecord::from_summary(player_id, &summary, Utc::now(), Utc::now())
    }

    #[tokio::test]
    async fn reports_weakest_mode_from_history() {
        let player_id = PlayerId::new();
        let sessions = vec![
            record(player_id, GameMode::Grammar, 1),
            record(player_id, GameMode::Vocab, 5),
        ];

        let mut repo = MockSessionRepo::new();
        repo.expect_list_for_player()
            .withf(move |id, limit| *id == player_id && *limit == 20)
            .times(1)
            .returning(move |_, _| Ok(sessions.clone()));

        let use_case = AnalyzeProgress::new(Arc::new(History::new(Arc::new(repo))), 20, 5);
        let report = use_case
            .execute(player_id, &PlayerStats::default())
            .await
            .unwrap();

        assert_eq!(report.weak_points[0].mode, GameMode::Grammar);
        assert_eq!(report.strengths[0].mode, GameMode::Vocab);
    }

    #[tokio::test]
    async fn empty_history_gives_placeholder() {
        let mut repo = MockSessionRepo::new();
        repo.expect_list_for_player().returning(|_, _| Ok(Vec::new()));

        let use_case = AnalyzeProgress::new(Arc::new(History::new(Arc::new(repo))), 20, 5);
        let report = use_case
            .execute(PlayerId::new(), &PlayerStats::default())
            .await
            .unwrap();

        assert!(report.weak_points.is_empty());
        assert_eq!(report.summary, "No sessions available yet.");
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let mut repo = MockSessionRepo::new();
        repo.expect_list_for_player()
            .returning(|_, _| Err(RepoError::database("list_sessions", "gone")));

        let use_case = AnalyzeProgress::new(Arc::new(History::new(Arc::new(repo))), 20, 5);
        let result = use_case.execute(PlayerId::new(), &PlayerStats::default()).await;
        assert!(result.is_err());
    }
}
