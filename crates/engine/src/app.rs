//! Application state and composition.

use std::sync::Arc;

use english_quest_domain::{PlayerId, PlayerStats};

use crate::entities::{History, Profile};
use crate::infrastructure::{
    config::AppConfig,
    ports::{ClockPort, ProfileRepo, RepoError, SessionRepo},
};
use crate::use_cases;

/// Main application state.
///
/// Holds the active player, the entity modules, and every use case wired
/// against the same stores.
pub struct App {
    pub player_id: PlayerId,
    pub profile: Arc<Profile>,
    pub history: Arc<History>,
    pub use_cases: UseCases,
    pub history_limit: usize,
}

/// Container for all use cases.
pub struct UseCases {
    pub session: use_cases::SessionUseCases,
    pub progress: use_cases::ProgressUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        config: &AppConfig,
        player_id: PlayerId,
        profiles: Arc<dyn ProfileRepo>,
        sessions: Arc<dyn SessionRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let profile = Arc::new(Profile::new(profiles.clone()));
        let history = Arc::new(History::new(sessions.clone()));

        let ctx = use_cases::GameContext {
            player_id,
            profiles,
            sessions,
            clock,
        };
        let session = use_cases::SessionUseCases::new(Arc::new(use_cases::SettleSession::new(ctx)));
        let progress = use_cases::ProgressUseCases::new(Arc::new(use_cases::AnalyzeProgress::new(
            history.clone(),
            config.history_limit,
            config.questions_per_session,
        )));

        Self {
            player_id,
            profile,
            history,
            use_cases: UseCases { session, progress },
            history_limit: config.history_limit,
        }
    }

    /// Load (or seed) the active profile and normalise its HP.
    pub async fn start(&self) -> Result<PlayerStats, RepoError> {
        let stats = self.profile.load_or_seed(self.player_id).await?;
        self.profile.resync(self.player_id, stats).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::ports::{MockProfileRepo, MockSessionRepo};
    use english_quest_domain::VocabAnswer;

    #[tokio::test]
    async fn start_seeds_then_sessions_persist_for_the_same_player() {
        let player_id = PlayerId::new();

        let mut profiles = MockProfileRepo::new();
        profiles.expect_get().returning(|_| Ok(None));
        profiles
            .expect_save()
            .withf(move |id, _| *id == player_id)
            .times(2)
            .returning(|_, _| Ok(()));
        let mut sessions = MockSessionRepo::new();
        sessions
            .expect_save()
            .withf(move |record| record.player_id == player_id)
            .times(1)
            .returning(|_| Ok(()));

        let app = App::new(
            &AppConfig::default(),
            player_id,
            Arc::new(profiles),
            Arc::new(sessions),
            Arc::new(SystemClock::new()),
        );

        let stats = app.start().await.unwrap();
        assert_eq!(stats, PlayerStats::default());

        let (after, _) = app
            .use_cases
            .session
            .settle
            .run_vocab_session(stats, &[VocabAnswer::correct()])
            .await
            .unwrap();
        assert!(after.exp > 0);
    }
}
