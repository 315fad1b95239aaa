//! Settle session use case.
//!
//! Runs the pure settlement for one mode, then records the session and
//! saves the updated profile. Storage failures are logged and never undo
//! the settlement.

use std::sync::Arc;

use english_quest_domain::{
    settle_grammar, settle_listening, settle_spelling, settle_tavern, settle_vocab, GrammarAnswer,
    ListeningAnswer, PlayerId, PlayerStats, SessionRecord, SessionSummary, Settlement,
    SpellingOutcome, TavernOutcome, VocabAnswer,
};

use crate::entities::{History, Profile};
use crate::infrastructure::ports::{ClockPort, ProfileRepo, SessionRepo};

/// Everything a settlement needs from the outside world.
///
/// Replaces a process-wide "current profile" and database handle: the
/// active player and the stores travel explicitly with each call.
#[derive(Clone)]
pub struct GameContext {
    pub player_id: PlayerId,
    pub profiles: Arc<dyn ProfileRepo>,
    pub sessions: Arc<dyn SessionRepo>,
    pub clock: Arc<dyn ClockPort>,
}

/// Reserved for input validation; settlement itself never fails.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid session input: {0}")]
    InvalidInput(String),
}

/// Settle one finished session per call.
///
/// Persistence is best effort. A failed save is logged and the updated
/// stats are still returned; the next successful settlement re-saves the
/// cumulative profile.
pub struct SettleSession {
    player_id: PlayerId,
    profile: Profile,
    history: History,
    clock: Arc<dyn ClockPort>,
}

impl SettleSession {
    pub fn new(ctx: GameContext) -> Self {
        Self {
            player_id: ctx.player_id,
            profile: Profile::new(ctx.profiles),
            history: History::new(ctx.sessions),
            clock: ctx.clock,
        }
    }

    pub async fn run_vocab_session(
        &self,
        stats: PlayerStats,
        answers: &[VocabAnswer],
    ) -> Result<(PlayerStats, SessionSummary), SessionError> {
        Ok(self.persist(settle_vocab(stats, answers)).await)
    }

    pub async fn run_grammar_session(
        &self,
        stats: PlayerStats,
        answers: &[GrammarAnswer],
    ) -> Result<(PlayerStats, SessionSummary), SessionError> {
        Ok(self.persist(settle_grammar(stats, answers)).await)
    }

    pub async fn run_listening_session(
        &self,
        stats: PlayerStats,
        answers: &[ListeningAnswer],
    ) -> Result<(PlayerStats, SessionSummary), SessionError> {
        Ok(self.persist(settle_listening(stats, answers)).await)
    }

    pub async fn run_spelling_session(
        &self,
        stats: PlayerStats,
        outcomes: &[SpellingOutcome],
    ) -> Result<(PlayerStats, SessionSummary), SessionError> {
        Ok(self.persist(settle_spelling(stats, outcomes)).await)
    }

    pub async fn run_tavern_session(
        &self,
        stats: PlayerStats,
        outcomes: &[TavernOutcome],
    ) -> Result<(PlayerStats, SessionSummary), SessionError> {
        Ok(self.persist(settle_tavern(stats, outcomes)).await)
    }

    async fn persist(&self, settlement: Settlement) -> (PlayerStats, SessionSummary) {
        let Settlement {
            stats,
            summary,
            kind,
        } = settlement;

        let now = self.clock.now();
        let record = SessionRecord::from_summary(self.player_id, &summary, now, now);

        tracing::debug!(
            player_id = %self.player_id,
            mode = %summary.mode,
            settlement = ?kind,
            correct = summary.correct,
            exp_delta = summary.exp_delta,
            hp_delta = summary.hp_delta,
            fainted = summary.fainted,
            leveled_up = summary.leveled_up,
            "Session settled"
        );

        if let Err(e) = self.history.record(&record).await {
            tracing::warn!(
                error = %e,
                player_id = %self.player_id,
                session_id = %record.id,
                "Failed to save session record"
            );
        }
        if let Err(e) = self.profile.save(self.player_id, &stats).await {
            tracing::warn!(error = %e, player_id = %self.player_id, "Failed to save profile");
        }

        (stats, summary)
    }
}
