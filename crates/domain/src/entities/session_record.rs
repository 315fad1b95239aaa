//! Session Record entity - one row of the append-only play history
//!
//! A flattened `SessionSummary` stamped with the player, mode, and
//! timestamps. Records are keyed by `id` and listed newest-first by
//! `ended_at` for a player.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{GameMode, PlayerId, SessionId, SessionSummary};

/// A completed learning session as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: SessionId,
    pub player_id: PlayerId,
    pub mode: GameMode,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Batch of questions the session was played with, when the provider supplies one
    pub question_set_id: Option<String>,
    pub correct_count: i32,
    pub best_combo: i32,
    pub exp_gained: i32,
    pub exp_lost: i32,
    pub hp_delta: i32,
    pub gold_delta: i32,
    pub defense_delta: f64,
    pub fainted: bool,
    pub leveled_up: bool,
}

impl SessionRecord {
    /// Flatten a summary into a new history record.
    pub fn from_summary(
        player_id: PlayerId,
        summary: &SessionSummary,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            player_id,
            mode: summary.mode,
            started_at,
            ended_at,
            question_set_id: None,
            correct_count: summary.correct,
            best_combo: summary.best_combo,
            exp_gained: summary.exp_delta,
            exp_lost: summary.exp_lost,
            hp_delta: summary.hp_delta,
            gold_delta: summary.gold_delta,
            defense_delta: summary.defense_delta,
            fainted: summary.fainted,
            leveled_up: summary.leveled_up,
        }
    }

    #[must_use]
    pub fn with_question_set(mut self, question_set_id: impl Into<String>) -> Self {
        self.question_set_id = Some(question_set_id.into());
        self
    }

    /// Score as shown on the history screen, e.g. `4/5`.
    pub fn score_label(&self, questions_per_session: i32) -> String {
        format!("{}/{}", self.correct_count, questions_per_session)
    }
}
