//! Session summary - the result of one settlement.

use serde::{Deserialize, Serialize};

use super::GameMode;

/// What one settled session did to the player.
///
/// Built once by settlement, then handed to persistence and to the result
/// screen. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub mode: GameMode,
    /// Questions answered correctly (Perfect / Success in graded modes).
    pub correct: i32,
    /// Questions actually evaluated before the session ended.
    pub answered: i32,
    /// Session EXP handed to `gain_exp`, before `exp_boost`.
    pub exp_delta: i32,
    /// EXP removed by the faint penalty.
    pub exp_lost: i32,
    /// Damage taken, as a non-positive number.
    pub hp_delta: i32,
    pub gold_delta: i32,
    pub defense_delta: f64,
    pub best_combo: i32,
    pub fainted: bool,
    pub leveled_up: bool,
    /// Free-form message for skipped or degenerate sessions.
    pub note: Option<String>,
}

impl SessionSummary {
    /// Empty summary for a mode; settlement fills in the rest.
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            correct: 0,
            answered: 0,
            exp_delta: 0,
            exp_lost: 0,
            hp_delta: 0,
            gold_delta: 0,
            defense_delta: 0.0,
            best_combo: 0,
            fainted: false,
            leveled_up: false,
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
