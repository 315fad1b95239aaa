//! Player stats - the authoritative player state.
//!
//! Stats are a plain value. Every transition consumes the current value and
//! returns the next one, so callers can keep the "before" copy around for
//! comparisons (level-up detection, deltas for the summary screen).
//!
//! Transitions are split by concern:
//! - `damage` - HP loss, fainting, and the faint penalty
//! - `exp` - EXP gain with level-up rollover
//! - `health` - MaxHP resync and full heals

mod damage;
mod exp;
mod health;

pub use damage::FAINT_EXP_PENALTY;

use serde::{Deserialize, Serialize};

use crate::progression::{exp_to_next, max_hp_for_level};

/// Display name given to a fresh profile.
pub const DEFAULT_PLAYER_NAME: &str = "Takuya";

/// Display class given to a fresh profile.
pub const DEFAULT_PLAYER_CLASS: &str = "Vocabulary Warrior";

/// RPG-style player state.
///
/// # Invariants
///
/// - `0 <= hp <= max_hp`
/// - `max_hp == max_hp_for_level(level)` after any settlement
/// - `exp < next` after any EXP gain, and `next == exp_to_next(level)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub name: String,
    pub class: String,
    pub level: i32,
    /// Progress toward `next`, not lifetime EXP.
    pub exp: i32,
    /// EXP required for the next level (cache of `exp_to_next(level)`).
    pub next: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: f64,
    pub defense: f64,
    /// Consecutive correct answers; reset by any miss.
    pub combo: i32,
    /// Daily play streak, maintained outside the balance rules.
    pub streak: i32,
    pub gold: i32,
    /// Multiplicative EXP modifier (0.0 = no boost).
    pub exp_boost: f64,
    /// Multiplicative damage mitigation in `[0, 1)`.
    pub damage_reduction: f64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        let level = 1;
        let max_hp = max_hp_for_level(level);
        Self {
            name: DEFAULT_PLAYER_NAME.to_string(),
            class: DEFAULT_PLAYER_CLASS.to_string(),
            level,
            exp: 0,
            next: exp_to_next(level),
            hp: max_hp,
            max_hp,
            attack: 10.0,
            defense: 0.0,
            combo: 0,
            streak: 0,
            gold: 0,
            exp_boost: 0.0,
            damage_reduction: 0.0,
        }
    }
}

impl PlayerStats {
    /// Fresh stats for a new game.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Extend the combo by one correct answer.
    #[must_use]
    pub fn add_combo(mut self) -> Self {
        self.combo += 1;
        self
    }

    /// Break the combo.
    #[must_use]
    pub fn reset_combo(mut self) -> Self {
        self.combo = 0;
        self
    }

    #[must_use]
    pub fn add_defense(mut self, delta: f64) -> Self {
        self.defense += delta;
        self
    }

    /// Adjust gold, never dropping below zero.
    #[must_use]
    pub fn add_gold(mut self, delta: i32) -> Self {
        self.gold = (self.gold + delta).max(0);
        self
    }

    /// True when `after` is at a higher level than `self`.
    pub fn leveled_up_to(&self, after: &PlayerStats) -> bool {
        after.level > self.level
    }

    /// One-line status for logs and the history screen.
    pub fn status_line(&self) -> String {
        format!(
            "{} the {} | Lv {} | EXP {}/{} | HP {}/{} | DEF {:.1} | Gold {}",
            self.name,
            self.class,
            self.level,
            self.exp,
            self.next,
            self.hp,
            self.max_hp,
            self.defense,
            self.gold
        )
    }
}
