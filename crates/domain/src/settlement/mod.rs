//! Session settlement.
//!
//! Turns one session's judged answers into the next `PlayerStats` and a
//! `SessionSummary`. Settlement is pure: persistence and logging belong to
//! the engine, which wraps these functions.
//!
//! # State machine
//!
//! ```text
//!               correct / survivable miss
//!                 ┌──────────┐
//!                 v          │
//!  start ──> InProgress ─────┘
//!                 │  \
//!   all answered  │   \ HP <= 0 (remaining answers dropped)
//!                 v    v
//!             Settled  Fainted ──> Settled(Fail) + faint penalty
//!          (Clear | Fail)
//! ```
//!
//! Quiz modes (vocab, grammar, listening) use the fixed per-miss damage
//! curve and tier-scaled EXP. Graded modes (spelling, tavern) use flat
//! per-outcome rewards and check for a faint once at the end.

mod graded;
mod quiz;

pub use graded::{settle_spelling, settle_tavern};
pub use quiz::{settle_grammar, settle_listening, settle_quiz, settle_vocab, QuizRules};

use serde::{Deserialize, Serialize};

use crate::{PlayerStats, SessionSummary};

/// Base EXP per correct vocabulary answer.
pub const VOCAB_BASE_EXP: i32 = 4;

/// Base EXP per cleared grammar floor.
pub const GRAMMAR_BASE_EXP: i32 = 3;

/// Base EXP per correct listening answer.
pub const LISTENING_BASE_EXP: i32 = 5;

/// Defense gained per correct grammar answer.
pub const GRAMMAR_DEFENSE_PER_CORRECT: f64 = 0.2;

/// How a session was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementKind {
    /// Every answer was evaluated without fainting
    Clear,
    /// The session ended early or the player fainted
    Fail,
}

/// Output of a settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub stats: PlayerStats,
    pub summary: SessionSummary,
    pub kind: SettlementKind,
}

/// Apply the faint penalty when HP is depleted, reporting the EXP it cost.
fn settle_faint(stats: PlayerStats) -> (PlayerStats, bool, i32) {
    let exp_before = stats.exp;
    let (stats, fainted) = stats.apply_faint();
    let exp_lost = exp_before - stats.exp;
    (stats, fainted, exp_lost)
}

fn count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

const EMPTY_SESSION_NOTE: &str = "No answers were recorded for this session.";
