extern crate self as english_quest_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod progress;
pub mod progression;
pub mod settlement;
pub mod value_objects;

// Re-export entities (explicit list in entities/mod.rs)
pub use entities::{
    PlayerStats, SessionRecord, DEFAULT_PLAYER_CLASS, DEFAULT_PLAYER_NAME, FAINT_EXP_PENALTY,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{PlayerId, SessionId};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    levenshtein, GameMode, GrammarAnswer, ListeningAnswer, QuizAnswer, SessionSummary,
    SpellingOutcome, TavernOutcome, VocabAnswer,
};

// Progression curve
pub use progression::{
    allowed_misses, clear_bonus, damage_per_miss, exp_to_next, max_hp_for_level,
    perfect_bonus_mul, q_exp_for, session_exp_clear, session_exp_fail, tier_for_level, Tier,
    FAIL_EXP_FACTOR,
};

pub use progress::{analyze, ActionSuggestion, ModeInsight, Priority, ProgressReport};
pub use settlement::{
    settle_grammar, settle_listening, settle_quiz, settle_spelling, settle_tavern, settle_vocab,
    QuizRules, Settlement, SettlementKind,
};
