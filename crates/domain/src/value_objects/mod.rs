//! Value objects - Immutable objects defined by their attributes

mod answer;
mod game_mode;
mod session_summary;

pub use answer::{
    levenshtein, GrammarAnswer, ListeningAnswer, QuizAnswer, SpellingOutcome, TavernOutcome,
    VocabAnswer,
};
pub use game_mode::GameMode;
pub use session_summary::SessionSummary;
