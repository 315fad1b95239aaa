//! Domain entities - Core business objects with identity

mod player_stats;
mod session_record;

pub use player_stats::{
    PlayerStats, DEFAULT_PLAYER_CLASS, DEFAULT_PLAYER_NAME, FAINT_EXP_PENALTY,
};
pub use session_record::SessionRecord;
