//! Game modes - one per quiz location in town.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// The five learning modes.
///
/// The lowercase tag (`vocab`, `grammar`, ...) is what gets persisted and
/// what the question provider is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Vocabulary battle
    Vocab,
    /// Grammar dungeon
    Grammar,
    /// Conversation tavern
    Tavern,
    /// Spelling challenge
    Spelling,
    /// Listening cave
    Listening,
}

impl GameMode {
    pub fn all() -> &'static [GameMode] {
        &[
            GameMode::Vocab,
            GameMode::Grammar,
            GameMode::Tavern,
            GameMode::Spelling,
            GameMode::Listening,
        ]
    }

    /// Storage tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Vocab => "vocab",
            GameMode::Grammar => "grammar",
            GameMode::Tavern => "tavern",
            GameMode::Spelling => "spelling",
            GameMode::Listening => "listening",
        }
    }

    /// Player-facing location name.
    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::Vocab => "Vocabulary Battle",
            GameMode::Grammar => "Grammar Dungeon",
            GameMode::Tavern => "Conversation Tavern",
            GameMode::Spelling => "Spelling Challenge",
            GameMode::Listening => "Listening Cave",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vocab" => Ok(GameMode::Vocab),
            "grammar" => Ok(GameMode::Grammar),
            "tavern" => Ok(GameMode::Tavern),
            "spelling" => Ok(GameMode::Spelling),
            "listening" => Ok(GameMode::Listening),
            other => Err(DomainError::parse(format!("Unknown game mode: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_back() {
        for mode in GameMode::all() {
            assert_eq!(mode.as_str().parse::<GameMode>(), Ok(*mode));
        }
        assert_eq!(" Vocab ".parse::<GameMode>(), Ok(GameMode::Vocab));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(matches!(
            "chess".parse::<GameMode>(),
            Err(DomainError::Parse(_))
        ));
    }
}
