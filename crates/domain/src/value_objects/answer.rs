//! Judged answers, one per question or conversation turn.
//!
//! The presentation layer compares player input against the answer key and
//! reduces it to one of these. Settlement consumes them exactly once.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Right-or-wrong answer from one of the quiz modes.
pub trait QuizAnswer {
    fn is_correct(&self) -> bool;
}

macro_rules! define_quiz_answer {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
        pub struct $name {
            pub correct: bool,
        }

        impl $name {
            pub fn correct() -> Self {
                Self { correct: true }
            }

            pub fn incorrect() -> Self {
                Self { correct: false }
            }
        }

        impl From<bool> for $name {
            fn from(correct: bool) -> Self {
                Self { correct }
            }
        }

        impl QuizAnswer for $name {
            fn is_correct(&self) -> bool {
                self.correct
            }
        }
    };
}

define_quiz_answer!(
    /// One vocabulary battle question.
    VocabAnswer
);
define_quiz_answer!(
    /// One grammar dungeon floor.
    GrammarAnswer
);
define_quiz_answer!(
    /// One listening cave question.
    ListeningAnswer
);

/// Graded result of one spelling prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellingOutcome {
    /// Exact match (case-insensitive)
    Perfect,
    /// One edit away
    Near,
    /// Anything else
    Fail,
}

impl SpellingOutcome {
    /// Flat EXP for this outcome. Not tier-scaled.
    pub fn exp(&self) -> i32 {
        match self {
            SpellingOutcome::Perfect => 5,
            SpellingOutcome::Near => 2,
            SpellingOutcome::Fail => 1,
        }
    }

    /// Raw damage before damage reduction.
    pub fn damage(&self) -> i32 {
        match self {
            SpellingOutcome::Perfect => 0,
            SpellingOutcome::Near => 5,
            SpellingOutcome::Fail => 12,
        }
    }

    /// Grade a typed answer against the expected spelling.
    ///
    /// Both sides are trimmed and case-folded. A blank answer is always a
    /// fail; otherwise a Levenshtein distance of one counts as near.
    ///
    /// ```
    /// use english_quest_domain::SpellingOutcome;
    ///
    /// assert_eq!(SpellingOutcome::judge("Necessary", "necessary"), SpellingOutcome::Perfect);
    /// assert_eq!(SpellingOutcome::judge("neccessary", "necessary"), SpellingOutcome::Near);
    /// assert_eq!(SpellingOutcome::judge("nesesary", "necessary"), SpellingOutcome::Fail);
    /// ```
    pub fn judge(input: &str, expected: &str) -> Self {
        let input = input.trim().to_lowercase();
        let expected = expected.trim().to_lowercase();
        if input.is_empty() || expected.is_empty() {
            return SpellingOutcome::Fail;
        }
        if input == expected {
            return SpellingOutcome::Perfect;
        }
        if input.chars().count().abs_diff(expected.chars().count()) > 1 {
            return SpellingOutcome::Fail;
        }
        if levenshtein(&input, &expected) <= 1 {
            SpellingOutcome::Near
        } else {
            SpellingOutcome::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpellingOutcome::Perfect => "perfect",
            SpellingOutcome::Near => "near",
            SpellingOutcome::Fail => "fail",
        }
    }
}

impl fmt::Display for SpellingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpellingOutcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perfect" => Ok(SpellingOutcome::Perfect),
            "near" => Ok(SpellingOutcome::Near),
            "fail" => Ok(SpellingOutcome::Fail),
            other => Err(DomainError::parse(format!(
                "Unknown spelling outcome: {}",
                other
            ))),
        }
    }
}

/// Evaluation of one conversation turn in the tavern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TavernOutcome {
    Success,
    Normal,
    Fail,
}

impl TavernOutcome {
    pub fn exp(&self) -> i32 {
        match self {
            TavernOutcome::Success => 5,
            TavernOutcome::Normal => 3,
            TavernOutcome::Fail => 1,
        }
    }

    pub fn gold(&self) -> i32 {
        match self {
            TavernOutcome::Success => 10,
            TavernOutcome::Normal => 5,
            TavernOutcome::Fail => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TavernOutcome::Success => "success",
            TavernOutcome::Normal => "normal",
            TavernOutcome::Fail => "fail",
        }
    }
}

impl fmt::Display for TavernOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TavernOutcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(TavernOutcome::Success),
            "normal" => Ok(TavernOutcome::Normal),
            "fail" => Ok(TavernOutcome::Fail),
            other => Err(DomainError::parse(format!(
                "Unknown tavern outcome: {}",
                other
            ))),
        }
    }
}

/// Edit distance between two strings, counted in chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    mod spelling {
        use super::*;

        #[test]
        fn exact_match_ignores_case_and_whitespace() {
            assert_eq!(
                SpellingOutcome::judge("  Rhythm ", "rhythm"),
                SpellingOutcome::Perfect
            );
        }

        #[test]
        fn single_edit_is_near() {
            // substitution, insertion, deletion
            assert_eq!(SpellingOutcome::judge("rhythn", "rhythm"), SpellingOutcome::Near);
            assert_eq!(SpellingOutcome::judge("rhytthm", "rhythm"), SpellingOutcome::Near);
            assert_eq!(SpellingOutcome::judge("rythm", "rhythm"), SpellingOutcome::Near);
        }

        #[test]
        fn two_edits_fail() {
            assert_eq!(SpellingOutcome::judge("ritm", "rhythm"), SpellingOutcome::Fail);
            assert_eq!(SpellingOutcome::judge("rhtyhm", "rhythm"), SpellingOutcome::Fail);
        }

        #[test]
        fn blank_answer_fails() {
            assert_eq!(SpellingOutcome::judge("   ", "a"), SpellingOutcome::Fail);
        }

        #[test]
        fn rewards_and_damage() {
            assert_eq!(SpellingOutcome::Perfect.exp(), 5);
            assert_eq!(SpellingOutcome::Near.damage(), 5);
            assert_eq!(SpellingOutcome::Fail.damage(), 12);
        }

        #[test]
        fn tags_parse() {
            assert_eq!("near".parse(), Ok(SpellingOutcome::Near));
            assert!("close".parse::<SpellingOutcome>().is_err());
        }
    }

    mod tavern {
        use super::*;

        #[test]
        fn rewards() {
            assert_eq!(TavernOutcome::Success.exp(), 5);
            assert_eq!(TavernOutcome::Success.gold(), 10);
            assert_eq!(TavernOutcome::Normal.gold(), 5);
            assert_eq!(TavernOutcome::Fail.gold(), 0);
        }

        #[test]
        fn tags_parse() {
            assert_eq!("SUCCESS".parse(), Ok(TavernOutcome::Success));
            assert!("great".parse::<TavernOutcome>().is_err());
        }
    }

    #[test]
    fn levenshtein_distances() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("café", "cafe"), 1);
    }

    #[test]
    fn quiz_answers_from_bool() {
        assert!(VocabAnswer::from(true).is_correct());
        assert!(!GrammarAnswer::incorrect().is_correct());
        assert!(ListeningAnswer::correct().is_correct());
    }
}
