//! Progress report over stored session history.
//!
//! A deterministic summary of which modes the player struggles with, which
//! they are strong in, and what to play next. Sessions are expected
//! newest first, the order the session store returns them in.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{GameMode, PlayerStats, SessionRecord};

/// Sessions in the "recent" trend window.
pub const RECENT_WINDOW: usize = 5;

/// Sessions in the "previous" trend window, directly before the recent one.
pub const PREVIOUS_WINDOW: usize = 5;

/// Modes below this accuracy count as weak points.
pub const WEAK_ACCURACY: f64 = 0.75;

/// Modes above this accuracy count as strengths.
pub const STRONG_ACCURACY: f64 = 0.85;

const MAX_HIGHLIGHTS: usize = 2;
const STREAK_TO_PROTECT: i32 = 3;

/// Per-mode performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeInsight {
    pub mode: GameMode,
    /// Share of questions answered correctly, 0.0 to 1.0
    pub accuracy: f64,
    pub sessions: usize,
    /// Recent accuracy minus previous accuracy; 0.0 when either window is empty
    pub trend: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(label)
    }
}

/// A readable next step for the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSuggestion {
    pub mode: Option<GameMode>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub weak_points: Vec<ModeInsight>,
    pub strengths: Vec<ModeInsight>,
    pub recommendation: String,
    pub summary: String,
    pub action_plan: Vec<ActionSuggestion>,
}

impl ProgressReport {
    fn empty() -> Self {
        Self {
            weak_points: Vec::new(),
            strengths: Vec::new(),
            recommendation: "Play some sessions to get an analysis!".to_string(),
            summary: "No sessions available yet.".to_string(),
            action_plan: Vec::new(),
        }
    }
}

#[derive(Default)]
struct ModeTally {
    sessions: usize,
    total: i64,
    correct: i64,
    recent_total: i64,
    recent_correct: i64,
    previous_total: i64,
    previous_correct: i64,
}

impl ModeTally {
    fn insight(&self, mode: GameMode) -> ModeInsight {
        let accuracy = ratio(self.correct, self.total);
        let has_windows = self.recent_total > 0 || self.previous_total > 0;
        let recent = ratio(self.recent_correct, self.recent_total);
        let previous = ratio(self.previous_correct, self.previous_total);

        let description = if has_windows {
            format!(
                "Recent {:.0}% vs prior {:.0}%",
                recent * 100.0,
                previous * 100.0
            )
        } else {
            format!(
                "{} sessions, {:.0}% accuracy",
                self.sessions,
                accuracy * 100.0
            )
        };
        let trend = if self.recent_total > 0 && self.previous_total > 0 {
            recent - previous
        } else {
            0.0
        };

        ModeInsight {
            mode,
            accuracy,
            sessions: self.sessions,
            trend,
            description,
        }
    }
}

fn ratio(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    (part as f64 / whole as f64).clamp(0.0, 1.0)
}

/// Build a report from `sessions` (newest first).
///
/// Each session counts as `questions_per_session` questions. Equal inputs
/// always produce an identical report.
pub fn analyze(
    sessions: &[SessionRecord],
    stats: &PlayerStats,
    questions_per_session: i32,
) -> ProgressReport {
    if sessions.is_empty() {
        return ProgressReport::empty();
    }
    let per_session = i64::from(questions_per_session.max(1));

    let mut tallies: BTreeMap<GameMode, ModeTally> = BTreeMap::new();
    let mut total_correct = 0i64;
    let mut total_questions = 0i64;

    for (index, session) in sessions.iter().enumerate() {
        let correct = i64::from(session.correct_count.max(0));
        total_correct += correct;
        total_questions += per_session;

        let tally = tallies.entry(session.mode).or_default();
        tally.sessions += 1;
        tally.total += per_session;
        tally.correct += correct;
        if index < RECENT_WINDOW {
            tally.recent_total += per_session;
            tally.recent_correct += correct;
        } else if index < RECENT_WINDOW + PREVIOUS_WINDOW {
            tally.previous_total += per_session;
            tally.previous_correct += correct;
        }
    }

    let mut insights: Vec<ModeInsight> = tallies
        .iter()
        .map(|(mode, tally)| tally.insight(*mode))
        .collect();
    // stable: ties keep GameMode order
    insights.sort_by(|a, b| a.accuracy.total_cmp(&b.accuracy));

    let weak_points: Vec<ModeInsight> = insights
        .iter()
        .filter(|insight| insight.accuracy < WEAK_ACCURACY)
        .take(MAX_HIGHLIGHTS)
        .cloned()
        .collect();
    let strengths: Vec<ModeInsight> = insights
        .iter()
        .rev()
        .filter(|insight| insight.accuracy > STRONG_ACCURACY)
        .take(MAX_HIGHLIGHTS)
        .cloned()
        .collect();

    let recommendation = match (weak_points.first(), strengths.is_empty()) {
        (Some(weakest), _) => format!(
            "Focus on {}. Try playing {} sessions.",
            weakest.mode.display_name(),
            weakest.mode.display_name()
        ),
        (None, false) => "Great job! You're strong in all areas.".to_string(),
        (None, true) => "No clear patterns yet. Keep playing!".to_string(),
    };

    let summary = format!(
        "Analyzed {} sessions ({} questions) with {:.0}% accuracy overall.",
        sessions.len(),
        total_questions,
        ratio(total_correct, total_questions) * 100.0
    );
    let action_plan = action_plan(stats, &weak_points, &strengths);

    ProgressReport {
        weak_points,
        strengths,
        recommendation,
        summary,
        action_plan,
    }
}

fn action_plan(
    stats: &PlayerStats,
    weak_points: &[ModeInsight],
    strengths: &[ModeInsight],
) -> Vec<ActionSuggestion> {
    let mut plan = Vec::new();

    if stats.max_hp > 0 && stats.hp < stats.max_hp / 2 {
        plan.push(ActionSuggestion {
            mode: None,
            title: "Recover HP".to_string(),
            description: format!(
                "HP is {}/{}. Run a lighter mode to rebuild HP before tackling harder fights.",
                stats.hp, stats.max_hp
            ),
            priority: Priority::High,
        });
    }

    match weak_points.first() {
        Some(weakest) => plan.push(ActionSuggestion {
            mode: Some(weakest.mode),
            title: format!("Focus on {}", weakest.mode.display_name()),
            description: format!(
                "Accuracy {:.0}%. Spend two sessions reviewing {} mistakes.",
                weakest.accuracy * 100.0,
                weakest.mode.display_name()
            ),
            priority: Priority::High,
        }),
        None => plan.push(ActionSuggestion {
            mode: None,
            title: "Keep the pace".to_string(),
            description: "No pronounced weak points. Rotate through high-accuracy modes to maintain streaks."
                .to_string(),
            priority: Priority::Medium,
        }),
    }

    if stats.streak >= STREAK_TO_PROTECT {
        plan.push(ActionSuggestion {
            mode: None,
            title: "Protect streak".to_string(),
            description: format!(
                "Streak {} days. Pick quick, high-accuracy runs to lock it in.",
                stats.streak
            ),
            priority: Priority::Medium,
        });
    }

    if let Some(top) = strengths.first() {
        plan.push(ActionSuggestion {
            mode: Some(top.mode),
            title: format!("Use {} for bonus EXP", top.mode.display_name()),
            description: format!(
                "You're strong in {}. Lean on it for a confident run.",
                top.mode.display_name()
            ),
            priority: Priority::Low,
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlayerId, SessionId};
    use chrono::{TimeZone, Utc};

    fn record(mode: GameMode, correct: i32, minutes_ago: i64) -> SessionRecord {
        let ended = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
            - chrono::Duration::minutes(minutes_ago);
        SessionRecord {
            id: SessionId::new(),
            player_id: PlayerId::new(),
            mode,
            started_at: ended,
            ended_at: ended,
            question_set_id: None,
            correct_count: correct,
            best_combo: correct,
            exp_gained: 0,
            exp_lost: 0,
            hp_delta: 0,
            gold_delta: 0,
            defense_delta: 0.0,
            fainted: false,
            leveled_up: false,
        }
    }

    #[test]
    fn empty_history_has_placeholder_report() {
        let report = analyze(&[], &PlayerStats::default(), 5);
        assert!(report.weak_points.is_empty());
        assert!(report.action_plan.is_empty());
        assert_eq!(report.summary, "No sessions available yet.");
    }

    #[test]
    fn splits_weak_and_strong_modes() {
        let sessions = vec![
            record(GameMode::Vocab, 5, 1),
            record(GameMode::Grammar, 2, 2),
            record(GameMode::Vocab, 5, 3),
            record(GameMode::Grammar, 3, 4),
            record(GameMode::Listening, 3, 5),
        ];
        let report = analyze(&sessions, &PlayerStats::default(), 5);

        let weak: Vec<GameMode> = report.weak_points.iter().map(|i| i.mode).collect();
        assert_eq!(weak, vec![GameMode::Grammar, GameMode::Listening]);
        assert_eq!(report.strengths.len(), 1);
        assert_eq!(report.strengths[0].mode, GameMode::Vocab);
        assert!(report.recommendation.starts_with("Focus on Grammar"));
        assert_eq!(
            report.summary,
            "Analyzed 5 sessions (25 questions) with 72% accuracy overall."
        );
    }

    #[test]
    fn trend_compares_recent_and_previous_windows() {
        let mut sessions: Vec<SessionRecord> =
            (0..5).map(|i| record(GameMode::Vocab, 5, i)).collect();
        sessions.extend((5..10).map(|i| record(GameMode::Vocab, 4, i)));

        let report = analyze(&sessions, &PlayerStats::default(), 5);
        let vocab = &report.strengths[0];
        assert!((vocab.trend - 0.2).abs() < 1e-9);
        assert_eq!(vocab.description, "Recent 100% vs prior 80%");
    }

    #[test]
    fn action_plan_orders_recovery_first() {
        let stats = PlayerStats {
            hp: 5,
            streak: 4,
            ..PlayerStats::default()
        };
        let sessions = vec![record(GameMode::Spelling, 1, 1), record(GameMode::Tavern, 5, 2)];
        let report = analyze(&sessions, &stats, 5);

        let titles: Vec<&str> = report.action_plan.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Recover HP",
                "Focus on Spelling Challenge",
                "Protect streak",
                "Use Conversation Tavern for bonus EXP"
            ]
        );
        assert_eq!(report.action_plan[0].priority, Priority::High);
    }

    #[test]
    fn no_patterns_without_extremes() {
        let sessions = vec![record(GameMode::Vocab, 4, 1)];
        let report = analyze(&sessions, &PlayerStats::default(), 5);
        assert_eq!(report.recommendation, "No clear patterns yet. Keep playing!");
        assert_eq!(report.action_plan[0].title, "Keep the pace");
    }

    #[test]
    fn report_is_deterministic() {
        let sessions = vec![
            record(GameMode::Tavern, 2, 1),
            record(GameMode::Vocab, 2, 2),
            record(GameMode::Grammar, 2, 3),
        ];
        let stats = PlayerStats::default();
        assert_eq!(analyze(&sessions, &stats, 5), analyze(&sessions, &stats, 5));
        let weak: Vec<GameMode> = analyze(&sessions, &stats, 5)
            .weak_points
            .iter()
            .map(|i| i.mode)
            .collect();
        assert_eq!(weak, vec![GameMode::Vocab, GameMode::Grammar]);
    }
}
