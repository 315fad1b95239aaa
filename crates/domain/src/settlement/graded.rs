//! Graded-mode settlement: spelling and tavern.
//!
//! Each outcome carries a flat reward. There is no tier scaling and no
//! mid-session faint; HP is only checked once after all rewards land.

use crate::{GameMode, PlayerStats, SessionSummary, SpellingOutcome, TavernOutcome};

use super::{settle_faint, Settlement, SettlementKind, EMPTY_SESSION_NOTE};

/// Settle a spelling session.
///
/// Damage is applied per outcome through `apply_damage`, so damage reduction
/// softens it. EXP is granted before the faint check: a level-up heals the
/// player and can prevent the faint.
pub fn settle_spelling(stats: PlayerStats, outcomes: &[SpellingOutcome]) -> Settlement {
    let before = stats.clone();
    let mut stats = stats.sync_max_hp();
    let mut summary = SessionSummary::new(GameMode::Spelling);
    summary.best_combo = stats.combo;

    for outcome in outcomes {
        summary.answered += 1;
        summary.exp_delta += outcome.exp();
        if *outcome == SpellingOutcome::Perfect {
            summary.correct += 1;
            stats = stats.add_combo();
            summary.best_combo = summary.best_combo.max(stats.combo);
        } else {
            stats = stats.reset_combo();
        }
        let hp_before = stats.hp;
        stats = stats.apply_damage(outcome.damage());
        summary.hp_delta += stats.hp - hp_before;
    }

    stats = stats.gain_exp(summary.exp_delta);
    finish(before, stats, summary, outcomes.is_empty())
}

/// Settle a tavern conversation.
///
/// Tavern rounds never deal damage, but a player who enters with no HP
/// still takes the faint penalty.
pub fn settle_tavern(stats: PlayerStats, outcomes: &[TavernOutcome]) -> Settlement {
    let before = stats.clone();
    let mut stats = stats.sync_max_hp();
    let mut summary = SessionSummary::new(GameMode::Tavern);
    summary.best_combo = stats.combo;

    for outcome in outcomes {
        summary.answered += 1;
        summary.exp_delta += outcome.exp();
        summary.gold_delta += outcome.gold();
        if *outcome == TavernOutcome::Success {
            summary.correct += 1;
            stats = stats.add_combo();
            summary.best_combo = summary.best_combo.max(stats.combo);
        } else {
            stats = stats.reset_combo();
        }
    }

    stats = stats.gain_exp(summary.exp_delta).add_gold(summary.gold_delta);
    finish(before, stats, summary, outcomes.is_empty())
}

fn finish(
    before: PlayerStats,
    stats: PlayerStats,
    mut summary: SessionSummary,
    empty: bool,
) -> Settlement {
    let (stats, fainted, exp_lost) = settle_faint(stats);
    summary.fainted = fainted;
    summary.exp_lost = exp_lost;
    summary.leveled_up = before.leveled_up_to(&stats);
    if empty {
        summary = summary.with_note(EMPTY_SESSION_NOTE);
    }

    let kind = if fainted {
        SettlementKind::Fail
    } else {
        SettlementKind::Clear
    };

    Settlement {
        stats,
        summary,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SpellingOutcome::{Fail, Near, Perfect};

    mod spelling {
        use super::*;

        #[test]
        fn mixed_outcomes_accumulate_rewards_and_damage() {
            let stats = PlayerStats::default();
            let result = settle_spelling(stats, &[Perfect, Near, Fail, Perfect, Near]);

            assert_eq!(result.summary.exp_delta, 15);
            assert_eq!(result.summary.hp_delta, -22);
            assert_eq!(result.stats.hp, 8);
            assert_eq!(result.stats.exp, 15);
            assert_eq!(result.summary.correct, 2);
            assert_eq!(result.summary.best_combo, 1);
            assert!(!result.summary.fainted);
            assert_eq!(result.kind, SettlementKind::Clear);
        }

        #[test]
        fn emptied_hp_faints_after_exp_is_granted() {
            let stats = PlayerStats::default();
            let result = settle_spelling(stats, &[Fail, Fail, Fail]);

            // the last hit is clamped at zero HP
            assert_eq!(result.summary.hp_delta, -30);
            assert!(result.summary.fainted);
            assert_eq!(result.summary.exp_delta, 3);
            assert_eq!(result.summary.exp_lost, 3);
            assert_eq!(result.stats.exp, 0);
            assert_eq!(result.stats.hp, 15);
            assert_eq!(result.kind, SettlementKind::Fail);
        }

        #[test]
        fn damage_reduction_softens_hits() {
            let stats = PlayerStats {
                damage_reduction: 0.5,
                ..PlayerStats::default()
            };
            let result = settle_spelling(stats, &[Fail]);
            assert_eq!(result.summary.hp_delta, -6);
            assert_eq!(result.stats.hp, 24);
        }

        #[test]
        fn level_up_heals_before_the_faint_check() {
            let stats = PlayerStats {
                exp: 28,
                ..PlayerStats::default()
            };
            let result = settle_spelling(stats, &[Fail, Fail, Fail, Perfect]);

            assert!(result.summary.leveled_up);
            assert!(!result.summary.fainted);
            assert_eq!(result.stats.level, 2);
            assert_eq!(result.stats.hp, result.stats.max_hp);
        }

        #[test]
        fn judged_input_settles_end_to_end() {
            let attempts = [("aple", "apple"), ("Apple ", "apple"), ("pear", "apple")];
            let outcomes: Vec<SpellingOutcome> = attempts
                .into_iter()
                .map(|(input, expected)| SpellingOutcome::judge(input, expected))
                .collect();
            assert_eq!(outcomes, vec![Near, Perfect, Fail]);

            let result = settle_spelling(PlayerStats::default(), &outcomes);
            assert_eq!(result.summary.exp_delta, 8);
        }
    }

    mod tavern {
        use super::*;

        #[test]
        fn rewards_exp_and_gold_without_damage() {
            use TavernOutcome::{Fail, Normal, Success};

            let stats = PlayerStats::default();
            let result = settle_tavern(stats.clone(), &[Success, Normal, Fail, Success]);

            assert_eq!(result.summary.exp_delta, 14);
            assert_eq!(result.summary.gold_delta, 25);
            assert_eq!(result.stats.gold, stats.gold + 25);
            assert_eq!(result.stats.hp, stats.hp);
            assert_eq!(result.summary.hp_delta, 0);
            assert_eq!(result.summary.correct, 2);
            assert!(!result.summary.fainted);
        }

        #[test]
        fn entering_with_no_hp_still_faints() {
            let stats = PlayerStats {
                hp: 0,
                exp: 10,
                ..PlayerStats::default()
            };
            let result = settle_tavern(stats, &[TavernOutcome::Normal]);

            assert!(result.summary.fainted);
            assert_eq!(result.stats.exp, 8);
            assert_eq!(result.summary.exp_lost, 5);
            assert_eq!(result.stats.hp, 15);
        }
    }
}
