//! Quiz-mode settlement: vocab, grammar, and listening.

use crate::progression::{
    allowed_misses, clear_bonus, damage_per_miss, q_exp_for, session_exp_clear,
    session_exp_fail, tier_for_level, FAIL_EXP_FACTOR,
};
use crate::{
    GameMode, GrammarAnswer, ListeningAnswer, PlayerStats, QuizAnswer, SessionSummary,
    VocabAnswer,
};

use super::{
    count, settle_faint, Settlement, SettlementKind, EMPTY_SESSION_NOTE, GRAMMAR_BASE_EXP,
    GRAMMAR_DEFENSE_PER_CORRECT, LISTENING_BASE_EXP, VOCAB_BASE_EXP,
};

/// Mode-specific constants for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizRules {
    pub mode: GameMode,
    pub base_exp: i32,
    /// Defense added per correct answer, applied once after the questions.
    pub defense_per_correct: f64,
    pub perfect_bonus: bool,
}

impl QuizRules {
    pub const VOCAB: QuizRules = QuizRules {
        mode: GameMode::Vocab,
        base_exp: VOCAB_BASE_EXP,
        defense_per_correct: 0.0,
        perfect_bonus: true,
    };

    pub const GRAMMAR: QuizRules = QuizRules {
        mode: GameMode::Grammar,
        base_exp: GRAMMAR_BASE_EXP,
        defense_per_correct: GRAMMAR_DEFENSE_PER_CORRECT,
        perfect_bonus: true,
    };

    pub const LISTENING: QuizRules = QuizRules {
        mode: GameMode::Listening,
        base_exp: LISTENING_BASE_EXP,
        defense_per_correct: 0.0,
        perfect_bonus: true,
    };
}

pub fn settle_vocab(stats: PlayerStats, answers: &[VocabAnswer]) -> Settlement {
    settle_quiz(stats, answers, QuizRules::VOCAB)
}

pub fn settle_grammar(stats: PlayerStats, answers: &[GrammarAnswer]) -> Settlement {
    settle_quiz(stats, answers, QuizRules::GRAMMAR)
}

pub fn settle_listening(stats: PlayerStats, answers: &[ListeningAnswer]) -> Settlement {
    settle_quiz(stats, answers, QuizRules::LISTENING)
}

/// Settle a quiz session.
///
/// Damage per miss is fixed for the whole session from the resynced MaxHP,
/// and is not reduced by `damage_reduction`. The first miss that empties HP
/// ends the session; later answers are never evaluated.
pub fn settle_quiz<A: QuizAnswer>(
    stats: PlayerStats,
    answers: &[A],
    rules: QuizRules,
) -> Settlement {
    let before = stats.clone();
    let mut stats = stats.sync_max_hp();

    let questions = count(answers.len());
    let dmg = damage_per_miss(stats.max_hp, allowed_misses(questions));
    let tier = tier_for_level(stats.level);
    let q_exp = q_exp_for(rules.base_exp, tier.multiplier, false);

    let mut summary = SessionSummary::new(rules.mode);
    summary.best_combo = stats.combo;
    let mut sum_correct_exp = 0;
    let mut fainted = false;

    for answer in answers {
        summary.answered += 1;
        if answer.is_correct() {
            stats = stats.add_combo();
            summary.best_combo = summary.best_combo.max(stats.combo);
            summary.correct += 1;
            sum_correct_exp += q_exp;
        } else {
            stats = stats.reset_combo();
            summary.hp_delta -= dmg;
            stats.hp -= dmg;
            if stats.hp <= 0 {
                stats.hp = 0;
                fainted = true;
                break;
            }
        }
    }

    summary.defense_delta = rules.defense_per_correct * f64::from(summary.correct);
    if summary.defense_delta > 0.0 {
        stats = stats.add_defense(summary.defense_delta);
    }

    let kind = if !fainted && summary.answered == questions {
        SettlementKind::Clear
    } else {
        SettlementKind::Fail
    };

    summary.exp_delta = match kind {
        SettlementKind::Clear => session_exp_clear(
            sum_correct_exp,
            clear_bonus(questions, rules.base_exp, tier.multiplier),
            summary.correct == questions,
            questions,
            rules.perfect_bonus,
        ),
        SettlementKind::Fail => session_exp_fail(sum_correct_exp, FAIL_EXP_FACTOR),
    };
    stats = stats.gain_exp(summary.exp_delta);

    if fainted {
        let (after, _, exp_lost) = settle_faint(stats);
        stats = after;
        summary.exp_lost = exp_lost;
    }

    summary.fainted = fainted;
    summary.leveled_up = before.leveled_up_to(&stats);
    if answers.is_empty() {
        summary = summary.with_note(EMPTY_SESSION_NOTE);
    }

    Settlement {
        stats,
        summary,
        kind,
    }
}
