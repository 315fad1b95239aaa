use super::PlayerStats;
use crate::progression::{exp_to_next, max_hp_for_level};

impl PlayerStats {
    /// Gain EXP, scaled by `exp_boost`, rolling any overflow into as many
    /// level-ups as it pays for.
    #[must_use]
    ///
    /// A single award is capped at `i32::MAX` after the boost; the running
    /// total is kept in `i64` so it never wraps.
    pub fn gain_exp(mut self, gained: i32) -> Self {
        let boosted = (f64::from(gained) * (1.0 + self.exp_boost)).round();
        let effective = boosted.clamp(0.0, f64::from(i32::MAX)) as i64;
        if self.next <= 0 {
            self.next = exp_to_next(self.level);
        }
        let mut total = i64::from(self.exp) + effective;
        while total >= i64::from(self.next) {
            total -= i64::from(self.next);
            self = self.level_up();
        }
        // total < next <= i32::MAX here
        self.exp = i32::try_from(total).unwrap_or(i32::MAX);
        self
    }

    /// Advance one level: new thresholds, a full heal, and stat growth.
    #[must_use]
    pub fn level_up(mut self) -> Self {
        self.level = self.level.saturating_add(1);
        self.next = exp_to_next(self.level);
        self.max_hp = max_hp_for_level(self.level);
        self.hp = self.max_hp;
        self.attack += 2.0;
        self.defense += 1.0;
        self
    }
}
