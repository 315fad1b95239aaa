use super::PlayerStats;

/// Raw EXP removed from current progress when the player faints.
pub const FAINT_EXP_PENALTY: i32 = 5;

impl PlayerStats {
    /// Take `dmg` damage after damage reduction. HP never drops below zero
    /// and is never raised, even for negative input.
    #[must_use]
    pub fn apply_damage(mut self, dmg: i32) -> Self {
        let effective = (f64::from(dmg) * (1.0 - self.damage_reduction)).round() as i32;
        self.hp = (self.hp - effective.max(0)).max(0);
        self
    }

    pub fn is_fainted(&self) -> bool {
        self.hp <= 0
    }

    /// Recover from a faint: lose up to 5 EXP of current progress (never a
    /// level) and come back at half of MaxHP.
    #[must_use]
    pub fn apply_faint_penalty(mut self) -> Self {
        self.exp = (self.exp - FAINT_EXP_PENALTY).max(0);
        self.hp = self.max_hp / 2;
        self
    }

    /// Apply the faint penalty only if HP is depleted. Returns whether it applied.
    #[must_use]
    pub fn apply_faint(self) -> (Self, bool) {
        if self.is_fainted() {
            (self.apply_faint_penalty(), true)
        } else {
            (self, false)
        }
    }
}
