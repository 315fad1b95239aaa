use super::PlayerStats;
use crate::progression::max_hp_for_level;

impl PlayerStats {
    /// Resync MaxHP to the current level and restore HP to it.
    #[must_use]
    pub fn full_heal(mut self) -> Self {
        self.max_hp = max_hp_for_level(self.level);
        self.hp = self.max_hp;
        self
    }

    /// Resync MaxHP to the current level without healing. HP is clamped
    /// into the new range.
    #[must_use]
    pub fn sync_max_hp(mut self) -> Self {
        self.max_hp = max_hp_for_level(self.level);
        self.hp = self.hp.clamp(0, self.max_hp);
        self
    }

    /// True when MaxHP no longer matches the level or HP is out of range.
    pub fn needs_resync(&self) -> bool {
        self.max_hp != max_hp_for_level(self.level) || self.hp < 0 || self.hp > self.max_hp
    }
}
