//! Immutable stat tables for heroes and enemies, plus the scaling formulas
//! applied to them.
use crate::config::GameConfig;

/// Per-archetype hero stats and level-up increments.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeroData {
    pub name: String,
    pub max_hp: f32,
    pub hp_increment: f32,
    /// HP regenerated per second.
    pub hp_regen: f32,
    pub hp_regen_increment: f32,
    pub move_speed: f32,
    pub jump_power: f32,
    pub damage: f32,
    pub damage_increment: f32,
    pub armor: f32,
    pub armor_increment: f32,
    pub base_exp: f32,
    pub exp_increment_rate: f32,
}

impl HeroData {
    /// Experience needed to clear `level`.
    pub fn max_exp(&self, level: u32) -> f32 {
        if level == 0 {
            return self.base_exp;
        }
        self.base_exp * self.exp_increment_rate.powi(level as i32)
    }
}

/// Enemy base stats and their per-erosion-level growth.
///
/// Every scaled value follows `base × (1 + rate × level)`, multiplied by the
/// matching elite multiplier for elites.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyData {
    pub name: String,
    pub can_be_elite: bool,
    /// Bosses roll the boss item table when defeated.
    pub is_boss: bool,

    // ===== base stats =====
    pub base_max_hp: f32,
    pub base_damage: f32,
    pub armor: f32,
    pub move_speed: f32,
    pub base_exp_reward: f32,
    pub base_gold_reward: u32,

    // ===== per-level growth =====
    pub hp_increase_rate: f32,
    pub damage_increase_rate: f32,
    pub exp_reward_increase_rate: f32,
    pub gold_reward_increase_rate: f32,

    // ===== elite multipliers =====
    pub elite_hp_multiplier: f32,
    pub elite_damage_multiplier: f32,
    pub elite_armor_multiplier: f32,
    pub elite_exp_multiplier: f32,
    pub elite_gold_multiplier: f32,
}

impl Default for EnemyData {
    fn default() -> Self {
        Self {
            name: String::new(),
            can_be_elite: true,
            is_boss: false,
            base_max_hp: 0.0,
            base_damage: 0.0,
            armor: 0.0,
            move_speed: 0.0,
            base_exp_reward: 0.0,
            base_gold_reward: 0,
            hp_increase_rate: 0.3,
            damage_increase_rate: 0.2,
            exp_reward_increase_rate: 0.2,
            gold_reward_increase_rate: 0.2,
            elite_hp_multiplier: 2.0,
            elite_damage_multiplier: 1.5,
            elite_armor_multiplier: 1.5,
            elite_exp_multiplier: 3.0,
            elite_gold_multiplier: 2.0,
        }
    }
}

#[inline]
fn scaled(base: f32, rate: f32, level: u32) -> f32 {
    base * (1.0 + rate * level as f32)
}

impl EnemyData {
    pub fn max_hp(&self, level: u32, elite: bool) -> f32 {
        let hp = scaled(self.base_max_hp, self.hp_increase_rate, level);
        if elite { hp * self.elite_hp_multiplier } else { hp }
    }

    pub fn damage(&self, level: u32, elite: bool) -> f32 {
        let damage = scaled(self.base_damage, self.damage_increase_rate, level);
        if elite {
            damage * self.elite_damage_multiplier
        } else {
            damage
        }
    }

    pub fn armor(&self, elite: bool) -> f32 {
        if elite {
            self.armor * self.elite_armor_multiplier
        } else {
            self.armor
        }
    }

    pub fn exp_reward(&self, level: u32, elite: bool) -> f32 {
        let exp = scaled(self.base_exp_reward, self.exp_reward_increase_rate, level);
        if elite {
            exp * self.elite_exp_multiplier
        } else {
            exp
        }
    }

    /// Gold is truncated to a whole amount before and after the elite bonus.
    pub fn gold_reward(&self, level: u32, elite: bool) -> u32 {
        let gold = scaled(
            self.base_gold_reward as f32,
            self.gold_reward_increase_rate,
            level,
        ) as u32;
        if elite {
            (gold as f32 * self.elite_gold_multiplier) as u32
        } else {
            gold
        }
    }
}

/// Probability that an enemy spawned at `level` rolls elite.
///
/// Zero below level 7, 1% plus 1% per level above 6 up to level 29, and a
/// flat cap from level 30.
pub fn elite_chance(level: u32) -> f32 {
    if level < GameConfig::ELITE_MIN_LEVEL {
        return 0.0;
    }
    if level >= GameConfig::ELITE_CAP_LEVEL {
        return GameConfig::ELITE_MAX_CHANCE;
    }
    let chance = 0.01 + (level - 6) as f32 * 0.01;
    chance.clamp(0.0, GameConfig::ELITE_MAX_CHANCE)
}
