//! Item drops rolled when a boss or an elite falls.
use std::sync::Arc;

use super::item::{ItemData, ItemEffect, ItemRarity};
use crate::battler::Reward;
use crate::env::RandomSource;

/// Drop chances and the rarity split for elite drops.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DropConfig {
    pub boss_drop_chance: f32,
    /// Only rolled while the hero carries [`DropConfig::ELITE_DROP_EFFECT`].
    pub elite_drop_chance: f32,
    /// Elite drop rolls below this are common.
    pub common_threshold: f32,
    /// Elite drop rolls below this (and above common) are uncommon; the rest
    /// are legendary.
    pub uncommon_threshold: f32,
}

impl DropConfig {
    /// Special effect that lets elites drop items.
    pub const ELITE_DROP_EFFECT: &'static str = "four_leaf_clover";

    /// Rarity for a uniform roll in `[0, 1)`.
    pub fn rarity_for(&self, roll: f32) -> ItemRarity {
        if roll < self.common_threshold {
            ItemRarity::Common
        } else if roll < self.uncommon_threshold {
            ItemRarity::Uncommon
        } else {
            ItemRarity::Legendary
        }
    }
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            boss_drop_chance: 0.1,
            elite_drop_chance: 0.05,
            common_threshold: 0.7,
            uncommon_threshold: 0.95,
        }
    }
}

/// Passive items grouped for drop rolls.
#[derive(Clone, Debug, Default)]
pub struct ItemDropTable {
    config: DropConfig,
    passives: Vec<Arc<ItemData>>,
}

impl ItemDropTable {
    /// Keeps only the passive items of `catalog`; usables never drop.
    pub fn new(config: DropConfig, catalog: &[Arc<ItemData>]) -> Self {
        let passives = catalog
            .iter()
            .filter(|item| matches!(item.effect, ItemEffect::Passive(_)))
            .cloned()
            .collect();
        Self { config, passives }
    }

    pub fn config(&self) -> &DropConfig {
        &self.config
    }

    /// Rolls the drop for a kill. Bosses use the boss table; elites only
    /// drop when `lucky` (the hero holds the elite drop effect).
    pub fn roll(
        &self,
        reward: &Reward,
        lucky: bool,
        rng: &mut dyn RandomSource,
    ) -> Option<Arc<ItemData>> {
        let rarity = if reward.boss {
            if rng.next_f32() >= self.config.boss_drop_chance {
                return None;
            }
            ItemRarity::BossItem
        } else if reward.elite && lucky {
            if rng.next_f32() >= self.config.elite_drop_chance {
                return None;
            }
            self.config.rarity_for(rng.next_f32())
        } else {
            return None;
        };
        self.pick(rarity, rng)
    }

    /// Uniform pick among the passives of `rarity`.
    pub fn pick(&self, rarity: ItemRarity, rng: &mut dyn RandomSource) -> Option<Arc<ItemData>> {
        let pool: Vec<&Arc<ItemData>> = self
            .passives
            .iter()
            .filter(|item| item.rarity == rarity)
            .collect();
        if pool.is_empty() {
            tracing::debug!(%rarity, "no items of rarity to drop");
            return None;
        }
        Some(Arc::clone(pool[rng.next_index(pool.len())]))
    }
}
