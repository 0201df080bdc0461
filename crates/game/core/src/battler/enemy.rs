use std::sync::Arc;

use super::data::{EnemyData, elite_chance};
use super::model::{BattlerModel, BattlerStats};
use crate::env::{Damageable, HitOutcome, RandomSource};
use crate::events::BattlerEvent;

/// Experience and gold granted for a kill, plus what kind of enemy fell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub exp: f32,
    pub gold: u32,
    pub elite: bool,
    pub boss: bool,
}

/// A spawned enemy scaled to the erosion level it appeared at.
#[derive(Clone, Debug)]
pub struct EnemyModel {
    battler: BattlerModel,
    data: Arc<EnemyData>,
    level: u32,
    is_elite: bool,
    exp_reward: f32,
    gold_reward: u32,
}

impl EnemyModel {
    /// Creates an uninitialized enemy; call [`initialize`](Self::initialize)
    /// before use.
    pub fn new(data: Arc<EnemyData>) -> Self {
        Self {
            battler: BattlerModel::default(),
            data,
            level: 0,
            is_elite: false,
            exp_reward: 0.0,
            gold_reward: 0,
        }
    }

    /// Convenience for `new` followed by `initialize`.
    pub fn spawn(
        data: Arc<EnemyData>,
        level: u32,
        force_elite: bool,
        damage_multiplier: f32,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let mut enemy = Self::new(data);
        enemy.initialize(level, force_elite, damage_multiplier, rng);
        enemy
    }

    /// Scales stats to `level` and decides elite status.
    ///
    /// Elites are forced, or rolled against [`elite_chance`] when the data
    /// allows it. `damage_multiplier` comes from the selected difficulty.
    /// Queues `EliteStatusChanged` then `HpChanged`.
    pub fn initialize(
        &mut self,
        level: u32,
        force_elite: bool,
        damage_multiplier: f32,
        rng: &mut dyn RandomSource,
    ) {
        self.level = level;
        self.is_elite = if force_elite {
            true
        } else if self.data.can_be_elite {
            rng.next_f32() < elite_chance(level)
        } else {
            false
        };

        let elite = self.is_elite;
        self.battler.reset(BattlerStats {
            move_speed: self.data.move_speed,
            jump_power: 0.0,
            max_hp: self.data.max_hp(level, elite),
            damage: self.data.damage(level, elite) * damage_multiplier,
            armor: self.data.armor(elite),
        });
        self.exp_reward = self.data.exp_reward(level, elite);
        self.gold_reward = self.data.gold_reward(level, elite);

        tracing::debug!(
            enemy = %self.data.name,
            level,
            elite,
            max_hp = self.battler.max_hp(),
            damage = self.battler.damage(),
            "enemy initialized"
        );
        self.battler.emit(BattlerEvent::EliteStatusChanged(elite));
        self.battler.emit_hp();
    }

    pub fn battler(&self) -> &BattlerModel {
        &self.battler
    }

    pub fn battler_mut(&mut self) -> &mut BattlerModel {
        &mut self.battler
    }

    pub fn data(&self) -> &EnemyData {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_elite(&self) -> bool {
        self.is_elite
    }

    pub fn is_boss(&self) -> bool {
        self.data.is_boss
    }

    pub fn is_dead(&self) -> bool {
        self.battler.is_dead()
    }

    /// Kill reward; `None` while the enemy is still alive.
    pub fn reward(&self) -> Option<Reward> {
        self.is_dead().then_some(Reward {
            exp: self.exp_reward,
            gold: self.gold_reward,
            elite: self.is_elite,
            boss: self.data.is_boss,
        })
    }

    pub fn drain_events(&mut self) -> Vec<BattlerEvent> {
        self.battler.drain_events()
    }
}

impl Damageable for EnemyModel {
    fn take_hit(&mut self, damage: f32) -> HitOutcome {
        self.battler.take_hit(damage)
    }

    fn current_hp(&self) -> f32 {
        self.battler.cur_hp()
    }

    fn max_hp(&self) -> f32 {
        self.battler.max_hp()
    }

    fn is_dead(&self) -> bool {
        self.battler.is_dead()
    }
}
