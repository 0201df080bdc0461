use bitflags::bitflags;

use crate::common::ratio;
use crate::env::{Damageable, HitOutcome};
use crate::events::BattlerEvent;

bitflags! {
    /// Status flags carried by every battler.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BattlerFlags: u8 {
        /// Incoming hits are ignored.
        const INVINCIBLE = 1 << 0;
        /// HP reached zero; the battler is terminal.
        const DEAD = 1 << 1;
    }
}

/// Starting attributes for a [`BattlerModel`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattlerStats {
    pub move_speed: f32,
    pub jump_power: f32,
    pub max_hp: f32,
    pub damage: f32,
    pub armor: f32,
}

/// Combat state shared by heroes and enemies.
///
/// Invariant: `0 ≤ cur_hp ≤ max_hp`. Every mutation that a presentation layer
/// cares about is appended to an internal queue, drained by the owner with
/// [`BattlerModel::drain_events`].
#[derive(Clone, Debug, Default)]
pub struct BattlerModel {
    move_speed: f32,
    jump_power: f32,
    max_hp: f32,
    cur_hp: f32,
    damage: f32,
    armor: f32,
    flags: BattlerFlags,
    events: Vec<BattlerEvent>,
}

impl BattlerModel {
    /// Creates a battler at full HP. No events are queued.
    pub fn new(stats: BattlerStats) -> Self {
        let mut model = Self::default();
        model.reset(stats);
        model
    }

    /// Replaces every attribute and revives the battler at full HP.
    pub(crate) fn reset(&mut self, stats: BattlerStats) {
        self.move_speed = stats.move_speed;
        self.jump_power = stats.jump_power;
        self.max_hp = stats.max_hp.max(0.0);
        self.cur_hp = self.max_hp;
        self.damage = stats.damage;
        self.armor = stats.armor;
        self.flags = BattlerFlags::empty();
    }

    // ===== accessors =====

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn jump_power(&self) -> f32 {
        self.jump_power
    }

    pub fn max_hp(&self) -> f32 {
        self.max_hp
    }

    pub fn cur_hp(&self) -> f32 {
        self.cur_hp
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn armor(&self) -> f32 {
        self.armor
    }

    pub fn flags(&self) -> BattlerFlags {
        self.flags
    }

    pub fn is_dead(&self) -> bool {
        self.flags.contains(BattlerFlags::DEAD)
    }

    pub fn is_invincible(&self) -> bool {
        self.flags.contains(BattlerFlags::INVINCIBLE)
    }

    pub fn set_invincible(&mut self, invincible: bool) {
        self.flags.set(BattlerFlags::INVINCIBLE, invincible);
    }

    /// Fill ratio for an HP bar; 0 when `max_hp` is 0.
    pub fn hp_ratio(&self) -> f32 {
        ratio(self.cur_hp, self.max_hp)
    }

    // ===== combat =====

    /// Applies a hit reduced by armor.
    ///
    /// Queues `Hit`, then `HpChanged`, then `Died` if this hit was lethal.
    pub fn take_hit(&mut self, damage: f32) -> HitOutcome {
        if self.is_dead() || self.is_invincible() {
            tracing::debug!(
                damage,
                dead = self.is_dead(),
                invincible = self.is_invincible(),
                "hit ignored"
            );
            return HitOutcome::Ignored;
        }

        let effective = (damage - self.armor).max(0.0);
        let before = self.cur_hp;
        self.cur_hp = (self.cur_hp - effective).clamp(0.0, self.max_hp);

        self.emit(BattlerEvent::Hit { damage: effective });
        self.emit_hp();
        self.check_death();

        HitOutcome::Damaged {
            dealt: before - self.cur_hp,
        }
    }

    /// Removes HP directly, bypassing armor and invincibility.
    pub fn take_unmitigated(&mut self, amount: f32) {
        if self.is_dead() || amount <= 0.0 {
            return;
        }
        self.cur_hp = (self.cur_hp - amount).clamp(0.0, self.max_hp);
        self.emit_hp();
        self.check_death();
    }

    /// Hits `target` with this battler's damage.
    pub fn attack(&self, target: &mut dyn Damageable) -> HitOutcome {
        target.take_hit(self.damage)
    }

    // ===== stat changes =====

    pub fn heal(&mut self, amount: f32) {
        if self.is_dead() || amount <= 0.0 || self.cur_hp >= self.max_hp {
            return;
        }
        self.cur_hp = (self.cur_hp + amount).min(self.max_hp);
        self.emit_hp();
    }

    /// Raises (or lowers) max HP and current HP by the same amount.
    pub fn add_max_hp(&mut self, amount: f32) {
        self.max_hp = (self.max_hp + amount).max(0.0);
        if !self.is_dead() {
            self.cur_hp = (self.cur_hp + amount).clamp(0.0, self.max_hp);
        }
        self.emit_hp();
    }

    pub fn add_armor(&mut self, amount: f32) {
        self.armor += amount;
    }

    pub fn add_damage(&mut self, amount: f32) {
        self.damage += amount;
    }

    pub fn add_move_speed(&mut self, amount: f32) {
        self.move_speed += amount;
        self.emit(BattlerEvent::MoveSpeedChanged(self.move_speed));
    }

    pub fn add_jump_power(&mut self, amount: f32) {
        self.jump_power += amount;
        self.emit(BattlerEvent::JumpPowerChanged(self.jump_power));
    }

    // ===== events =====

    pub fn pending_events(&self) -> &[BattlerEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<BattlerEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: BattlerEvent) {
        self.events.push(event);
    }

    pub(crate) fn emit_hp(&mut self) {
        self.emit(BattlerEvent::HpChanged {
            current: self.cur_hp,
            max: self.max_hp,
        });
    }

    fn check_death(&mut self) {
        if self.cur_hp <= 0.0 && !self.is_dead() {
            self.cur_hp = 0.0;
            self.flags.insert(BattlerFlags::DEAD);
            self.emit(BattlerEvent::Died);
        }
    }
}

impl Damageable for BattlerModel {
    fn take_hit(&mut self, damage: f32) -> HitOutcome {
        BattlerModel::take_hit(self, damage)
    }

    fn current_hp(&self) -> f32 {
        self.cur_hp
    }

    fn max_hp(&self) -> f32 {
        self.max_hp
    }

    fn is_dead(&self) -> bool {
        BattlerModel::is_dead(self)
    }
}
