use super::data::HeroData;
use super::model::{BattlerModel, BattlerStats};
use crate::env::{CasterBody, Damageable, EffectSink, HitOutcome, TargetQuery};
use crate::events::{BattlerEvent, SkillEvent};
use crate::skill::{Archetype, SkillContext, SkillLoadout, SkillManager, SkillSlot, UseOutcome};

/// The controllable hero: a battler plus regen, experience, level, gold and
/// the skill manager.
#[derive(Debug)]
pub struct HeroModel {
    battler: BattlerModel,
    skills: SkillManager,
    data: HeroData,
    hp_regen: f32,
    cur_exp: f32,
    max_exp: f32,
    level: u32,
    gold: u32,
}

impl HeroModel {
    /// Builds a level 1 hero from `data` and queues the initial HP, speed,
    /// jump, exp, level and gold notifications.
    pub fn new(data: HeroData) -> Self {
        let battler = BattlerModel::new(BattlerStats {
            move_speed: data.move_speed,
            jump_power: data.jump_power,
            max_hp: data.max_hp,
            damage: data.damage,
            armor: data.armor,
        });
        let mut hero = Self {
            battler,
            skills: SkillManager::new(),
            hp_regen: data.hp_regen,
            cur_exp: 0.0,
            max_exp: data.max_exp(1),
            level: 1,
            gold: 0,
            data,
        };
        tracing::info!(hero = %hero.data.name, max_hp = hero.data.max_hp, "hero initialized");
        hero.emit_initial_state();
        hero
    }

    fn emit_initial_state(&mut self) {
        self.battler.emit_hp();
        self.battler
            .emit(BattlerEvent::MoveSpeedChanged(self.battler.move_speed()));
        self.battler
            .emit(BattlerEvent::JumpPowerChanged(self.battler.jump_power()));
        self.battler.emit(BattlerEvent::ExpChanged {
            current: self.cur_exp,
            max: self.max_exp,
        });
        self.battler.emit(BattlerEvent::LevelChanged {
            old: self.level,
            new: self.level,
        });
        self.battler.emit(BattlerEvent::GoldChanged(self.gold));
    }

    pub fn battler(&self) -> &BattlerModel {
        &self.battler
    }

    pub fn battler_mut(&mut self) -> &mut BattlerModel {
        &mut self.battler
    }

    pub fn data(&self) -> &HeroData {
        &self.data
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn cur_exp(&self) -> f32 {
        self.cur_exp
    }

    pub fn max_exp(&self) -> f32 {
        self.max_exp
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn hp_regen(&self) -> f32 {
        self.hp_regen
    }

    pub fn is_dead(&self) -> bool {
        self.battler.is_dead()
    }

    /// Continuous regeneration; call once per frame.
    pub fn regen(&mut self, dt: f32) {
        if dt <= 0.0 || self.hp_regen <= 0.0 {
            return;
        }
        self.battler.heal(self.hp_regen * dt);
    }

    pub fn add_hp_regen(&mut self, amount: f32) {
        self.hp_regen += amount;
    }

    /// Damage dealt by the dark while the light is out: a fraction of max HP,
    /// ignoring armor.
    pub fn take_darkness_hit(&mut self, fraction: f32) {
        let amount = self.battler.max_hp() * fraction;
        tracing::debug!(amount, "darkness hit");
        self.battler.take_unmitigated(amount);
    }

    /// Adds experience, levelling up as many times as the total allows.
    ///
    /// Queues one `ExpChanged` and, if the level moved, a single
    /// `LevelChanged { old, new }`.
    pub fn add_exp(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        let old_level = self.level;
        self.cur_exp += amount;

        while self.cur_exp >= self.max_exp {
            if self.max_exp <= 0.0 {
                tracing::warn!(level = self.level, "non-positive exp requirement; stopping level-ups");
                break;
            }
            self.cur_exp -= self.max_exp;
            self.level_up();
            self.max_exp = self.data.max_exp(self.level);
        }

        self.battler.emit(BattlerEvent::ExpChanged {
            current: self.cur_exp,
            max: self.max_exp,
        });
        if old_level != self.level {
            tracing::info!(old = old_level, new = self.level, "hero level up");
            self.battler.emit(BattlerEvent::LevelChanged {
                old: old_level,
                new: self.level,
            });
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.battler.add_max_hp(self.data.hp_increment);
        self.hp_regen += self.data.hp_regen_increment;
        self.battler.add_damage(self.data.damage_increment);
        self.battler.add_armor(self.data.armor_increment);
    }

    pub fn add_gold(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }
        self.gold = self.gold.saturating_add(amount);
        self.battler.emit(BattlerEvent::GoldChanged(self.gold));
    }

    /// Spends gold if the balance covers it.
    pub fn try_spend_gold(&mut self, amount: u32) -> bool {
        if amount == 0 || self.gold < amount {
            return false;
        }
        self.gold -= amount;
        self.battler.emit(BattlerEvent::GoldChanged(self.gold));
        true
    }

    pub fn drain_events(&mut self) -> Vec<BattlerEvent> {
        self.battler.drain_events()
    }

    // ===== skills =====

    pub fn skills(&self) -> &SkillManager {
        &self.skills
    }

    pub fn init_skills(&mut self, archetype: Archetype, loadout: &SkillLoadout) {
        self.skills.initialize(archetype, loadout);
    }

    /// Casts the skill in `slot`. Dead heroes cannot cast.
    pub fn use_skill(
        &mut self,
        slot: SkillSlot,
        body: &mut dyn CasterBody,
        targets: &mut dyn TargetQuery,
        effects: &mut dyn EffectSink,
    ) -> UseOutcome {
        if self.battler.is_dead() {
            return UseOutcome::Rejected;
        }
        let mut ctx = SkillContext::new(&mut self.battler, body, targets, effects);
        self.skills.use_skill(slot, &mut ctx)
    }

    pub fn tick_skills(
        &mut self,
        dt: f32,
        body: &mut dyn CasterBody,
        targets: &mut dyn TargetQuery,
        effects: &mut dyn EffectSink,
    ) {
        let mut ctx = SkillContext::new(&mut self.battler, body, targets, effects);
        self.skills.tick(dt, &mut ctx);
    }

    pub fn interrupt_skills(
        &mut self,
        body: &mut dyn CasterBody,
        targets: &mut dyn TargetQuery,
        effects: &mut dyn EffectSink,
    ) {
        let mut ctx = SkillContext::new(&mut self.battler, body, targets, effects);
        self.skills.interrupt_all(&mut ctx);
    }

    pub fn reset_all_cooldowns(&mut self) {
        self.skills.reset_all_cooldowns();
    }

    pub fn is_movement_blocked(&self) -> bool {
        self.skills.is_movement_blocked()
    }

    pub fn drain_skill_events(&mut self) -> Vec<SkillEvent> {
        self.skills.drain_events()
    }
}

impl Damageable for HeroModel {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn knight() -> HeroData {
        HeroData {
            name: "knight".into(),
            max_hp: 100.0,
            hp_increment: 10.0,
            hp_regen: 2.0,
            hp_regen_increment: 0.5,
            move_speed: 5.0,
            jump_power: 10.0,
            damage: 10.0,
            damage_increment: 2.0,
            armor: 5.0,
            armor_increment: 1.0,
            base_exp: 100.0,
            exp_increment_rate: 1.0,
        }
    }

    #[test]
    fn initialization_queues_initial_state() {
        let mut hero = HeroModel::new(knight());
        let events = hero.drain_events();

        assert_eq!(events.len(), 6);
        assert_eq!(
            events[0],
            BattlerEvent::HpChanged {
                current: 100.0,
                max: 100.0
            }
        );
        assert_eq!(events[4], BattlerEvent::LevelChanged { old: 1, new: 1 });
        assert_eq!(events[5], BattlerEvent::GoldChanged(0));
    }

    #[test]
    fn regen_stops_at_max() {
        let mut hero = HeroModel::new(knight());
        hero.take_hit(25.0);
        hero.drain_events();

        hero.regen(1.0);
        assert_eq!(hero.battler().cur_hp(), 82.0);
        hero.regen(100.0);
        assert_eq!(hero.battler().cur_hp(), 100.0);

        hero.drain_events();
        hero.regen(1.0);
        assert!(hero.drain_events().is_empty());
    }

    #[test]
    fn darkness_ignores_armor() {
        let mut hero = HeroModel::new(knight());
        hero.take_darkness_hit(0.08);
        assert!((hero.battler().cur_hp() - 92.0).abs() < 1e-4);
    }

    #[test]
    fn exp_overflow_levels_up_repeatedly_with_one_level_event() {
        let mut hero = HeroModel::new(knight());
        hero.drain_events();

        hero.add_exp(250.0);

        assert_eq!(hero.level(), 3);
        assert!((hero.cur_exp() - 50.0).abs() < 1e-4);
        assert_eq!(hero.battler().max_hp(), 120.0);
        assert_eq!(hero.battler().damage(), 14.0);
        assert_eq!(hero.battler().armor(), 7.0);

        let level_events: Vec<_> = hero
            .drain_events()
            .into_iter()
            .filter(|event| matches!(event, BattlerEvent::LevelChanged { .. }))
            .collect();
        assert_eq!(level_events, vec![BattlerEvent::LevelChanged { old: 1, new: 3 }]);
    }

    #[test]
    fn zero_exp_requirement_does_not_spin() {
        let mut hero = HeroModel::new(HeroData {
            base_exp: 0.0,
            ..knight()
        });
        hero.add_exp(10.0);
        assert_eq!(hero.level(), 1);
    }

    #[test]
    fn dead_hero_cannot_cast() {
        use crate::env::{CollisionLayer, KinematicBody, NoTargets, NullEffects};
        use crate::skill::SkillData;
        use std::sync::Arc;

        let mut hero = HeroModel::new(knight());
        let data = Arc::new(SkillData::new("Guard").with_cooldown(5.0).with_duration(2.0));
        hero.init_skills(
            Archetype::Warrior,
            &SkillLoadout::new(data.clone(), data.clone(), data),
        );
        let mut body = KinematicBody::new(Default::default(), CollisionLayer::Hero);

        let outcome = hero.use_skill(SkillSlot::MoveSkill, &mut body, &mut NoTargets, &mut NullEffects);
        assert!(outcome.is_used());
        assert_eq!(hero.battler().armor(), 10.0);

        hero.take_hit(1000.0);
        let outcome = hero.use_skill(SkillSlot::Skill1, &mut body, &mut NoTargets, &mut NullEffects);
        assert_eq!(outcome, UseOutcome::Rejected);
    }

    #[test]
    fn gold_spending_checks_balance() {
        let mut hero = HeroModel::new(knight());
        hero.add_gold(0);
        hero.add_gold(30);
        assert!(!hero.try_spend_gold(31));
        assert!(hero.try_spend_gold(30));
        assert_eq!(hero.gold(), 0);
    }
}
