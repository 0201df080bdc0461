use std::sync::Arc;

use super::item::{ItemData, ItemEffect, PassiveEffect, UsableEffect};
use crate::battler::HeroModel;
use crate::common::Vec2;
use crate::env::TargetQuery;
use crate::events::InventoryEvent;
use crate::light::LightGauge;

#[derive(Clone, Debug, PartialEq)]
pub struct PassiveSlot {
    pub item: Arc<ItemData>,
    pub count: u32,
}

/// Undo step for a temporary usable effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Revert {
    MoveSpeed(f32),
}

impl Revert {
    pub fn apply(self, hero: &mut HeroModel) {
        match self {
            Self::MoveSpeed(amount) => {
                hero.battler_mut().add_move_speed(-amount);
                tracing::debug!(amount, "speed boost expired");
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemOutcome {
    /// Nothing equipped, still cooling down, or the effect had no target.
    Rejected,
    Applied,
    /// Applied; the caller must run `revert` after `delay` seconds.
    Deferred { delay: f32, revert: Revert },
}

/// Collaborators a usable effect may touch.
pub struct ItemContext<'a> {
    pub hero: &'a mut HeroModel,
    pub position: Vec2,
    pub targets: &'a mut dyn TargetQuery,
    pub light: Option<&'a mut LightGauge>,
}

/// Passive item stacks plus one equipped usable item.
#[derive(Clone, Debug, Default)]
pub struct PlayerInventory {
    passives: Vec<PassiveSlot>,
    equipped: Option<Arc<ItemData>>,
    cooldown_remaining: f32,
    gold_bonus_pct: f32,
    events: Vec<InventoryEvent>,
}

impl PlayerInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stacks a passive (and applies its bonus to `hero`) or equips a usable.
    pub fn add_item(&mut self, item: Arc<ItemData>, hero: &mut HeroModel) {
        match &item.effect {
            ItemEffect::Passive(effect) => {
                let effect = effect.clone();
                self.add_passive(Arc::clone(&item), &effect, hero);
            }
            ItemEffect::Usable(_) => self.equip(item),
        }
    }

    fn add_passive(&mut self, item: Arc<ItemData>, effect: &PassiveEffect, hero: &mut HeroModel) {
        let count = match self.passives.iter_mut().find(|slot| slot.item.name == item.name) {
            Some(slot) => {
                slot.count += 1;
                slot.count
            }
            None => {
                self.passives.push(PassiveSlot {
                    item: Arc::clone(&item),
                    count: 1,
                });
                1
            }
        };

        self.apply_passive(effect, item.value, hero);
        tracing::info!(item = %item.name, count, "passive item acquired");
        self.events.push(InventoryEvent::PassiveAdded {
            name: item.name.clone(),
            count,
        });
    }

    fn apply_passive(&mut self, effect: &PassiveEffect, value: f32, hero: &mut HeroModel) {
        match effect {
            PassiveEffect::MaxHpBonus => hero.battler_mut().add_max_hp(value),
            PassiveEffect::DamageBonus => hero.battler_mut().add_damage(value),
            PassiveEffect::MoveSpeedBonus => hero.battler_mut().add_move_speed(value),
            PassiveEffect::DefenseBonus => hero.battler_mut().add_armor(value),
            PassiveEffect::HpRegenBonus => hero.add_hp_regen(value),
            PassiveEffect::GoldBonus => self.gold_bonus_pct += value,
            PassiveEffect::SpecialEffect(id) => {
                tracing::debug!(effect = %id, "special effect registered");
            }
            PassiveEffect::AttackSpeedBonus | PassiveEffect::LuckBonus => {
                tracing::warn!(?effect, "passive effect not supported; item kept without bonus");
            }
        }
    }

    /// Equips a usable item, replacing the previous one. Ready immediately.
    fn equip(&mut self, item: Arc<ItemData>) {
        tracing::info!(item = %item.name, "usable item equipped");
        self.cooldown_remaining = 0.0;
        self.events.push(InventoryEvent::UsableEquipped {
            name: item.name.clone(),
        });
        self.equipped = Some(item);
    }

    pub fn can_use_item(&self) -> bool {
        self.equipped.is_some() && self.cooldown_remaining <= 0.0
    }

    /// Activates the equipped item if its cooldown allows.
    pub fn use_equipped(&mut self, ctx: &mut ItemContext<'_>) -> ItemOutcome {
        let Some(item) = self.equipped.clone() else {
            tracing::debug!("no usable item equipped");
            return ItemOutcome::Rejected;
        };
        if self.cooldown_remaining > 0.0 {
            tracing::debug!(item = %item.name, remaining = self.cooldown_remaining, "item cooling down");
            return ItemOutcome::Rejected;
        }
        let ItemEffect::Usable(effect) = &item.effect else {
            return ItemOutcome::Rejected;
        };

        let outcome = match effect {
            UsableEffect::Heal => {
                ctx.hero.battler_mut().heal(item.value);
                ItemOutcome::Applied
            }
            UsableEffect::SpeedBoost { duration } => {
                ctx.hero.battler_mut().add_move_speed(item.value);
                ItemOutcome::Deferred {
                    delay: *duration,
                    revert: Revert::MoveSpeed(item.value),
                }
            }
            UsableEffect::Bomb { range } => {
                let candidates = ctx.targets.candidates_within(ctx.position, *range);
                for info in &candidates {
                    if let Some(target) = ctx.targets.target_mut(info.id) {
                        target.take_hit(item.value);
                    }
                }
                tracing::debug!(hits = candidates.len(), "bomb detonated");
                ItemOutcome::Applied
            }
            UsableEffect::LightRecharge => match ctx.light.as_deref_mut() {
                Some(light) => {
                    light.add(item.value);
                    ItemOutcome::Applied
                }
                None => {
                    tracing::warn!(item = %item.name, "no light source to recharge");
                    ItemOutcome::Rejected
                }
            },
        };

        if outcome != ItemOutcome::Rejected {
            self.cooldown_remaining = item.cooldown.max(0.0);
            self.events.push(InventoryEvent::UsableUsed {
                name: item.name.clone(),
            });
        }
        outcome
    }

    /// Counts down the usable cooldown and reports it.
    pub fn tick(&mut self, dt: f32) {
        let Some(item) = &self.equipped else {
            return;
        };
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
            self.events.push(InventoryEvent::UsableCooldownChanged {
                remaining: self.cooldown_remaining,
                max: item.cooldown,
            });
        }
    }

    pub fn equipped(&self) -> Option<&ItemData> {
        self.equipped.as_deref()
    }

    pub fn passives(&self) -> &[PassiveSlot] {
        &self.passives
    }

    pub fn passive_count(&self, name: &str) -> u32 {
        self.passives
            .iter()
            .find(|slot| slot.item.name == name)
            .map_or(0, |slot| slot.count)
    }

    pub fn has_special_effect(&self, id: &str) -> bool {
        self.passives.iter().any(|slot| {
            matches!(&slot.item.effect, ItemEffect::Passive(PassiveEffect::SpecialEffect(effect)) if effect == id)
        })
    }

    /// Gold reward after passive gold bonuses, truncated.
    pub fn scaled_gold(&self, gold: u32) -> u32 {
        (gold as f32 * (1.0 + self.gold_bonus_pct / 100.0)) as u32
    }

    pub fn drain_events(&mut self) -> Vec<InventoryEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battler::{BattlerModel, BattlerStats, HeroData};
    use crate::common::EntityId;
    use crate::env::{Damageable, NoTargets, TargetInfo};
    use crate::light::LightConfig;

    fn hero() -> HeroModel {
        HeroModel::new(HeroData {
            name: "tester".into(),
            max_hp: 100.0,
            move_speed: 5.0,
            damage: 10.0,
            base_exp: 100.0,
            exp_increment_rate: 1.2,
            ..HeroData::default()
        })
    }

    fn item(data: ItemData) -> Arc<ItemData> {
        Arc::new(data)
    }

    struct Crowd(Vec<(EntityId, Vec2, BattlerModel)>);

    impl TargetQuery for Crowd {
        fn candidates_within(&self, origin: Vec2, radius: f32) -> Vec<TargetInfo> {
            self.0
                .iter()
                .filter(|(_, position, _)| origin.distance(*position) <= radius)
                .map(|(id, position, _)| TargetInfo {
                    id: *id,
                    position: *position,
                })
                .collect()
        }

        fn target_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable> {
            self.0
                .iter_mut()
                .find(|(candidate, _, _)| *candidate == id)
                .map(|(_, _, model)| model as &mut dyn Damageable)
        }
    }

    #[test]
    fn passives_stack_by_name_and_apply() {
        let mut hero = hero();
        let mut inventory = PlayerInventory::new();
        let heart = item(ItemData::passive("Heart", PassiveEffect::MaxHpBonus, 20.0));

        inventory.add_item(Arc::clone(&heart), &mut hero);
        inventory.add_item(heart, &mut hero);

        assert_eq!(inventory.passive_count("Heart"), 2);
        assert_eq!(inventory.passives().len(), 1);
        assert_eq!(hero.battler().max_hp(), 140.0);
        assert_eq!(
            inventory.drain_events().last(),
            Some(&InventoryEvent::PassiveAdded {
                name: "Heart".into(),
                count: 2
            })
        );
    }

    #[test]
    fn unsupported_passive_is_kept_without_bonus() {
        let mut hero = hero();
        let mut inventory = PlayerInventory::new();
        inventory.add_item(
            item(ItemData::passive("Clover", PassiveEffect::LuckBonus, 5.0)),
            &mut hero,
        );
        assert_eq!(inventory.passive_count("Clover"), 1);
        assert_eq!(hero.battler().damage(), 10.0);
    }

    #[test]
    fn special_effects_are_queryable() {
        let mut hero = hero();
        let mut inventory = PlayerInventory::new();
        inventory.add_item(
            item(ItemData::passive(
                "Lantern",
                PassiveEffect::SpecialEffect("night_vision".into()),
                0.0,
            )),
            &mut hero,
        );
        assert!(inventory.has_special_effect("night_vision"));
        assert!(!inventory.has_special_effect("flight"));
    }

    #[test]
    fn usable_is_ready_on_equip_then_cools_down() {
        let mut hero = hero();
        hero.take_hit(50.0);
        let mut inventory = PlayerInventory::new();
        inventory.add_item(
            item(ItemData::usable("Potion", UsableEffect::Heal, 30.0, 10.0)),
            &mut hero,
        );
        assert!(inventory.can_use_item());

        let mut targets = NoTargets;
        let mut ctx = ItemContext {
            hero: &mut hero,
            position: Vec2::ZERO,
            targets: &mut targets,
            light: None,
        };
        assert_eq!(inventory.use_equipped(&mut ctx), ItemOutcome::Applied);
        assert_eq!(inventory.use_equipped(&mut ctx), ItemOutcome::Rejected);
        assert_eq!(ctx.hero.battler().cur_hp(), 80.0);

        inventory.tick(10.0);
        assert!(inventory.can_use_item());
    }

    #[test]
    fn speed_boost_returns_a_revert() {
        let mut hero = hero();
        let mut inventory = PlayerInventory::new();
        inventory.add_item(
            item(ItemData::usable(
                "Feather",
                UsableEffect::SpeedBoost { duration: 5.0 },
                2.0,
                15.0,
            )),
            &mut hero,
        );

        let mut targets = NoTargets;
        let outcome = inventory.use_equipped(&mut ItemContext {
            hero: &mut hero,
            position: Vec2::ZERO,
            targets: &mut targets,
            light: None,
        });
        assert_eq!(hero.battler().move_speed(), 7.0);

        let ItemOutcome::Deferred { delay, revert } = outcome else {
            panic!("expected deferred outcome, got {outcome:?}");
        };
        assert_eq!(delay, 5.0);
        revert.apply(&mut hero);
        assert_eq!(hero.battler().move_speed(), 5.0);
    }

    #[test]
    fn bomb_hits_everything_in_range() {
        let mut hero = hero();
        let mut inventory = PlayerInventory::new();
        inventory.add_item(
            item(ItemData::usable("Bomb", UsableEffect::Bomb { range: 3.0 }, 25.0, 20.0)),
            &mut hero,
        );
        let stats = BattlerStats {
            max_hp: 50.0,
            ..BattlerStats::default()
        };
        let mut crowd = Crowd(vec![
            (EntityId(1), Vec2::new(1.0, 0.0), BattlerModel::new(stats)),
            (EntityId(2), Vec2::new(-2.5, 0.0), BattlerModel::new(stats)),
            (EntityId(3), Vec2::new(6.0, 0.0), BattlerModel::new(stats)),
        ]);

        inventory.use_equipped(&mut ItemContext {
            hero: &mut hero,
            position: Vec2::ZERO,
            targets: &mut crowd,
            light: None,
        });

        let hp: Vec<_> = crowd.0.iter().map(|(_, _, model)| model.cur_hp()).collect();
        assert_eq!(hp, vec![25.0, 25.0, 50.0]);
    }

    #[test]
    fn light_recharge_needs_a_light() {
        let mut hero = hero();
        let mut inventory = PlayerInventory::new();
        inventory.add_item(
            item(ItemData::usable("Oil", UsableEffect::LightRecharge, 30.0, 5.0)),
            &mut hero,
        );
        let mut targets = NoTargets;

        let outcome = inventory.use_equipped(&mut ItemContext {
            hero: &mut hero,
            position: Vec2::ZERO,
            targets: &mut targets,
            light: None,
        });
        assert_eq!(outcome, ItemOutcome::Rejected);
        assert!(inventory.can_use_item());

        let mut light = LightGauge::new(LightConfig::default(), 1.0);
        inventory.use_equipped(&mut ItemContext {
            hero: &mut hero,
            position: Vec2::ZERO,
            targets: &mut targets,
            light: Some(&mut light),
        });
        assert_eq!(light.current(), 80.0);
    }

    #[test]
    fn gold_bonus_scales_rewards() {
        let mut hero = hero();
        let mut inventory = PlayerInventory::new();
        inventory.add_item(
            item(ItemData::passive("Coin", PassiveEffect::GoldBonus, 50.0)),
            &mut hero,
        );
        assert_eq!(inventory.scaled_gold(9), 13);
    }
}
