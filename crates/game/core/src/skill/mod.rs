//! Skill system: per-instance timers, the behavior contract, concrete
//! character kits and the three-slot manager.
mod behavior;
mod data;
mod kinds;
mod manager;
mod state;
pub mod targeting;

pub use behavior::{ActiveStep, Skill, SkillBehavior, SkillContext, SkillSignal, UseOutcome};
pub use data::SkillData;
pub use kinds::{Archetype, BasicSkill, Cleave, Flurry, Guard, Headshot, PiercingShot, Roll};
pub use manager::{SkillLoadout, SkillManager, SkillSlot};
pub use state::SkillState;

#[cfg(test)]
pub(crate) mod testing {
    use super::SkillContext;
    use crate::battler::{BattlerModel, BattlerStats};
    use crate::common::{EntityId, Vec2};
    use crate::env::{
        CollisionLayer, Damageable, EffectLog, KinematicBody, TargetInfo, TargetQuery,
    };

    pub struct Dummy {
        pub id: EntityId,
        pub position: Vec2,
        pub model: BattlerModel,
    }

    #[derive(Default)]
    pub struct Dummies(pub Vec<Dummy>);

    impl TargetQuery for Dummies {
        fn candidates_within(&self, origin: Vec2, radius: f32) -> Vec<TargetInfo> {
            self.0
                .iter()
                .filter(|dummy| !dummy.model.is_dead() && origin.distance(dummy.position) <= radius)
                .map(|dummy| TargetInfo {
                    id: dummy.id,
                    position: dummy.position,
                })
                .collect()
        }

        fn target_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable> {
            self.0
                .iter_mut()
                .find(|dummy| dummy.id == id)
                .map(|dummy| &mut dummy.model as &mut dyn Damageable)
        }
    }

    /// A caster at the origin facing right, plus target dummies.
    pub struct Rig {
        pub caster: BattlerModel,
        pub body: KinematicBody,
        pub targets: Dummies,
        pub effects: EffectLog,
    }

    impl Rig {
        pub fn new(damage: f32) -> Self {
            Self {
                caster: BattlerModel::new(BattlerStats {
                    move_speed: 4.0,
                    jump_power: 8.0,
                    max_hp: 100.0,
                    damage,
                    armor: 2.0,
                }),
                body: KinematicBody::new(Vec2::ZERO, CollisionLayer::Hero),
                targets: Dummies::default(),
                effects: EffectLog::new(),
            }
        }

        pub fn with_target(mut self, id: u32, x: f32, y: f32, hp: f32) -> Self {
            self.targets.0.push(Dummy {
                id: EntityId(id),
                position: Vec2::new(x, y),
                model: BattlerModel::new(BattlerStats {
                    max_hp: hp,
                    ..BattlerStats::default()
                }),
            });
            self
        }

        pub fn ctx(&mut self) -> SkillContext<'_> {
            SkillContext::new(
                &mut self.caster,
                &mut self.body,
                &mut self.targets,
                &mut self.effects,
            )
        }

        pub fn hp(&self, id: u32) -> f32 {
            self.dummy(id).model.cur_hp()
        }

        pub fn dead(&self, id: u32) -> bool {
            self.dummy(id).model.is_dead()
        }

        fn dummy(&self, id: u32) -> &Dummy {
            self.targets
                .0
                .iter()
                .find(|dummy| dummy.id == EntityId(id))
                .expect("unknown dummy")
        }
    }
}
