//! Adventurer kit: a piercing arrow, a cooldown-refunding headshot and a
//! dodge roll.
use crate::common::Vec2;
use crate::env::{CasterBody, CollisionLayer};
use crate::skill::behavior::{SkillBehavior, SkillContext, SkillSignal};
use crate::skill::data::SkillData;
use crate::skill::targeting::{along_line, nearest_first};

/// Input magnitude below which the roll follows facing instead.
pub const ROLL_INPUT_DEADZONE: f32 = 0.1;

// ============================================================================
// Piercing Shot (Skill1)
// ============================================================================

/// Damages every enemy on the facing line within range.
#[derive(Clone, Copy, Debug, Default)]
pub struct PiercingShot;

impl SkillBehavior for PiercingShot {
    fn name(&self) -> &'static str {
        "piercing_shot"
    }

    fn execute(&mut self, data: &SkillData, ctx: &mut SkillContext<'_>) {
        let origin = ctx.body.position();
        let direction = ctx.body.facing().direction();
        let candidates = ctx.targets.candidates_within(origin, data.range);
        let mut targets = along_line(origin, direction, candidates);
        nearest_first(origin, &mut targets);

        let damage = ctx.scaled_damage(data.damage);
        for info in &targets {
            if let Some(target) = ctx.targets.target_mut(info.id) {
                target.take_hit(damage);
                tracing::debug!(target = %info.id, damage, "pierced");
            }
        }

        ctx.play_effect(&data.effect, origin);
        ctx.play_sound(&data.sound, origin);
    }
}

// ============================================================================
// Headshot (Skill2)
// ============================================================================

/// Hits the first enemy on the facing line; a kill refunds every cooldown.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headshot;

impl SkillBehavior for Headshot {
    fn name(&self) -> &'static str {
        "headshot"
    }

    fn execute(&mut self, data: &SkillData, ctx: &mut SkillContext<'_>) {
        let origin = ctx.body.position();
        let direction = ctx.body.facing().direction();
        ctx.play_sound(&data.sound, origin);

        let candidates = ctx.targets.candidates_within(origin, data.range);
        let mut targets = along_line(origin, direction, candidates);
        nearest_first(origin, &mut targets);

        let Some(first) = targets.first().copied() else {
            tracing::debug!(skill = %data.name, "headshot missed");
            return;
        };
        let damage = ctx.scaled_damage(data.damage);
        let Some(target) = ctx.targets.target_mut(first.id) else {
            return;
        };

        let was_alive = !target.is_dead();
        let hp_before = target.current_hp();
        target.take_hit(damage);
        let lethal = was_alive && target.is_dead();
        tracing::debug!(
            target = %first.id,
            hp_before,
            hp_after = target.current_hp(),
            lethal,
            "headshot"
        );

        ctx.play_effect(&data.effect, first.position);
        if lethal {
            tracing::info!("headshot kill; resetting all cooldowns");
            ctx.signal(SkillSignal::ResetAllCooldowns);
        }
    }
}

// ============================================================================
// Roll (MoveSkill)
// ============================================================================

#[derive(Clone, Copy, Debug)]
struct Rolling {
    original_layer: CollisionLayer,
    was_invincible: bool,
}

/// Invincible dash at `range` units per second for the active window.
#[derive(Clone, Debug, Default)]
pub struct Roll {
    rolling: Option<Rolling>,
}

impl Roll {
    pub fn is_rolling(&self) -> bool {
        self.rolling.is_some()
    }

    /// Input axis sign when the stick is pushed past the dead zone, facing
    /// otherwise.
    fn direction(body: &dyn CasterBody) -> f32 {
        let axis = body.horizontal_input();
        if axis.abs() > ROLL_INPUT_DEADZONE {
            axis.signum()
        } else {
            body.facing().sign()
        }
    }
}

impl SkillBehavior for Roll {
    fn name(&self) -> &'static str {
        "roll"
    }

    fn execute(&mut self, data: &SkillData, ctx: &mut SkillContext<'_>) {
        self.rolling = Some(Rolling {
            original_layer: ctx.body.collision_layer(),
            was_invincible: ctx.caster.is_invincible(),
        });
        ctx.body.set_collision_layer(CollisionLayer::Invincibility);
        ctx.caster.set_invincible(true);

        let direction = Self::direction(&*ctx.body);
        let velocity = ctx.body.velocity();
        ctx.body
            .set_velocity(Vec2::new(direction * data.range, velocity.y));
        tracing::debug!(direction, speed = data.range, "roll started");

        let origin = ctx.body.position();
        ctx.play_effect(&data.effect, origin);
        ctx.play_sound(&data.sound, origin);
    }

    fn on_end(&mut self, _data: &SkillData, ctx: &mut SkillContext<'_>) {
        let Some(rolling) = self.rolling.take() else {
            return;
        };
        ctx.body.set_collision_layer(rolling.original_layer);
        ctx.caster.set_invincible(rolling.was_invincible);
        let velocity = ctx.body.velocity();
        ctx.body.set_velocity(Vec2::new(0.0, velocity.y));
        tracing::debug!("roll finished");
    }

    fn blocks_movement_input(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Facing;
    use crate::skill::behavior::Skill;
    use crate::skill::testing::Rig;
    use std::sync::Arc;

    fn shot_data(damage: f32) -> Arc<SkillData> {
        Arc::new(
            SkillData::new("Shot")
                .with_cooldown(3.0)
                .with_damage(damage)
                .with_range(10.0),
        )
    }

    fn roll_data() -> Arc<SkillData> {
        Arc::new(
            SkillData::new("Roll")
                .with_cooldown(1.0)
                .with_range(12.0)
                .with_duration(0.4),
        )
    }

    #[test]
    fn piercing_shot_hits_everything_on_the_line() {
        let mut rig = Rig::new(10.0)
            .with_target(1, 2.0, 0.0, 100.0)
            .with_target(2, 6.0, 0.25, 100.0)
            .with_target(3, 4.0, 3.0, 100.0)
            .with_target(4, -2.0, 0.0, 100.0)
            .with_target(5, 11.0, 0.0, 100.0);
        let mut skill = Skill::new(shot_data(2.0), Box::new(PiercingShot));

        skill.use_skill(&mut rig.ctx());

        assert_eq!(rig.hp(1), 80.0);
        assert_eq!(rig.hp(2), 80.0);
        assert_eq!(rig.hp(3), 100.0);
        assert_eq!(rig.hp(4), 100.0);
        assert_eq!(rig.hp(5), 100.0);
    }

    #[test]
    fn headshot_hits_only_the_first_target() {
        let mut rig = Rig::new(10.0)
            .with_target(1, 5.0, 0.0, 100.0)
            .with_target(2, 3.0, 0.0, 100.0);
        let mut skill = Skill::new(shot_data(5.0), Box::new(Headshot));

        skill.use_skill(&mut rig.ctx());

        assert_eq!(rig.hp(2), 50.0);
        assert_eq!(rig.hp(1), 100.0);
    }

    #[test]
    fn lethal_headshot_signals_cooldown_reset() {
        let mut rig = Rig::new(10.0).with_target(1, 3.0, 0.0, 40.0);
        let mut skill = Skill::new(shot_data(5.0), Box::new(Headshot));

        let mut ctx = rig.ctx();
        skill.use_skill(&mut ctx);
        assert_eq!(ctx.take_signals(), vec![SkillSignal::ResetAllCooldowns]);
        drop(ctx);
        assert!(rig.dead(1));
    }

    #[test]
    fn surviving_target_gives_no_reset() {
        let mut rig = Rig::new(10.0).with_target(1, 3.0, 0.0, 400.0);
        let mut skill = Skill::new(shot_data(5.0), Box::new(Headshot));

        let mut ctx = rig.ctx();
        skill.use_skill(&mut ctx);
        assert!(ctx.take_signals().is_empty());
    }

    #[test]
    fn roll_follows_input_then_restores_body() {
        let mut rig = Rig::new(10.0);
        rig.body.layer = CollisionLayer::Hero;
        rig.body.facing = Facing::Right;
        rig.body.input_axis = -0.8;
        rig.body.velocity = Vec2::new(0.0, 2.0);
        let mut skill = Skill::new(roll_data(), Box::new(Roll::default()));

        skill.use_skill(&mut rig.ctx());
        assert_eq!(rig.body.velocity, Vec2::new(-12.0, 2.0));
        assert_eq!(rig.body.layer, CollisionLayer::Invincibility);
        assert!(rig.caster.is_invincible());
        assert!(skill.is_blocking_movement());

        skill.update(0.5, &mut rig.ctx());
        assert_eq!(rig.body.velocity, Vec2::new(0.0, 2.0));
        assert_eq!(rig.body.layer, CollisionLayer::Hero);
        assert!(!rig.caster.is_invincible());
        assert!(!skill.is_blocking_movement());
    }

    #[test]
    fn roll_uses_facing_inside_dead_zone() {
        let mut rig = Rig::new(10.0);
        rig.body.facing = Facing::Left;
        rig.body.input_axis = 0.05;
        let mut skill = Skill::new(roll_data(), Box::new(Roll::default()));

        skill.use_skill(&mut rig.ctx());
        assert_eq!(rig.body.velocity.x, -12.0);
    }
}
