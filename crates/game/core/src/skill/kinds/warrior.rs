//! Warrior kit: a frontal cleave, a locked-on flurry and a defensive stance.
use crate::common::{EntityId, Vec2};
use crate::env::CollisionLayer;
use crate::skill::behavior::{ActiveStep, SkillBehavior, SkillContext};
use crate::skill::data::SkillData;
use crate::skill::targeting::{nearest_first, within_cone};

/// Width of the cleave arc in degrees.
pub const CLEAVE_ANGLE: f32 = 120.0;
pub const CLEAVE_MAX_TARGETS: usize = 3;

pub const FLURRY_STRIKES: u32 = 6;
/// Seconds between flurry strikes.
pub const FLURRY_INTERVAL: f32 = 0.2;

pub const GUARD_ARMOR_MULTIPLIER: f32 = 2.0;
pub const GUARD_SPEED_MULTIPLIER: f32 = 1.5;

// ============================================================================
// Cleave (Skill1)
// ============================================================================

/// Hits up to three enemies in a cone in front of the caster, nearest first.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cleave;

impl SkillBehavior for Cleave {
    fn name(&self) -> &'static str {
        "cleave"
    }

    fn execute(&mut self, data: &SkillData, ctx: &mut SkillContext<'_>) {
        let origin = ctx.body.position();
        let forward = ctx.body.facing().direction();
        let candidates = ctx.targets.candidates_within(origin, data.range);
        let mut targets = within_cone(origin, forward, CLEAVE_ANGLE, candidates);
        nearest_first(origin, &mut targets);

        let damage = ctx.scaled_damage(data.damage);
        let mut landed = 0;
        for info in targets.iter().take(CLEAVE_MAX_TARGETS) {
            if let Some(target) = ctx.targets.target_mut(info.id) {
                target.take_hit(damage);
                landed += 1;
            }
        }

        ctx.play_effect(&data.effect, origin);
        ctx.play_sound(&data.sound, origin);
        tracing::debug!(landed, damage, "cleave");
    }
}

// ============================================================================
// Flurry (Skill2)
// ============================================================================

#[derive(Clone, Copy, Debug)]
struct Engagement {
    target: EntityId,
    position: Vec2,
    strikes: u32,
    timer: f32,
    original_layer: CollisionLayer,
    was_invincible: bool,
}

/// Locks onto the nearest enemy and strikes it repeatedly while the caster
/// is invincible.
#[derive(Clone, Debug, Default)]
pub struct Flurry {
    engagement: Option<Engagement>,
}

impl Flurry {
    pub fn is_engaged(&self) -> bool {
        self.engagement.is_some()
    }
}

impl SkillBehavior for Flurry {
    fn name(&self) -> &'static str {
        "flurry"
    }

    fn execute(&mut self, data: &SkillData, ctx: &mut SkillContext<'_>) {
        let origin = ctx.body.position();
        let mut candidates = ctx.targets.candidates_within(origin, data.range);
        nearest_first(origin, &mut candidates);

        let Some(nearest) = candidates.first().copied() else {
            tracing::info!(skill = %data.name, "no target in range");
            return;
        };

        self.engagement = Some(Engagement {
            target: nearest.id,
            position: nearest.position,
            strikes: 0,
            timer: 0.0,
            original_layer: ctx.body.collision_layer(),
            was_invincible: ctx.caster.is_invincible(),
        });
        ctx.body.set_collision_layer(CollisionLayer::Invincibility);
        ctx.caster.set_invincible(true);
        tracing::debug!(target = %nearest.id, "flurry engaged");
    }

    fn on_active_update(
        &mut self,
        dt: f32,
        data: &SkillData,
        ctx: &mut SkillContext<'_>,
    ) -> ActiveStep {
        let Some(engagement) = self.engagement.as_mut() else {
            return ActiveStep::Continue;
        };

        engagement.timer += dt;
        while engagement.timer >= FLURRY_INTERVAL && engagement.strikes < FLURRY_STRIKES {
            engagement.timer -= FLURRY_INTERVAL;
            let damage = ctx.scaled_damage(data.damage);

            let Some(target) = ctx.targets.target_mut(engagement.target) else {
                return ActiveStep::Finish;
            };
            if target.is_dead() {
                return ActiveStep::Finish;
            }
            target.take_hit(damage);
            let killed = target.is_dead();

            engagement.strikes += 1;
            tracing::debug!(
                strike = engagement.strikes,
                of = FLURRY_STRIKES,
                damage,
                "flurry strike"
            );
            ctx.play_effect(&data.effect, engagement.position);

            if killed {
                return ActiveStep::Finish;
            }
        }
        ActiveStep::Continue
    }

    fn on_end(&mut self, _data: &SkillData, ctx: &mut SkillContext<'_>) {
        if let Some(engagement) = self.engagement.take() {
            ctx.body.set_collision_layer(engagement.original_layer);
            ctx.caster.set_invincible(engagement.was_invincible);
            tracing::debug!(strikes = engagement.strikes, "flurry released");
        }
    }
}

// ============================================================================
// Guard (MoveSkill)
// ============================================================================

#[derive(Clone, Copy, Debug)]
struct GuardBonus {
    armor: f32,
    move_speed: f32,
}

/// Raises armor and move speed for the active window.
#[derive(Clone, Debug, Default)]
pub struct Guard {
    bonus: Option<GuardBonus>,
}

impl SkillBehavior for Guard {
    fn name(&self) -> &'static str {
        "guard"
    }

    fn execute(&mut self, data: &SkillData, ctx: &mut SkillContext<'_>) {
        if self.bonus.is_some() {
            return;
        }
        let bonus = GuardBonus {
            armor: ctx.caster.armor() * (GUARD_ARMOR_MULTIPLIER - 1.0),
            move_speed: ctx.caster.move_speed() * (GUARD_SPEED_MULTIPLIER - 1.0),
        };
        ctx.caster.add_armor(bonus.armor);
        ctx.caster.add_move_speed(bonus.move_speed);
        self.bonus = Some(bonus);

        let origin = ctx.body.position();
        ctx.play_effect(&data.effect, origin);
        ctx.play_sound(&data.sound, origin);
        tracing::debug!(
            armor = ctx.caster.armor(),
            move_speed = ctx.caster.move_speed(),
            "guard raised"
        );
    }

    fn on_end(&mut self, _data: &SkillData, ctx: &mut SkillContext<'_>) {
        if let Some(bonus) = self.bonus.take() {
            ctx.caster.add_armor(-bonus.armor);
            ctx.caster.add_move_speed(-bonus.move_speed);
            tracing::debug!(armor = ctx.caster.armor(), "guard lowered");
        }
    }
}
