use crate::common::{EntityId, Vec2};

/// Result of delivering a hit to a [`Damageable`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitOutcome {
    /// The target was dead or invincible; nothing changed.
    Ignored,
    /// HP was reduced by `dealt` after armor.
    Damaged { dealt: f32 },
}

impl HitOutcome {
    pub fn dealt(self) -> f32 {
        match self {
            Self::Ignored => 0.0,
            Self::Damaged { dealt } => dealt,
        }
    }
}

/// Anything that can receive damage.
///
/// Callers that need to know whether a hit was lethal compare `is_dead()`
/// before and after [`take_hit`](Damageable::take_hit).
pub trait Damageable {
    fn take_hit(&mut self, damage: f32) -> HitOutcome;

    fn current_hp(&self) -> f32;

    fn max_hp(&self) -> f32;

    fn is_dead(&self) -> bool;
}

/// Position snapshot of a hittable candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetInfo {
    pub id: EntityId,
    pub position: Vec2,
}

/// Spatial lookup over the hostile battlers a skill may hit.
pub trait TargetQuery {
    /// Living candidates whose position lies within `radius` of `origin`.
    /// Order is unspecified; callers sort as their targeting rule requires.
    fn candidates_within(&self, origin: Vec2, radius: f32) -> Vec<TargetInfo>;

    fn target_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable>;
}

/// Empty world, for casters with nothing to hit.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTargets;

impl TargetQuery for NoTargets {
    fn candidates_within(&self, _origin: Vec2, _radius: f32) -> Vec<TargetInfo> {
        Vec::new()
    }

    fn target_mut(&mut self, _id: EntityId) -> Option<&mut dyn Damageable> {
        None
    }
}
