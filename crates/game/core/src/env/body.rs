use crate::common::{Facing, Vec2};

/// Physics layer a body collides on.
///
/// Skills that grant invulnerability swap the caster onto
/// [`CollisionLayer::Invincibility`] and restore the previous layer afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionLayer {
    #[default]
    Default,
    Hero,
    Enemy,
    Invincibility,
}

/// Movement surface of the entity casting a skill.
pub trait CasterBody {
    fn position(&self) -> Vec2;

    fn facing(&self) -> Facing;

    /// Raw horizontal input axis in `[-1, 1]`.
    fn horizontal_input(&self) -> f32;

    fn velocity(&self) -> Vec2;

    fn set_velocity(&mut self, velocity: Vec2);

    fn collision_layer(&self) -> CollisionLayer;

    fn set_collision_layer(&mut self, layer: CollisionLayer);
}

/// Minimal body that integrates its velocity, used by headless sessions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KinematicBody {
    pub position: Vec2,
    pub facing: Facing,
    pub input_axis: f32,
    pub velocity: Vec2,
    pub layer: CollisionLayer,
}

impl KinematicBody {
    pub fn new(position: Vec2, layer: CollisionLayer) -> Self {
        Self {
            position,
            layer,
            ..Self::default()
        }
    }

    /// Sets the input axis and turns the body toward it when non-zero.
    pub fn steer(&mut self, axis: f32) {
        self.input_axis = axis.clamp(-1.0, 1.0);
        if self.input_axis > 0.0 {
            self.facing = Facing::Right;
        } else if self.input_axis < 0.0 {
            self.facing = Facing::Left;
        }
    }

    pub fn integrate(&mut self, dt: f32) {
        self.position = self.position + self.velocity * dt;
    }
}

impl CasterBody for KinematicBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn facing(&self) -> Facing {
        self.facing
    }

    fn horizontal_input(&self) -> f32 {
        self.input_axis
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn collision_layer(&self) -> CollisionLayer {
        self.layer
    }

    fn set_collision_layer(&mut self, layer: CollisionLayer) {
        self.layer = layer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steering_updates_facing_only_for_nonzero_axis() {
        let mut body = KinematicBody::new(Vec2::ZERO, CollisionLayer::Hero);
        body.steer(-0.5);
        assert_eq!(body.facing, Facing::Left);
        body.steer(0.0);
        assert_eq!(body.facing, Facing::Left);
        body.steer(3.0);
        assert_eq!(body.input_axis, 1.0);
        assert_eq!(body.facing, Facing::Right);
    }

    #[test]
    fn integrate_moves_by_velocity() {
        let mut body = KinematicBody::new(Vec2::new(1.0, 0.0), CollisionLayer::Hero);
        body.set_velocity(Vec2::new(4.0, 0.0));
        body.integrate(0.5);
        assert_eq!(body.position, Vec2::new(3.0, 0.0));
    }
}
