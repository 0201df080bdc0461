/// Immutable definition of a skill, shared between instances.
///
/// `damage` is a multiplier on the caster's damage (2.3 means 230%). Asset
/// keys (`icon`, `effect`, `sound`) are opaque strings; empty means none.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillData {
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Seconds before the skill can be used again.
    pub cooldown: f32,
    pub damage: f32,
    pub range: f32,
    /// Length of the active window in seconds; 0 for instant skills.
    pub duration: f32,
    pub effect: String,
    pub sound: String,
}

impl SkillData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = effect.into();
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = sound.into();
        self
    }

    pub fn is_instant(&self) -> bool {
        self.duration <= 0.0
    }
}
