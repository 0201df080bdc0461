use crate::common::ratio;

/// Runtime timers of a single skill instance.
///
/// Both timers count down to zero; reaching zero clears the matching flag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillState {
    pub is_on_cooldown: bool,
    pub cooldown_timer: f32,
    pub is_active: bool,
    pub active_timer: f32,
}

impl SkillState {
    pub fn update_cooldown(&mut self, dt: f32) {
        if !self.is_on_cooldown {
            return;
        }
        self.cooldown_timer -= dt;
        if self.cooldown_timer <= 0.0 {
            self.is_on_cooldown = false;
            self.cooldown_timer = 0.0;
        }
    }

    pub fn update_active(&mut self, dt: f32) {
        if !self.is_active {
            return;
        }
        self.active_timer -= dt;
        if self.active_timer <= 0.0 {
            self.is_active = false;
            self.active_timer = 0.0;
        }
    }

    /// Negative values are stored as zero; the flag then clears on the next
    /// update.
    pub fn start_cooldown(&mut self, seconds: f32) {
        self.is_on_cooldown = true;
        self.cooldown_timer = seconds.max(0.0);
    }

    /// A non-positive duration leaves the skill inactive.
    pub fn start_active(&mut self, seconds: f32) {
        if seconds <= 0.0 {
            return;
        }
        self.is_active = true;
        self.active_timer = seconds;
    }

    pub fn reset_cooldown(&mut self) {
        self.is_on_cooldown = false;
        self.cooldown_timer = 0.0;
    }

    pub fn reset_active(&mut self) {
        self.is_active = false;
        self.active_timer = 0.0;
    }

    /// Remaining cooldown as a fraction of `max`, for a fill indicator.
    pub fn cooldown_ratio(&self, max: f32) -> f32 {
        ratio(self.cooldown_timer, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_clears_exactly_on_last_tick() {
        let mut state = SkillState::default();
        state.start_cooldown(3.0);

        state.update_cooldown(1.0);
        state.update_cooldown(1.0);
        assert!(state.is_on_cooldown);
        state.update_cooldown(1.0);
        assert!(!state.is_on_cooldown);
        assert_eq!(state.cooldown_timer, 0.0);
    }

    #[test]
    fn overshooting_tick_clamps_to_zero() {
        let mut state = SkillState::default();
        state.start_active(0.5);
        state.update_active(2.0);
        assert!(!state.is_active);
        assert_eq!(state.active_timer, 0.0);
    }

    #[test]
    fn zero_duration_never_activates() {
        let mut state = SkillState::default();
        state.start_active(0.0);
        assert!(!state.is_active);
    }

    #[test]
    fn negative_cooldown_clears_on_next_update() {
        let mut state = SkillState::default();
        state.start_cooldown(-1.0);
        assert!(state.is_on_cooldown);
        assert_eq!(state.cooldown_timer, 0.0);
        state.update_cooldown(0.0);
        assert!(!state.is_on_cooldown);
    }

    #[test]
    fn cooldown_ratio_guards_zero_max() {
        let mut state = SkillState::default();
        state.start_cooldown(2.0);
        assert_eq!(state.cooldown_ratio(4.0), 0.5);
        assert_eq!(state.cooldown_ratio(0.0), 0.0);
    }
}
