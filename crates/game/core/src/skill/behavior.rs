//! The skill contract: shared data, per-instance timers and a pluggable
//! behavior.
use std::sync::Arc;

use super::data::SkillData;
use super::state::SkillState;
use crate::battler::BattlerModel;
use crate::common::Vec2;
use crate::env::{CasterBody, EffectSink, TargetQuery};

/// Requests a behavior raises for its owning manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillSignal {
    /// Clear the cooldown of every slot.
    ResetAllCooldowns,
}

/// Everything a behavior may touch while executing.
pub struct SkillContext<'a> {
    pub caster: &'a mut BattlerModel,
    pub body: &'a mut dyn CasterBody,
    pub targets: &'a mut dyn TargetQuery,
    pub effects: &'a mut dyn EffectSink,
    signals: Vec<SkillSignal>,
}

impl<'a> SkillContext<'a> {
    pub fn new(
        caster: &'a mut BattlerModel,
        body: &'a mut dyn CasterBody,
        targets: &'a mut dyn TargetQuery,
        effects: &'a mut dyn EffectSink,
    ) -> Self {
        Self {
            caster,
            body,
            targets,
            effects,
            signals: Vec::new(),
        }
    }

    pub fn signal(&mut self, signal: SkillSignal) {
        self.signals.push(signal);
    }

    pub fn take_signals(&mut self) -> Vec<SkillSignal> {
        std::mem::take(&mut self.signals)
    }

    /// Plays `asset` as an effect unless the key is empty.
    pub fn play_effect(&mut self, asset: &str, position: Vec2) {
        if !asset.is_empty() {
            self.effects.play_effect(asset, position);
        }
    }

    /// Plays `asset` as a sound unless the key is empty.
    pub fn play_sound(&mut self, asset: &str, position: Vec2) {
        if !asset.is_empty() {
            self.effects.play_sound(asset, position);
        }
    }

    /// Caster damage scaled by a skill multiplier.
    pub fn scaled_damage(&self, multiplier: f32) -> f32 {
        self.caster.damage() * multiplier
    }
}

/// What a behavior wants after an active-window update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveStep {
    Continue,
    /// End the active window now; `on_end` follows in the same update.
    Finish,
}

/// Per-character skill logic.
pub trait SkillBehavior: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Extra precondition on top of the cooldown/active checks.
    fn can_use(&self) -> bool {
        true
    }

    fn execute(&mut self, data: &SkillData, ctx: &mut SkillContext<'_>);

    fn on_active_update(
        &mut self,
        _dt: f32,
        _data: &SkillData,
        _ctx: &mut SkillContext<'_>,
    ) -> ActiveStep {
        ActiveStep::Continue
    }

    /// Called once when the active window closes, by timeout, early finish or
    /// interruption.
    fn on_end(&mut self, _data: &SkillData, _ctx: &mut SkillContext<'_>) {}

    fn blocks_movement_input(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UseOutcome {
    /// Not usable right now (cooling down, already active, precondition or
    /// no skill in the slot).
    Rejected,
    Used,
}

impl UseOutcome {
    pub fn is_used(self) -> bool {
        matches!(self, Self::Used)
    }
}

/// One equipped skill.
pub struct Skill {
    data: Arc<SkillData>,
    state: SkillState,
    behavior: Box<dyn SkillBehavior>,
}

impl std::fmt::Debug for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skill")
            .field("name", &self.data.name)
            .field("behavior", &self.behavior.name())
            .field("state", &self.state)
            .finish()
    }
}

impl Skill {
    pub fn new(data: Arc<SkillData>, behavior: Box<dyn SkillBehavior>) -> Self {
        Self {
            data,
            state: SkillState::default(),
            behavior,
        }
    }

    pub fn data(&self) -> &SkillData {
        &self.data
    }

    pub fn state(&self) -> &SkillState {
        &self.state
    }

    pub fn behavior_name(&self) -> &'static str {
        self.behavior.name()
    }

    pub fn can_use(&self) -> bool {
        !self.state.is_on_cooldown && !self.state.is_active && self.behavior.can_use()
    }

    /// Executes the behavior and starts the cooldown, then the active window
    /// for skills with a duration.
    pub fn use_skill(&mut self, ctx: &mut SkillContext<'_>) -> UseOutcome {
        if !self.can_use() {
            tracing::debug!(
                skill = %self.data.name,
                cooldown = self.state.cooldown_timer,
                active = self.state.is_active,
                "skill not usable"
            );
            return UseOutcome::Rejected;
        }

        tracing::debug!(skill = %self.data.name, behavior = self.behavior.name(), "skill used");
        self.behavior.execute(&self.data, ctx);
        self.state.start_cooldown(self.data.cooldown);
        if self.data.duration > 0.0 {
            self.state.start_active(self.data.duration);
        }
        UseOutcome::Used
    }

    /// Advances cooldown and active timers and drives the active window.
    pub fn update(&mut self, dt: f32, ctx: &mut SkillContext<'_>) {
        let was_active = self.state.is_active;
        self.state.update_cooldown(dt);
        self.state.update_active(dt);

        if self.state.is_active
            && self.behavior.on_active_update(dt, &self.data, ctx) == ActiveStep::Finish
        {
            self.state.reset_active();
        }

        if was_active && !self.state.is_active {
            self.behavior.on_end(&self.data, ctx);
        }
    }

    /// Cuts an active window short. Returns false when nothing was active.
    pub fn interrupt(&mut self, ctx: &mut SkillContext<'_>) -> bool {
        if !self.state.is_active {
            return false;
        }
        tracing::debug!(skill = %self.data.name, "skill interrupted");
        self.state.reset_active();
        self.behavior.on_end(&self.data, ctx);
        true
    }

    pub fn reset_cooldown(&mut self) {
        self.state.reset_cooldown();
    }

    pub fn blocks_movement_input(&self) -> bool {
        self.behavior.blocks_movement_input()
    }

    pub fn is_blocking_movement(&self) -> bool {
        self.state.is_active && self.behavior.blocks_movement_input()
    }
}
