use std::sync::Arc;

use super::behavior::{Skill, SkillContext, SkillSignal, UseOutcome};
use super::data::SkillData;
use super::kinds::Archetype;
use crate::config::GameConfig;
use crate::events::SkillEvent;

/// The three skill slots every character exposes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillSlot {
    Skill1,
    Skill2,
    MoveSkill,
}

impl SkillSlot {
    pub const ALL: [Self; GameConfig::SKILL_SLOTS] = [Self::Skill1, Self::Skill2, Self::MoveSkill];

    pub const fn index(self) -> usize {
        match self {
            Self::Skill1 => 0,
            Self::Skill2 => 1,
            Self::MoveSkill => 2,
        }
    }

    /// Maps an external slot index; unknown indices yield `None`.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Skill1),
            1 => Some(Self::Skill2),
            2 => Some(Self::MoveSkill),
            _ => None,
        }
    }
}

/// Skill data assigned to each slot. Empty slots stay uninitialized.
#[derive(Clone, Debug, Default)]
pub struct SkillLoadout {
    slots: [Option<Arc<SkillData>>; GameConfig::SKILL_SLOTS],
}

impl SkillLoadout {
    pub fn new(skill1: Arc<SkillData>, skill2: Arc<SkillData>, move_skill: Arc<SkillData>) -> Self {
        Self {
            slots: [Some(skill1), Some(skill2), Some(move_skill)],
        }
    }

    pub fn with(mut self, slot: SkillSlot, data: Arc<SkillData>) -> Self {
        self.slots[slot.index()] = Some(data);
        self
    }

    pub fn get(&self, slot: SkillSlot) -> Option<&Arc<SkillData>> {
        self.slots[slot.index()].as_ref()
    }
}

/// Owns a character's three skills and reports their cooldowns.
#[derive(Debug, Default)]
pub struct SkillManager {
    archetype: Option<Archetype>,
    skills: [Option<Skill>; GameConfig::SKILL_SLOTS],
    events: Vec<SkillEvent>,
}

impl SkillManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one skill per filled loadout slot with the archetype's
    /// behaviors, replacing any previous skills.
    pub fn initialize(&mut self, archetype: Archetype, loadout: &SkillLoadout) {
        self.archetype = Some(archetype);
        for slot in SkillSlot::ALL {
            self.skills[slot.index()] = loadout
                .get(slot)
                .map(|data| Skill::new(Arc::clone(data), archetype.create_behavior(slot)));
        }
        tracing::info!(
            %archetype,
            slots = self.skills.iter().filter(|skill| skill.is_some()).count(),
            "skills initialized"
        );
    }

    pub fn archetype(&self) -> Option<Archetype> {
        self.archetype
    }

    pub fn get_skill(&self, slot: SkillSlot) -> Option<&Skill> {
        self.skills[slot.index()].as_ref()
    }

    pub fn can_use_skill(&self, slot: SkillSlot) -> bool {
        self.get_skill(slot).is_some_and(Skill::can_use)
    }

    pub fn use_skill(&mut self, slot: SkillSlot, ctx: &mut SkillContext<'_>) -> UseOutcome {
        let Some(skill) = self.skills[slot.index()].as_mut() else {
            tracing::debug!(%slot, "no skill in slot");
            return UseOutcome::Rejected;
        };
        let outcome = skill.use_skill(ctx);
        self.apply_signals(ctx);
        outcome
    }

    /// Index-based entry point for input bindings.
    pub fn use_skill_index(&mut self, index: usize, ctx: &mut SkillContext<'_>) -> UseOutcome {
        match SkillSlot::from_index(index) {
            Some(slot) => self.use_skill(slot, ctx),
            None => {
                tracing::debug!(index, "unknown skill slot");
                UseOutcome::Rejected
            }
        }
    }

    /// Updates every skill, then queues one `CooldownChanged` per skill.
    pub fn tick(&mut self, dt: f32, ctx: &mut SkillContext<'_>) {
        for skill in self.skills.iter_mut().flatten() {
            skill.update(dt, ctx);
        }
        self.apply_signals(ctx);

        for slot in SkillSlot::ALL {
            if let Some(skill) = &self.skills[slot.index()] {
                self.events.push(SkillEvent::CooldownChanged {
                    slot,
                    remaining: skill.state().cooldown_timer,
                    max: skill.data().cooldown,
                });
            }
        }
    }

    pub fn reset_all_cooldowns(&mut self) {
        for skill in self.skills.iter_mut().flatten() {
            skill.reset_cooldown();
        }
        self.events.push(SkillEvent::CooldownsReset);
    }

    pub fn is_movement_blocked(&self) -> bool {
        self.skills
            .iter()
            .flatten()
            .any(Skill::is_blocking_movement)
    }

    /// Ends every active window, e.g. on death or stage exit.
    pub fn interrupt_all(&mut self, ctx: &mut SkillContext<'_>) {
        for skill in self.skills.iter_mut().flatten() {
            skill.interrupt(ctx);
        }
    }

    pub fn drain_events(&mut self) -> Vec<SkillEvent> {
        std::mem::take(&mut self.events)
    }

    fn apply_signals(&mut self, ctx: &mut SkillContext<'_>) {
        for signal in ctx.take_signals() {
            match signal {
                SkillSignal::ResetAllCooldowns => self.reset_all_cooldowns(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::testing::Rig;

    fn loadout() -> SkillLoadout {
        SkillLoadout::new(
            Arc::new(SkillData::new("Shot").with_cooldown(3.0).with_damage(2.0).with_range(10.0)),
            Arc::new(SkillData::new("Headshot").with_cooldown(10.0).with_damage(5.0).with_range(10.0)),
            Arc::new(SkillData::new("Roll").with_cooldown(1.0).with_range(12.0).with_duration(0.4)),
        )
    }

    fn adventurer() -> SkillManager {
        let mut manager = SkillManager::new();
        manager.initialize(Archetype::Adventurer, &loadout());
        manager
    }

    #[test]
    fn skill_is_usable_again_after_exactly_its_cooldown() {
        let mut rig = Rig::new(10.0);
        let mut manager = adventurer();

        assert!(manager.use_skill(SkillSlot::Skill1, &mut rig.ctx()).is_used());
        assert!(!manager.can_use_skill(SkillSlot::Skill1));

        manager.tick(1.0, &mut rig.ctx());
        manager.tick(1.0, &mut rig.ctx());
        assert!(!manager.can_use_skill(SkillSlot::Skill1));
        manager.tick(1.0, &mut rig.ctx());
        assert!(manager.can_use_skill(SkillSlot::Skill1));
    }

    #[test]
    fn rejected_use_while_cooling_down() {
        let mut rig = Rig::new(10.0);
        let mut manager = adventurer();

        manager.use_skill(SkillSlot::Skill1, &mut rig.ctx());
        assert_eq!(
            manager.use_skill(SkillSlot::Skill1, &mut rig.ctx()),
            UseOutcome::Rejected
        );
    }

    #[test]
    fn tick_reports_every_slot() {
        let mut rig = Rig::new(10.0);
        let mut manager = adventurer();
        manager.use_skill(SkillSlot::Skill2, &mut rig.ctx());
        manager.tick(0.5, &mut rig.ctx());

        let events = manager.drain_events();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[1],
            SkillEvent::CooldownChanged {
                slot: SkillSlot::Skill2,
                remaining: 9.5,
                max: 10.0
            }
        );
    }

    #[test]
    fn headshot_kill_resets_every_cooldown() {
        let mut rig = Rig::new(10.0).with_target(1, 3.0, 0.0, 30.0);
        let mut manager = adventurer();

        manager.use_skill(SkillSlot::MoveSkill, &mut rig.ctx());
        manager.tick(0.5, &mut rig.ctx());
        assert!(!manager.can_use_skill(SkillSlot::MoveSkill));

        manager.use_skill(SkillSlot::Skill2, &mut rig.ctx());
        assert!(rig.dead(1));
        for slot in SkillSlot::ALL {
            assert!(manager.can_use_skill(slot), "{slot} still cooling down");
        }
        assert!(manager.drain_events().contains(&SkillEvent::CooldownsReset));
    }

    #[test]
    fn empty_slot_and_unknown_index_are_no_ops() {
        let mut rig = Rig::new(10.0);
        let mut manager = SkillManager::new();
        manager.initialize(
            Archetype::Basic,
            &SkillLoadout::default().with(SkillSlot::Skill1, Arc::new(SkillData::new("Jab"))),
        );

        assert!(manager.get_skill(SkillSlot::Skill2).is_none());
        assert!(!manager.can_use_skill(SkillSlot::Skill2));
        assert_eq!(
            manager.use_skill(SkillSlot::Skill2, &mut rig.ctx()),
            UseOutcome::Rejected
        );
        assert_eq!(manager.use_skill_index(7, &mut rig.ctx()), UseOutcome::Rejected);
        assert!(manager.use_skill_index(0, &mut rig.ctx()).is_used());
    }

    #[test]
    fn roll_blocks_movement_until_interrupted() {
        let mut rig = Rig::new(10.0);
        let mut manager = adventurer();

        manager.use_skill(SkillSlot::MoveSkill, &mut rig.ctx());
        assert!(manager.is_movement_blocked());

        manager.interrupt_all(&mut rig.ctx());
        assert!(!manager.is_movement_blocked());
        assert_eq!(rig.body.velocity.x, 0.0);
    }

    #[test]
    fn reset_cooldown_mid_cooldown_allows_immediate_use() {
        let mut rig = Rig::new(10.0);
        let mut manager = adventurer();
        manager.use_skill(SkillSlot::Skill1, &mut rig.ctx());
        manager.reset_all_cooldowns();
        assert!(manager.can_use_skill(SkillSlot::Skill1));
    }
}
