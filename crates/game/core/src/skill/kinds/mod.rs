//! Concrete behaviors and the archetype factory table that assigns them to
//! slots.
mod adventurer;
mod basic;
mod warrior;

pub use adventurer::{Headshot, PiercingShot, Roll};
pub use basic::BasicSkill;
pub use warrior::{Cleave, Flurry, Guard};

use super::behavior::SkillBehavior;
use super::manager::SkillSlot;

type BehaviorFactory = fn() -> Box<dyn SkillBehavior>;

/// Playable character families. Each maps the three slots to behaviors.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Archetype {
    /// Placeholder skills that only log.
    #[default]
    Basic,
    Warrior,
    Adventurer,
}

impl Archetype {
    pub const ALL: [Self; 3] = [Self::Basic, Self::Warrior, Self::Adventurer];

    /// Factories for `[Skill1, Skill2, MoveSkill]`.
    fn factories(self) -> [BehaviorFactory; 3] {
        match self {
            Self::Basic => [basic, basic, basic],
            Self::Warrior => [cleave, flurry, guard],
            Self::Adventurer => [piercing_shot, headshot, roll],
        }
    }

    pub fn create_behavior(self, slot: SkillSlot) -> Box<dyn SkillBehavior> {
        (self.factories()[slot.index()])()
    }
}

fn basic() -> Box<dyn SkillBehavior> {
    Box::new(BasicSkill)
}

fn cleave() -> Box<dyn SkillBehavior> {
    Box::new(Cleave)
}

fn flurry() -> Box<dyn SkillBehavior> {
    Box::new(Flurry::default())
}

fn guard() -> Box<dyn SkillBehavior> {
    Box::new(Guard::default())
}

fn piercing_shot() -> Box<dyn SkillBehavior> {
    Box::new(PiercingShot)
}

fn headshot() -> Box<dyn SkillBehavior> {
    Box::new(Headshot)
}

fn roll() -> Box<dyn SkillBehavior> {
    Box::new(Roll::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_table_assigns_behaviors_per_slot() {
        let names: Vec<_> = SkillSlot::ALL
            .iter()
            .map(|slot| Archetype::Warrior.create_behavior(*slot).name())
            .collect();
        assert_eq!(names, vec!["cleave", "flurry", "guard"]);

        let names: Vec<_> = SkillSlot::ALL
            .iter()
            .map(|slot| Archetype::Adventurer.create_behavior(*slot).name())
            .collect();
        assert_eq!(names, vec!["piercing_shot", "headshot", "roll"]);

        assert_eq!(Archetype::Basic.create_behavior(SkillSlot::MoveSkill).name(), "basic");
    }

    #[test]
    fn archetype_parses_case_insensitively() {
        assert_eq!("Warrior".parse::<Archetype>(), Ok(Archetype::Warrior));
        assert_eq!(Archetype::Adventurer.as_ref(), "adventurer");
    }
}
