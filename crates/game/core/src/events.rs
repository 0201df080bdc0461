//! Notifications emitted by core models.
//!
//! Each model keeps its own pending queue and the owner drains it once per
//! tick. Within a queue, events appear in mutation order.
use crate::difficulty::SelectedDifficulty;
use crate::skill::SkillSlot;

/// Changes to a single battler.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlerEvent {
    /// A hit landed; `damage` is the amount after armor.
    Hit { damage: f32 },
    HpChanged { current: f32, max: f32 },
    /// Fired exactly once, after HP reached zero.
    Died,
    MoveSpeedChanged(f32),
    JumpPowerChanged(f32),
    ExpChanged { current: f32, max: f32 },
    LevelChanged { old: u32, new: u32 },
    GoldChanged(u32),
    EliteStatusChanged(bool),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEvent {
    CooldownChanged {
        slot: SkillSlot,
        remaining: f32,
        max: f32,
    },
    /// Every slot's cooldown was cleared at once.
    CooldownsReset,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DifficultyEvent {
    ErosionLevelChanged { old: u32, new: u32 },
    SelectedDifficultyChanged(SelectedDifficulty),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryEvent {
    PassiveAdded { name: String, count: u32 },
    UsableEquipped { name: String },
    UsableUsed { name: String },
    UsableCooldownChanged { remaining: f32, max: f32 },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightEvent {
    GaugeChanged { current: f32, max: f32 },
    Toggled { on: bool },
}
