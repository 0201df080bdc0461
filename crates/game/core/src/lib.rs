//! Deterministic combat and progression rules for the side-view survival game.
//!
//! `game-core` owns the battler models, the skill system, erosion difficulty,
//! the light gauge and the inventory. It performs no I/O: engine-facing
//! capabilities (physics bodies, target lookup, effect playback, randomness)
//! are injected through the traits in [`env`], and every state change is
//! reported as a typed event drained by the owner.
pub mod battler;
pub mod common;
pub mod config;
pub mod difficulty;
pub mod env;
pub mod error;
pub mod events;
pub mod inventory;
pub mod light;
pub mod schedule;
pub mod skill;

pub use battler::{
    BattlerFlags, BattlerModel, BattlerStats, EnemyData, EnemyModel, HeroData, HeroModel, Reward,
    elite_chance,
};
pub use common::{EntityId, Facing, Vec2};
pub use config::GameConfig;
pub use difficulty::{
    DarknessTint, DifficultyManager, ErosionConfig, ErosionStage, SelectedDifficulty,
    SelectionError, SpawnTuning, darkness_intensity,
};
pub use env::{
    CasterBody, CollisionLayer, CueKind, Damageable, EffectCue, EffectLog, EffectSink, HitOutcome,
    KinematicBody, NoTargets, NullEffects, PcgRng, RandomSource, TargetInfo, TargetQuery,
};
pub use error::{ErrorSeverity, GameError};
pub use events::{BattlerEvent, DifficultyEvent, InventoryEvent, LightEvent, SkillEvent};
pub use inventory::{
    DropConfig, ItemContext, ItemData, ItemDropTable, ItemEffect, ItemKind, ItemOutcome,
    ItemRarity, PassiveEffect, PassiveSlot, PlayerInventory, Revert, UsableEffect,
};
pub use light::{LightConfig, LightGauge};
pub use schedule::{Scheduler, TaskId};
pub use skill::{
    ActiveStep, Archetype, Skill, SkillBehavior, SkillContext, SkillData, SkillLoadout,
    SkillManager, SkillSignal, SkillSlot, SkillState, UseOutcome,
};
