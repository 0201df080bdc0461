//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the RON/TOML data files that parameterize
//! the core rules:
//! - Skill data keyed by archetype and slot (RON)
//! - Hero stats per archetype (RON)
//! - Enemy roster (RON)
//! - Item catalog (RON)
//! - Game configuration (TOML)
//!
//! [`ContentBundle::builtin`] embeds the defaults shipped under `data/`, and
//! [`ContentFactory`] reads the same layout from any directory.
//!
//! All loaders use game-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentBundle, ContentFactory, EnemyCatalog, EnemyLoader, HeroCatalog,
    HeroEntry, HeroLoader, ItemCatalog, ItemLoader, LoadResult, SkillCatalog, SkillEntry,
    SkillLoader,
};
