//! Content loaders for reading game data from files.
//!
//! Each loader exposes `load(path)` for files on disk and `parse(text)` for
//! embedded data, so both paths share the same validation.

pub mod bundle;
pub mod config;
pub mod enemy;
pub mod factory;
pub mod hero;
pub mod item;
pub mod skill;

pub use bundle::ContentBundle;
pub use config::ConfigLoader;
pub use enemy::{EnemyCatalog, EnemyLoader};
pub use factory::ContentFactory;
pub use hero::{HeroCatalog, HeroEntry, HeroLoader};
pub use item::{ItemCatalog, ItemLoader};
pub use skill::{SkillCatalog, SkillEntry, SkillLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
