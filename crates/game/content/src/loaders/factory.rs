//! Content factory for loading bundles from data directories.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::loaders::{
    ConfigLoader, ContentBundle, EnemyLoader, HeroCatalog, HeroLoader, ItemLoader, LoadResult,
    SkillCatalog, SkillLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// ├── heroes.ron
/// ├── enemies.ron
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads every asset in `data_dir` into a bundle.
    pub fn load_dir(data_dir: impl Into<PathBuf>) -> LoadResult<ContentBundle> {
        Self::new(data_dir).load_bundle()
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<game_core::GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load skill data from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load hero stats from `heroes.ron`.
    pub fn load_heroes(&self) -> LoadResult<HeroCatalog> {
        HeroLoader::load(&self.data_dir.join("heroes.ron"))
    }

    /// Load the enemy roster from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<game_core::EnemyData>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<game_core::ItemData>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        let bundle = ContentBundle {
            config: self.load_config()?,
            skills: self.load_skills()?,
            heroes: self.load_heroes()?,
            enemies: self.load_enemies()?.into_iter().map(Arc::new).collect(),
            items: self.load_items()?.into_iter().map(Arc::new).collect(),
        };
        tracing::info!(
            dir = %self.data_dir.display(),
            enemies = bundle.enemies.len(),
            items = bundle.items.len(),
            "content loaded"
        );
        Ok(bundle)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
