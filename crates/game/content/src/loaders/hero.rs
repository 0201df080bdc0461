//! Hero stat loader.

use std::path::Path;

use game_core::{Archetype, HeroData};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroEntry {
    pub archetype: Archetype,
    pub data: HeroData,
}

/// Hero catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroCatalog {
    pub heroes: Vec<HeroEntry>,
}

impl HeroCatalog {
    pub fn get(&self, archetype: Archetype) -> Option<&HeroData> {
        self.heroes
            .iter()
            .find(|entry| entry.archetype == archetype)
            .map(|entry| &entry.data)
    }
}

/// Loader for hero stats from RON files.
pub struct HeroLoader;

impl HeroLoader {
    pub fn load(path: &Path) -> LoadResult<HeroCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<HeroCatalog> {
        let catalog: HeroCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse hero catalog RON: {}", e))?;

        for entry in &catalog.heroes {
            if entry.data.max_hp <= 0.0 {
                anyhow::bail!("Hero '{}' must have positive max_hp", entry.data.name);
            }
        }

        Ok(catalog)
    }
}
