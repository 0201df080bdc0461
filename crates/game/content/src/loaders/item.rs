//! Item catalog loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::{ItemData, ItemEffect};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemData>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ItemData>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Names must be unique because passives stack by name.
    pub fn parse(content: &str) -> LoadResult<Vec<ItemData>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut names = HashSet::new();
        for item in &catalog.items {
            if !names.insert(item.name.as_str()) {
                anyhow::bail!("Duplicate item name '{}'", item.name);
            }
            if matches!(item.effect, ItemEffect::Usable(_)) && item.cooldown < 0.0 {
                anyhow::bail!("Usable item '{}' has a negative cooldown", item.name);
            }
        }

        Ok(catalog.items)
    }
}
