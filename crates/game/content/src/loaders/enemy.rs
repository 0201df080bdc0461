//! Enemy roster loader.

use std::path::Path;

use game_core::EnemyData;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Enemy roster structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyData>,
}

/// Loader for the enemy roster from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyData>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EnemyData>> {
        let catalog: EnemyCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        Ok(catalog.enemies)
    }
}
