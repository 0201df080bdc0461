//! Skill data loader.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use game_core::{Archetype, SkillData, SkillLoadout, SkillSlot};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One slot assignment in the skill catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    pub archetype: Archetype,
    pub slot: SkillSlot,
    pub data: SkillData,
}

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillEntry>,
}

impl SkillCatalog {
    pub fn get(&self, archetype: Archetype, slot: SkillSlot) -> Option<&SkillData> {
        self.skills
            .iter()
            .find(|entry| entry.archetype == archetype && entry.slot == slot)
            .map(|entry| &entry.data)
    }

    /// Slots with no entry stay empty in the returned loadout.
    pub fn loadout(&self, archetype: Archetype) -> SkillLoadout {
        SkillSlot::ALL
            .into_iter()
            .fold(SkillLoadout::default(), |loadout, slot| match self.get(archetype, slot) {
                Some(data) => loadout.with(slot, Arc::new(data.clone())),
                None => loadout,
            })
    }
}

/// Loader for skill data from RON files.
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a catalog and rejects duplicate slots and negative timers.
    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for entry in &catalog.skills {
            if !seen.insert((entry.archetype, entry.slot)) {
                anyhow::bail!(
                    "Duplicate skill for {} / {}: '{}'",
                    entry.archetype,
                    entry.slot,
                    entry.data.name
                );
            }
            if entry.data.cooldown < 0.0 || entry.data.duration < 0.0 {
                anyhow::bail!(
                    "Skill '{}' has a negative cooldown or duration",
                    entry.data.name
                );
            }
        }

        tracing::debug!(count = catalog.skills.len(), "skill catalog loaded");
        Ok(catalog)
    }
}
