//! Fully loaded content set handed to the runtime.

use std::sync::Arc;

use game_core::{Archetype, EnemyData, GameConfig, HeroData, ItemData, SkillLoadout};

use crate::loaders::{
    ConfigLoader, EnemyLoader, HeroCatalog, HeroLoader, ItemLoader, LoadResult, SkillCatalog,
    SkillLoader,
};

const BUILTIN_CONFIG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/config.toml"));
const BUILTIN_SKILLS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/skills.ron"));
const BUILTIN_HEROES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/heroes.ron"));
const BUILTIN_ENEMIES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/enemies.ron"));
const BUILTIN_ITEMS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/items.ron"));

/// Every data asset a session needs, with shared definitions behind `Arc`.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: GameConfig,
    pub skills: SkillCatalog,
    pub heroes: HeroCatalog,
    pub enemies: Vec<Arc<EnemyData>>,
    pub items: Vec<Arc<ItemData>>,
}

impl ContentBundle {
    /// Content compiled into the binary from this crate's `data/` directory.
    pub fn builtin() -> LoadResult<Self> {
        Ok(Self {
            config: ConfigLoader::parse(BUILTIN_CONFIG)?,
            skills: SkillLoader::parse(BUILTIN_SKILLS)?,
            heroes: HeroLoader::parse(BUILTIN_HEROES)?,
            enemies: EnemyLoader::parse(BUILTIN_ENEMIES)?
                .into_iter()
                .map(Arc::new)
                .collect(),
            items: ItemLoader::parse(BUILTIN_ITEMS)?
                .into_iter()
                .map(Arc::new)
                .collect(),
        })
    }

    pub fn hero(&self, archetype: Archetype) -> Option<&HeroData> {
        self.heroes.get(archetype)
    }

    pub fn loadout(&self, archetype: Archetype) -> SkillLoadout {
        self.skills.loadout(archetype)
    }

    pub fn enemy(&self, name: &str) -> Option<Arc<EnemyData>> {
        self.enemies.iter().find(|enemy| enemy.name == name).cloned()
    }

    pub fn item(&self, name: &str) -> Option<Arc<ItemData>> {
        self.items.iter().find(|item| item.name == name).cloned()
    }
}
