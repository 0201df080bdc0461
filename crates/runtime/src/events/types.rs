use serde::{Deserialize, Serialize};

use game_core::{EntityId, ItemRarity, Vec2};

/// Lifecycle notifications raised by the session itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    EnemySpawned {
        id: EntityId,
        name: String,
        level: u32,
        elite: bool,
        position: Vec2,
    },
    EnemyDefeated {
        id: EntityId,
        exp: f32,
        gold: u32,
    },
    /// A boss or lucky elite kill left an item on the ground.
    ItemDropped {
        drop_id: u32,
        name: String,
        rarity: ItemRarity,
        position: Vec2,
    },
    ItemPickedUp {
        drop_id: u32,
        name: String,
    },
    /// The light went out and the darkness started hurting the hero.
    DarknessStarted,
    DarknessEnded,
    HeroDied,
}
