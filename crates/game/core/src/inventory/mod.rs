//! Items and the hero's inventory.
mod drop;
mod item;
mod player;

pub use drop::{DropConfig, ItemDropTable};
pub use item::{ItemData, ItemEffect, ItemKind, ItemRarity, PassiveEffect, UsableEffect};
pub use player::{ItemContext, ItemOutcome, PassiveSlot, PlayerInventory, Revert};
