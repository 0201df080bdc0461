//! Combat participants: the shared battler model and its hero/enemy wrappers.
mod data;
mod enemy;
mod hero;
mod model;

pub use data::{EnemyData, HeroData, elite_chance};
pub use enemy::{EnemyModel, Reward};
pub use hero::HeroModel;
pub use model::{BattlerFlags, BattlerModel, BattlerStats};
