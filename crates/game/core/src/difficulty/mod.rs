//! Run difficulty: the player's selected difficulty, the erosion level that
//! rises over time, and the spawn cadence derived from both.
mod erosion;
mod selection;
mod spawn;
mod stage;

pub use erosion::{DifficultyManager, ErosionConfig};
pub use selection::{SelectedDifficulty, SelectionError};
pub use spawn::SpawnTuning;
pub use stage::{DarknessTint, ErosionStage, darkness_intensity};
