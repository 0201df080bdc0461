//! Repository layer for persisted player preferences.
//!
//! Preferences are small integer values that survive between sessions, such
//! as the selected difficulty. Static game content is loaded by
//! `game-content`, not stored here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FilePreferenceStore;
pub use memory::InMemoryPreferenceStore;
pub use traits::{
    PreferenceStore, SELECTED_DIFFICULTY_KEY, load_selected_difficulty, save_selected_difficulty,
};
