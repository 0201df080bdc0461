//! Preference store contract.

use game_core::SelectedDifficulty;

use super::error::Result;

/// Key under which the selected difficulty index is persisted.
pub const SELECTED_DIFFICULTY_KEY: &str = "SelectedDifficulty";

/// Key/value store for integer player preferences.
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get_int(&self, key: &str) -> Result<Option<i64>>;

    fn set_int(&self, key: &str, value: i64) -> Result<()>;

    /// Returns the stored value or `default` when missing.
    fn get_int_or(&self, key: &str, default: i64) -> Result<i64> {
        Ok(self.get_int(key)?.unwrap_or(default))
    }
}

/// Reads the persisted difficulty selection.
///
/// Missing keys default to Normal. Unreadable stores and out-of-range values
/// degrade to Normal with a warning instead of failing session setup.
pub fn load_selected_difficulty(store: &dyn PreferenceStore) -> SelectedDifficulty {
    let fallback = SelectedDifficulty::default();
    let stored = match store.get_int_or(SELECTED_DIFFICULTY_KEY, fallback.index() as i64) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, "failed to read difficulty preference; using default");
            return fallback;
        }
    };

    usize::try_from(stored)
        .ok()
        .and_then(|index| SelectedDifficulty::from_index(index).ok())
        .unwrap_or_else(|| {
            tracing::warn!(stored, "stored difficulty out of range; using default");
            fallback
        })
}

pub fn save_selected_difficulty(
    store: &dyn PreferenceStore,
    difficulty: SelectedDifficulty,
) -> Result<()> {
    store.set_int(SELECTED_DIFFICULTY_KEY, difficulty.index() as i64)
}
