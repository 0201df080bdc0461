use crate::error::{ErrorSeverity, GameError};

/// Difficulty picked before a run, persisted between sessions.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SelectedDifficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Nightmare,
}

impl SelectedDifficulty {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::Nightmare];

    /// Stable index used for persistence.
    pub const fn index(self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Normal => 1,
            Self::Hard => 2,
            Self::Nightmare => 3,
        }
    }

    pub fn from_index(index: usize) -> Result<Self, SelectionError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(SelectionError::IndexOutOfRange {
                index,
                max: Self::ALL.len() - 1,
            })
    }

    /// Moon phase shown for the difficulty in menus.
    pub const fn moon_phase(self) -> &'static str {
        match self {
            Self::Easy => "Full Moon",
            Self::Normal => "Waning Moon",
            Self::Hard => "Dark Moon",
            Self::Nightmare => "Eclipse",
        }
    }

    pub const fn enemy_damage_multiplier(self) -> f32 {
        match self {
            Self::Easy => 0.65,
            Self::Normal | Self::Hard | Self::Nightmare => 1.0,
        }
    }

    pub const fn light_drain_multiplier(self) -> f32 {
        match self {
            Self::Easy => 0.75,
            Self::Normal => 1.0,
            Self::Hard => 1.25,
            Self::Nightmare => 1.5,
        }
    }

    /// Speed-up applied to the erosion timer.
    pub const fn erosion_multiplier(self) -> f32 {
        match self {
            Self::Easy => 0.75,
            Self::Normal => 1.0,
            Self::Hard => 1.25,
            Self::Nightmare => 1.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("difficulty index {index} out of range (0..={max})")]
    IndexOutOfRange { index: usize, max: usize },
}

impl GameError for SelectionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "SELECTION_INDEX_OUT_OF_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_table() {
        for difficulty in SelectedDifficulty::ALL {
            assert_eq!(SelectedDifficulty::from_index(difficulty.index()), Ok(difficulty));
        }
    }

    #[test]
    fn out_of_range_index_is_recoverable() {
        let err = SelectedDifficulty::from_index(4).unwrap_err();
        assert_eq!(err, SelectionError::IndexOutOfRange { index: 4, max: 3 });
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "SELECTION_INDEX_OUT_OF_RANGE");
    }

    #[test]
    fn multiplier_tables() {
        use SelectedDifficulty::*;
        let damage: Vec<_> = [Easy, Normal, Hard, Nightmare]
            .iter()
            .map(|d| d.enemy_damage_multiplier())
            .collect();
        assert_eq!(damage, vec![0.65, 1.0, 1.0, 1.0]);
        assert_eq!(Nightmare.light_drain_multiplier(), 1.5);
        assert_eq!(Hard.erosion_multiplier(), 1.25);
    }
}
