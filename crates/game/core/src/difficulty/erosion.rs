use super::selection::{SelectedDifficulty, SelectionError};
use super::stage::{DarknessTint, ErosionStage, darkness_intensity};
use crate::common::ratio;
use crate::events::DifficultyEvent;

/// Erosion progression settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ErosionConfig {
    /// Seconds per level at Normal difficulty.
    pub increase_interval: f32,
    pub max_level: u32,
    pub max_darkness_alpha: f32,
}

impl Default for ErosionConfig {
    fn default() -> Self {
        Self {
            increase_interval: 75.0,
            max_level: 99,
            max_darkness_alpha: 0.8,
        }
    }
}

/// Owns the erosion level and the selected difficulty for one session.
///
/// The level only rises through [`tick`](Self::tick) under normal play, at
/// most one level per tick, and never exceeds `max_level`.
#[derive(Clone, Debug)]
pub struct DifficultyManager {
    config: ErosionConfig,
    selected: SelectedDifficulty,
    level: u32,
    timer: f32,
    events: Vec<DifficultyEvent>,
}

impl DifficultyManager {
    pub fn new(config: ErosionConfig, selected: SelectedDifficulty) -> Self {
        Self {
            config: ErosionConfig {
                max_level: config.max_level.max(1),
                ..config
            },
            selected,
            level: 1,
            timer: 0.0,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &ErosionConfig {
        &self.config
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn selected(&self) -> SelectedDifficulty {
        self.selected
    }

    pub fn is_at_max(&self) -> bool {
        self.level >= self.config.max_level
    }

    /// Seconds per level after the selected difficulty's speed-up.
    pub fn adjusted_interval(&self) -> f32 {
        let multiplier = self.selected.erosion_multiplier();
        if multiplier > 0.0 {
            self.config.increase_interval / multiplier
        } else {
            self.config.increase_interval
        }
    }

    /// Progress toward the next level in `[0, 1]`.
    pub fn erosion_progress(&self) -> f32 {
        ratio(self.timer, self.adjusted_interval()).min(1.0)
    }

    pub fn tick(&mut self, dt: f32) {
        if self.is_at_max() || dt <= 0.0 {
            return;
        }
        self.timer += dt;
        if self.timer >= self.adjusted_interval() {
            self.increase_erosion_level();
            self.timer = 0.0;
        }
    }

    pub fn increase_erosion_level(&mut self) {
        if self.is_at_max() {
            return;
        }
        let old = self.level;
        self.level += 1;
        self.on_level_changed(old);
    }

    /// Debug control; never goes below level 1.
    pub fn decrease_erosion_level(&mut self) {
        if self.level <= 1 {
            return;
        }
        let old = self.level;
        self.level -= 1;
        self.on_level_changed(old);
    }

    pub fn reset_erosion(&mut self) {
        let old = self.level;
        self.level = 1;
        self.timer = 0.0;
        self.on_level_changed(old);
    }

    fn on_level_changed(&mut self, old: u32) {
        tracing::info!(
            old,
            new = self.level,
            stage = %self.stage(),
            darkness = self.darkness_intensity(),
            "erosion level changed"
        );
        self.events.push(DifficultyEvent::ErosionLevelChanged {
            old,
            new: self.level,
        });
    }

    pub fn set_selected_difficulty(&mut self, difficulty: SelectedDifficulty) {
        self.selected = difficulty;
        tracing::info!(%difficulty, phase = difficulty.moon_phase(), "difficulty selected");
        self.events
            .push(DifficultyEvent::SelectedDifficultyChanged(difficulty));
    }

    /// Selects by menu index. Out-of-range indices keep the current selection.
    pub fn select_difficulty_index(&mut self, index: usize) -> Result<(), SelectionError> {
        match SelectedDifficulty::from_index(index) {
            Ok(difficulty) => {
                self.set_selected_difficulty(difficulty);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, current = %self.selected, "difficulty selection ignored");
                Err(err)
            }
        }
    }

    pub fn enemy_damage_multiplier(&self) -> f32 {
        self.selected.enemy_damage_multiplier()
    }

    pub fn light_drain_multiplier(&self) -> f32 {
        self.selected.light_drain_multiplier()
    }

    pub fn stage(&self) -> ErosionStage {
        ErosionStage::from_level(self.level)
    }

    pub fn darkness_intensity(&self) -> f32 {
        darkness_intensity(self.level, self.config.max_darkness_alpha)
    }

    pub fn darkness_tint(&self) -> DarknessTint {
        DarknessTint::for_intensity(self.darkness_intensity(), self.config.max_darkness_alpha)
    }

    pub fn drain_events(&mut self) -> Vec<DifficultyEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for DifficultyManager {
    fn default() -> Self {
        Self::new(ErosionConfig::default(), SelectedDifficulty::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(selected: SelectedDifficulty) -> DifficultyManager {
        DifficultyManager::new(ErosionConfig::default(), selected)
    }

    #[test]
    fn easy_slows_the_erosion_interval() {
        let easy = manager(SelectedDifficulty::Easy);
        assert!((easy.adjusted_interval() - 100.0).abs() < 1e-4);
        let nightmare = manager(SelectedDifficulty::Nightmare);
        assert!((nightmare.adjusted_interval() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn level_rises_once_interval_elapses() {
        let mut difficulty = manager(SelectedDifficulty::Normal);
        difficulty.tick(74.0);
        assert_eq!(difficulty.level(), 1);
        difficulty.tick(1.0);
        assert_eq!(difficulty.level(), 2);
        assert_eq!(difficulty.timer(), 0.0);
        assert_eq!(
            difficulty.drain_events(),
            vec![DifficultyEvent::ErosionLevelChanged { old: 1, new: 2 }]
        );
    }

    #[test]
    fn huge_step_raises_a_single_level() {
        let mut difficulty = manager(SelectedDifficulty::Normal);
        difficulty.tick(10_000.0);
        assert_eq!(difficulty.level(), 2);
    }

    #[test]
    fn level_is_capped_and_non_decreasing() {
        let mut difficulty = DifficultyManager::new(
            ErosionConfig {
                increase_interval: 1.0,
                max_level: 3,
                ..ErosionConfig::default()
            },
            SelectedDifficulty::Normal,
        );
        let mut last = difficulty.level();
        for _ in 0..20 {
            difficulty.tick(0.6);
            assert!(difficulty.level() >= last);
            last = difficulty.level();
        }
        assert_eq!(difficulty.level(), 3);
        difficulty.increase_erosion_level();
        assert_eq!(difficulty.level(), 3);
    }

    #[test]
    fn decrease_floors_at_one_and_reset_emits() {
        let mut difficulty = manager(SelectedDifficulty::Normal);
        difficulty.decrease_erosion_level();
        assert!(difficulty.drain_events().is_empty());

        difficulty.increase_erosion_level();
        difficulty.increase_erosion_level();
        difficulty.reset_erosion();
        assert_eq!(difficulty.level(), 1);
        assert_eq!(
            difficulty.drain_events().last(),
            Some(&DifficultyEvent::ErosionLevelChanged { old: 3, new: 1 })
        );
    }

    #[test]
    fn invalid_selection_keeps_previous() {
        let mut difficulty = manager(SelectedDifficulty::Hard);
        assert!(difficulty.select_difficulty_index(9).is_err());
        assert_eq!(difficulty.selected(), SelectedDifficulty::Hard);

        difficulty.select_difficulty_index(0).unwrap();
        assert_eq!(difficulty.selected(), SelectedDifficulty::Easy);
        assert_eq!(
            difficulty.drain_events(),
            vec![DifficultyEvent::SelectedDifficultyChanged(SelectedDifficulty::Easy)]
        );
    }

    #[test]
    fn progress_is_guarded_and_bounded() {
        let mut difficulty = DifficultyManager::new(
            ErosionConfig {
                increase_interval: 0.0,
                ..ErosionConfig::default()
            },
            SelectedDifficulty::Normal,
        );
        assert_eq!(difficulty.erosion_progress(), 0.0);

        difficulty = manager(SelectedDifficulty::Normal);
        difficulty.tick(37.5);
        assert!((difficulty.erosion_progress() - 0.5).abs() < 1e-5);
    }
}
