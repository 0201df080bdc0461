/// Enemy spawner cadence as a function of erosion level.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnTuning {
    /// Seconds between spawn attempts at level 1.
    pub base_interval: f32,
    /// Percent of `base_interval` removed per level above 1.
    pub interval_decrease_pct: f32,
    pub min_interval: f32,
    pub base_max_enemies: u32,
    /// Extra live enemies allowed per level above 1.
    pub max_enemy_increase: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_interval: 5.0,
            interval_decrease_pct: 2.0,
            min_interval: 1.0,
            base_max_enemies: 5,
            max_enemy_increase: 1,
        }
    }
}

impl SpawnTuning {
    pub fn spawn_interval(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        let interval = self.base_interval * (1.0 - self.interval_decrease_pct / 100.0 * steps);
        interval.max(self.min_interval)
    }

    pub fn max_enemy_count(&self, level: u32) -> u32 {
        self.base_max_enemies
            .saturating_add(self.max_enemy_increase.saturating_mul(level.saturating_sub(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_shrinks_to_floor() {
        let tuning = SpawnTuning::default();
        assert_eq!(tuning.spawn_interval(1), 5.0);
        assert!((tuning.spawn_interval(11) - 4.0).abs() < 1e-5);
        assert_eq!(tuning.spawn_interval(99), 1.0);
    }

    #[test]
    fn enemy_cap_grows_per_level() {
        let tuning = SpawnTuning::default();
        assert_eq!(tuning.max_enemy_count(1), 5);
        assert_eq!(tuning.max_enemy_count(4), 8);
    }
}
