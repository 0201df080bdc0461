use crate::difficulty::{ErosionConfig, SpawnTuning};
use crate::inventory::DropConfig;
use crate::light::LightConfig;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Erosion level progression (interval, cap, darkness ceiling).
    pub erosion: ErosionConfig,
    /// Hero light gauge drain and darkness damage cadence.
    pub light: LightConfig,
    /// Enemy spawner cadence as a function of erosion level.
    pub spawn: SpawnTuning,
    /// Boss and elite item drop chances.
    pub drops: DropConfig,
    /// Fraction of max HP removed by each darkness hit while the light is out.
    pub darkness_hit_fraction: f32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Every playable character exposes exactly three skill slots.
    pub const SKILL_SLOTS: usize = 3;
    /// First erosion level at which elites can appear.
    pub const ELITE_MIN_LEVEL: u32 = 7;
    /// Erosion level from which the elite chance is pinned to its cap.
    pub const ELITE_CAP_LEVEL: u32 = 30;
    /// Upper bound on the elite chance.
    pub const ELITE_MAX_CHANCE: f32 = 0.30;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DARKNESS_HIT_FRACTION: f32 = 0.08;

    pub fn new() -> Self {
        Self {
            erosion: ErosionConfig::default(),
            light: LightConfig::default(),
            spawn: SpawnTuning::default(),
            drops: DropConfig::default(),
            darkness_hit_fraction: Self::DEFAULT_DARKNESS_HIT_FRACTION,
        }
    }

    pub fn with_erosion(mut self, erosion: ErosionConfig) -> Self {
        self.erosion = erosion;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
