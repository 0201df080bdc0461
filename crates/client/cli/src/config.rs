//! Headless client configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use game_core::{Archetype, SelectedDifficulty};

/// Configuration for one scripted run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub archetype: Archetype,
    /// Overrides the persisted difficulty when set.
    pub difficulty: Option<SelectedDifficulty>,
    pub seed: Option<u64>,
    /// Simulated seconds to play before stopping.
    pub duration: f32,
    /// Fixed timestep fed to `Session::tick`.
    pub dt: f32,
    pub autopilot: AutopilotConfig,
    pub data_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    pub enable_persistence: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            archetype: Archetype::Warrior,
            difficulty: None,
            seed: None,
            duration: 300.0,
            dt: 1.0 / 60.0,
            autopilot: AutopilotConfig::default(),
            data_dir: None,
            log_dir: None,
            session_id: None,
            enable_persistence: true,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `EROSION_ARCHETYPE` - `basic`, `warrior` or `adventurer` (default: warrior)
    /// - `EROSION_DIFFICULTY` - `easy` to `nightmare` (default: persisted choice)
    /// - `EROSION_SEED` - Seed for spawns and elite rolls (default: OS entropy)
    /// - `EROSION_DURATION` - Simulated seconds to play (default: 300)
    /// - `EROSION_DT` - Fixed timestep in seconds (default: 1/60)
    /// - `EROSION_CONTACT_RANGE` - Distance at which enemies strike the hero (default: 1.5)
    /// - `EROSION_ENEMY_ATTACK_PERIOD` - Seconds between enemy strikes (default: 1.0)
    /// - `EROSION_DATA_DIR` - Content directory (default: built-in content)
    /// - `EROSION_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `GAME_SESSION_ID` - Log sub-directory name (default: auto-generated)
    /// - `ENABLE_PERSISTENCE` - Persist the difficulty choice on disk (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(archetype) = read_env::<Archetype>("EROSION_ARCHETYPE") {
            config.archetype = archetype;
        }
        config.difficulty = read_env::<SelectedDifficulty>("EROSION_DIFFICULTY");
        config.seed = read_env::<u64>("EROSION_SEED");

        if let Some(duration) = read_env::<f32>("EROSION_DURATION") {
            config.duration = duration.max(0.0);
        }
        if let Some(dt) = read_env::<f32>("EROSION_DT")
            && dt > 0.0
        {
            config.dt = dt;
        }

        if let Some(range) = read_env::<f32>("EROSION_CONTACT_RANGE") {
            config.autopilot.contact_range = range.max(0.0);
        }
        if let Some(period) = read_env::<f32>("EROSION_ENEMY_ATTACK_PERIOD")
            && period > 0.0
        {
            config.autopilot.enemy_attack_period = period;
        }

        config.data_dir = env::var("EROSION_DATA_DIR").ok().map(PathBuf::from);
        config.log_dir = env::var("EROSION_LOG_DIR").ok().map(PathBuf::from);
        config.session_id = env::var("GAME_SESSION_ID").ok();

        if let Some(enable) = read_env::<bool>("ENABLE_PERSISTENCE") {
            config.enable_persistence = enable;
        }

        config
    }

    /// Number of fixed steps needed to cover `duration`.
    pub fn steps(&self) -> u64 {
        (self.duration / self.dt).ceil() as u64
    }
}

/// Knobs for the scripted player and the stand-in enemy AI.
#[derive(Clone, Debug)]
pub struct AutopilotConfig {
    pub contact_range: f32,
    pub enemy_attack_period: f32,
    /// Hero HP ratio under which a potion is picked up.
    pub heal_threshold: f32,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            contact_range: 1.5,
            enemy_attack_period: 1.0,
            heal_threshold: 0.4,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}
