//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Omitted keys keep their [`GameConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.erosion.increase_interval <= 0.0 {
            anyhow::bail!(
                "erosion.increase_interval must be positive, got {}",
                config.erosion.increase_interval
            );
        }
        if !(0.0..=1.0).contains(&config.darkness_hit_fraction) {
            anyhow::bail!(
                "darkness_hit_fraction must be within 0..=1, got {}",
                config.darkness_hit_fraction
            );
        }

        let drops = &config.drops;
        for (key, chance) in [
            ("drops.boss_drop_chance", drops.boss_drop_chance),
            ("drops.elite_drop_chance", drops.elite_drop_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                anyhow::bail!("{key} must be within 0..=1, got {chance}");
            }
        }
        if !(0.0 <= drops.common_threshold
            && drops.common_threshold <= drops.uncommon_threshold
            && drops.uncommon_threshold <= 1.0)
        {
            anyhow::bail!(
                "drop rarity thresholds must satisfy 0 <= common <= uncommon <= 1, got {} and {}",
                drops.common_threshold,
                drops.uncommon_threshold
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("[erosion]\nincrease_interval = 30.0\n").unwrap();
        assert_eq!(config.erosion.increase_interval, 30.0);
        assert_eq!(config.erosion.max_level, 99);
        assert_eq!(config.light, GameConfig::default().light);
    }

    #[test]
    fn rejects_inverted_drop_thresholds() {
        let err = ConfigLoader::parse("[drops]\ncommon_threshold = 0.9\nuncommon_threshold = 0.5\n")
            .unwrap_err();
        assert!(err.to_string().contains("thresholds"));
        assert_eq!(
            ConfigLoader::parse("").unwrap().drops,
            game_core::DropConfig::default()
        );
    }

    #[test]
    fn rejects_non_positive_interval() {
        let err = ConfigLoader::parse("[erosion]\nincrease_interval = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("increase_interval"));
    }
}
