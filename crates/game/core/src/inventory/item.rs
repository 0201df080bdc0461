/// Whether an item is a stacking passive or the single equipped usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    Passive,
    Usable,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemRarity {
    #[default]
    Common,
    Uncommon,
    Legendary,
    BossItem,
}

/// Permanent bonus applied when a passive item is picked up.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveEffect {
    MaxHpBonus,
    DamageBonus,
    MoveSpeedBonus,
    AttackSpeedBonus,
    DefenseBonus,
    /// Percent added to gold rewards.
    GoldBonus,
    LuckBonus,
    HpRegenBonus,
    SpecialEffect(String),
}

/// Effect of activating the equipped usable item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsableEffect {
    Heal,
    /// Adds move speed, removed again after `duration` seconds.
    SpeedBoost { duration: f32 },
    /// Damages every enemy within `range` of the hero.
    Bomb { range: f32 },
    LightRecharge,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    Passive(PassiveEffect),
    Usable(UsableEffect),
}

/// Catalog entry. `value` is the effect magnitude (HP healed, speed added,
/// bomb damage, gauge restored, bonus amount).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemData {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: ItemRarity,
    pub effect: ItemEffect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: f32,
    /// Seconds between uses; usable items only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: f32,
}

impl ItemData {
    pub fn passive(name: impl Into<String>, effect: PassiveEffect, value: f32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            icon: String::new(),
            rarity: ItemRarity::Common,
            effect: ItemEffect::Passive(effect),
            value,
            cooldown: 0.0,
        }
    }

    pub fn usable(name: impl Into<String>, effect: UsableEffect, value: f32, cooldown: f32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            icon: String::new(),
            rarity: ItemRarity::Common,
            effect: ItemEffect::Usable(effect),
            value,
            cooldown,
        }
    }

    pub fn with_rarity(mut self, rarity: ItemRarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn kind(&self) -> ItemKind {
        match self.effect {
            ItemEffect::Passive(_) => ItemKind::Passive,
            ItemEffect::Usable(_) => ItemKind::Usable,
        }
    }
}
