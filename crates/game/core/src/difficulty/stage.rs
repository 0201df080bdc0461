/// Named erosion bands, four levels each until the last.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum ErosionStage {
    Easy,
    Normal,
    Hard,
    VeryHard,
    Madness,
    Impossible,
    Apocalypse,
}

impl ErosionStage {
    pub const fn from_level(level: u32) -> Self {
        match level {
            0..=4 => Self::Easy,
            5..=8 => Self::Normal,
            9..=12 => Self::Hard,
            13..=16 => Self::VeryHard,
            17..=20 => Self::Madness,
            21..=24 => Self::Impossible,
            _ => Self::Apocalypse,
        }
    }
}

/// Screen darkness for an erosion level; the last band uses `max_alpha`.
pub fn darkness_intensity(level: u32, max_alpha: f32) -> f32 {
    const BASE: f32 = 0.1;
    match ErosionStage::from_level(level) {
        ErosionStage::Easy => BASE,
        ErosionStage::Normal => BASE + 0.15,
        ErosionStage::Hard => BASE + 0.3,
        ErosionStage::VeryHard => BASE + 0.45,
        ErosionStage::Madness => BASE + 0.6,
        ErosionStage::Impossible => BASE + 0.7,
        ErosionStage::Apocalypse => max_alpha,
    }
}

/// RGBA tint handed to the lighting layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DarknessTint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl DarknessTint {
    pub const BASE: Self = Self {
        r: 0.1,
        g: 0.1,
        b: 0.15,
        a: 0.3,
    };

    /// Base tint shifted toward red above half intensity, alpha clamped to
    /// `max_alpha`.
    pub fn for_intensity(intensity: f32, max_alpha: f32) -> Self {
        let mut tint = Self::BASE;
        if intensity > 0.5 {
            tint.r += (intensity - 0.5) * 0.3;
            tint.g -= (intensity - 0.5) * 0.1;
        }
        tint.a = intensity.clamp(0.0, max_alpha);
        tint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_bands() {
        assert_eq!(ErosionStage::from_level(1), ErosionStage::Easy);
        assert_eq!(ErosionStage::from_level(4), ErosionStage::Easy);
        assert_eq!(ErosionStage::from_level(5), ErosionStage::Normal);
        assert_eq!(ErosionStage::from_level(24), ErosionStage::Impossible);
        assert_eq!(ErosionStage::from_level(25), ErosionStage::Apocalypse);
    }

    #[test]
    fn intensity_rises_with_level_and_caps() {
        assert!((darkness_intensity(1, 0.8) - 0.1).abs() < 1e-6);
        assert!((darkness_intensity(10, 0.8) - 0.4).abs() < 1e-6);
        assert!((darkness_intensity(22, 0.8) - 0.8).abs() < 1e-6);
        assert_eq!(darkness_intensity(99, 0.8), 0.8);
    }

    #[test]
    fn tint_reddens_only_past_half() {
        let dim = DarknessTint::for_intensity(0.4, 0.8);
        assert_eq!(dim.r, DarknessTint::BASE.r);
        assert_eq!(dim.a, 0.4);

        let deep = DarknessTint::for_intensity(0.9, 0.8);
        assert!(deep.r > DarknessTint::BASE.r);
        assert!(deep.g < DarknessTint::BASE.g);
        assert_eq!(deep.a, 0.8);
    }
}
