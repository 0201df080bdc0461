use crate::common::Vec2;

/// Fire-and-forget presentation hooks.
///
/// Asset keys are opaque to the core; an empty key means "no asset" and is
/// never forwarded.
pub trait EffectSink {
    fn play_effect(&mut self, asset: &str, position: Vec2);

    fn play_sound(&mut self, asset: &str, position: Vec2);
}

/// Discards every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEffects;

impl EffectSink for NullEffects {
    fn play_effect(&mut self, _asset: &str, _position: Vec2) {}

    fn play_sound(&mut self, _asset: &str, _position: Vec2) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueKind {
    Effect,
    Sound,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectCue {
    pub kind: CueKind,
    pub asset: String,
    pub position: Vec2,
}

/// Records cues so a headless host can forward or inspect them.
#[derive(Clone, Debug, Default)]
pub struct EffectLog {
    cues: Vec<EffectCue>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> &[EffectCue] {
        &self.cues
    }

    pub fn effects(&self) -> impl Iterator<Item = &EffectCue> {
        self.cues.iter().filter(|cue| cue.kind == CueKind::Effect)
    }

    pub fn drain(&mut self) -> Vec<EffectCue> {
        std::mem::take(&mut self.cues)
    }

    fn record(&mut self, kind: CueKind, asset: &str, position: Vec2) {
        tracing::trace!(?kind, asset, x = position.x, y = position.y, "cue");
        self.cues.push(EffectCue {
            kind,
            asset: asset.to_owned(),
            position,
        });
    }
}

impl EffectSink for EffectLog {
    fn play_effect(&mut self, asset: &str, position: Vec2) {
        self.record(CueKind::Effect, asset, position);
    }

    fn play_sound(&mut self, asset: &str, position: Vec2) {
        self.record(CueKind::Sound, asset, position);
    }
}
