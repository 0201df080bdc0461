//! Narrow traits describing everything a skill or battler touches outside
//! the rules themselves.
//!
//! The host engine owns physics bodies, effect spawning and the scene graph.
//! Core logic reaches those through the collaborators defined here, and the
//! runtime (or a test) supplies concrete implementations.
mod body;
mod effects;
mod rng;
mod target;

pub use body::{CasterBody, CollisionLayer, KinematicBody};
pub use effects::{CueKind, EffectCue, EffectLog, EffectSink, NullEffects};
pub use rng::{PcgRng, RandomSource};
pub use target::{Damageable, HitOutcome, NoTargets, TargetInfo, TargetQuery};
