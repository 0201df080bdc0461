//! Session orchestration for the combat core.
//!
//! This crate wires the pure `game-core` models into a playable run: a
//! [`Session`] owns the hero, the enemy [`Arena`], the spawner, the light
//! gauge and the difficulty manager, drives them from `tick(dt)`, and fans
//! their events out over a topic-based [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`arena`] and [`spawner`] manage live enemies
//! - [`loot`] holds dropped items until they are picked up
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] persists player preferences
pub mod arena;
pub mod error;
pub mod events;
pub mod loot;
pub mod repository;
pub mod rng;
pub mod session;
pub mod spawner;

pub use arena::{Arena, ArenaEnemy, Defeated};
pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, SessionEvent, Topic};
pub use loot::{GroundItem, GroundItems};
pub use repository::{
    FilePreferenceStore, InMemoryPreferenceStore, PreferenceStore, RepositoryError,
    SELECTED_DIFFICULTY_KEY, load_selected_difficulty, save_selected_difficulty,
};
pub use rng::StdRandom;
pub use session::{Session, SessionBuilder, SessionConfig};
pub use spawner::{EnemySpawner, FixedSpawnPoints, RectSpawnArea, SpawnPointProvider, Spawned};
