//! Enemy spawning: where enemies appear and how many may be alive.

use std::sync::Arc;

use game_core::{EnemyData, EnemyModel, EntityId, RandomSource, SpawnTuning, Vec2};

use crate::arena::Arena;

/// Supplies positions for new enemies. `None` means no valid point was found.
pub trait SpawnPointProvider: Send {
    fn next_spawn_point(&mut self, rng: &mut dyn RandomSource) -> Option<Vec2>;
}

/// Cycles through a fixed list of points.
#[derive(Clone, Debug, Default)]
pub struct FixedSpawnPoints {
    points: Vec<Vec2>,
    cursor: usize,
}

impl FixedSpawnPoints {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points, cursor: 0 }
    }
}

impl SpawnPointProvider for FixedSpawnPoints {
    fn next_spawn_point(&mut self, _rng: &mut dyn RandomSource) -> Option<Vec2> {
        let point = *self.points.get(self.cursor % self.points.len().max(1))?;
        self.cursor = self.cursor.wrapping_add(1);
        Some(point)
    }
}

type GroundCheck = Box<dyn Fn(Vec2) -> bool + Send>;

/// Random points inside an axis-aligned map rectangle.
///
/// Each request samples up to `max_attempts` points and keeps the first one
/// the ground check accepts. Accepted points are lifted by `lift` so enemies
/// drop onto the ground instead of spawning inside it.
pub struct RectSpawnArea {
    center: Vec2,
    size: Vec2,
    max_attempts: u32,
    lift: f32,
    ground: Option<GroundCheck>,
}

impl RectSpawnArea {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
    pub const DEFAULT_LIFT: f32 = 1.0;

    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            size,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            lift: Self::DEFAULT_LIFT,
            ground: None,
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn with_ground(mut self, ground: impl Fn(Vec2) -> bool + Send + 'static) -> Self {
        self.ground = Some(Box::new(ground));
        self
    }

    fn sample(&self, rng: &mut dyn RandomSource) -> Vec2 {
        let min = self.center - self.size * 0.5;
        Vec2::new(
            min.x + rng.next_f32() * self.size.x,
            min.y + rng.next_f32() * self.size.y,
        )
    }
}

impl SpawnPointProvider for RectSpawnArea {
    fn next_spawn_point(&mut self, rng: &mut dyn RandomSource) -> Option<Vec2> {
        (0..self.max_attempts)
            .map(|_| self.sample(rng))
            .find(|point| self.ground.as_ref().is_none_or(|ground| ground(*point)))
            .map(|point| point + Vec2::new(0.0, self.lift))
    }
}

/// A freshly spawned enemy, for the session to announce.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawned {
    pub id: EntityId,
    pub position: Vec2,
}

/// Spawns enemies from a roster, scaled to the current erosion level.
#[derive(Debug)]
pub struct EnemySpawner {
    tuning: SpawnTuning,
    roster: Vec<Arc<EnemyData>>,
    level: u32,
}

impl EnemySpawner {
    pub fn new(tuning: SpawnTuning, roster: Vec<Arc<EnemyData>>) -> Self {
        Self {
            tuning,
            roster,
            level: 1,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Follows the erosion level; interval and cap are derived from it.
    pub fn set_level(&mut self, level: u32) {
        if self.level == level {
            return;
        }
        self.level = level;
        tracing::debug!(
            level,
            interval = self.interval(),
            max_enemies = self.max_enemies(),
            "spawn settings updated"
        );
    }

    pub fn interval(&self) -> f32 {
        self.tuning.spawn_interval(self.level)
    }

    pub fn max_enemies(&self) -> u32 {
        self.tuning.max_enemy_count(self.level)
    }

    pub fn is_at_capacity(&self, arena: &Arena) -> bool {
        arena.live_count() >= self.max_enemies() as usize
    }

    /// Periodic spawn: one enemy if the arena is below the live cap.
    pub fn try_spawn(
        &self,
        arena: &mut Arena,
        points: &mut dyn SpawnPointProvider,
        rng: &mut dyn RandomSource,
        damage_multiplier: f32,
    ) -> Option<Spawned> {
        if self.is_at_capacity(arena) {
            tracing::trace!(live = arena.live_count(), "spawn skipped at capacity");
            return None;
        }
        self.spawn(arena, points, rng, damage_multiplier, false)
    }

    /// Spawns a random roster entry regardless of the cap. `force_elite`
    /// skips the elite roll.
    pub fn spawn(
        &self,
        arena: &mut Arena,
        points: &mut dyn SpawnPointProvider,
        rng: &mut dyn RandomSource,
        damage_multiplier: f32,
        force_elite: bool,
    ) -> Option<Spawned> {
        if self.roster.is_empty() {
            tracing::warn!("enemy roster is empty; nothing to spawn");
            return None;
        }
        let Some(position) = points.next_spawn_point(rng) else {
            tracing::warn!("no valid spawn position found");
            return None;
        };

        let data = Arc::clone(&self.roster[rng.next_index(self.roster.len())]);
        let model = EnemyModel::spawn(data, self.level, force_elite, damage_multiplier, rng);
        let id = arena.insert(model, position);
        Some(Spawned { id, position })
    }
}
