//! Single-threaded session orchestrator.
//!
//! A [`Session`] owns every model of one run and advances them from
//! [`Session::tick`]. Timed behavior (light drain, darkness damage, enemy
//! spawns, temporary item effects) runs through a cancellable
//! [`Scheduler`] rather than free-running timers, so tearing a session down
//! or ending the run drops every pending task with it.

use std::sync::Arc;

use tokio::sync::broadcast;

use game_content::ContentBundle;
use game_core::{
    Archetype, CasterBody, CollisionLayer, DifficultyManager, DropConfig, EffectSink, EntityId,
    GameConfig, HeroModel, HitOutcome, ItemContext, ItemData, ItemDropTable, ItemOutcome,
    KinematicBody, LightGauge, NullEffects, PlayerInventory, RandomSource, Revert, Scheduler, SelectedDifficulty, SkillSlot,
    TaskId, UseOutcome, Vec2,
};

use crate::arena::{Arena, Defeated};
use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, SessionEvent, Topic};
use crate::loot::{GroundItem, GroundItems};
use crate::repository::{
    InMemoryPreferenceStore, PreferenceStore, load_selected_difficulty, save_selected_difficulty,
};
use crate::rng::StdRandom;
use crate::spawner::{EnemySpawner, RectSpawnArea, SpawnPointProvider, Spawned};

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub archetype: Archetype,
    /// Overrides the persisted preference when set.
    pub difficulty: Option<SelectedDifficulty>,
    /// Seed for the default random source; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub hero_spawn: Vec2,
    pub event_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            archetype: Archetype::Warrior,
            difficulty: None,
            seed: None,
            hero_spawn: Vec2::ZERO,
            event_buffer_size: 256,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Task {
    LightDrain,
    DarknessHit,
    SpawnEnemy,
    Revert(Revert),
}

/// One run: hero, enemies, difficulty, light and inventory.
///
/// Events queued by the models are published on the [`EventBus`] at the end
/// of each tick in this order: difficulty, light, hero, inventory, skills,
/// enemies, session. Changes made between ticks (skill or item use) are
/// published on the next tick.
pub struct Session {
    config: GameConfig,
    content: ContentBundle,
    hero: HeroModel,
    body: KinematicBody,
    inventory: PlayerInventory,
    light: LightGauge,
    difficulty: DifficultyManager,
    arena: Arena,
    spawner: EnemySpawner,
    drops: ItemDropTable,
    ground: GroundItems,
    scheduler: Scheduler<Task>,
    darkness_task: Option<TaskId>,
    spawn_points: Box<dyn SpawnPointProvider>,
    rng: Box<dyn RandomSource>,
    effects: Box<dyn EffectSink>,
    store: Box<dyn PreferenceStore>,
    bus: EventBus,
    pending: Vec<SessionEvent>,
    move_input: f32,
    elapsed: f64,
    is_over: bool,
}

impl Session {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    // ===== accessors =====

    pub fn hero(&self) -> &HeroModel {
        &self.hero
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn difficulty(&self) -> &DifficultyManager {
        &self.difficulty
    }

    /// Debug access for erosion controls.
    pub fn difficulty_mut(&mut self) -> &mut DifficultyManager {
        &mut self.difficulty
    }

    pub fn light(&self) -> &LightGauge {
        &self.light
    }

    pub fn inventory(&self) -> &PlayerInventory {
        &self.inventory
    }

    /// Dropped items not yet picked up.
    pub fn ground_items(&self) -> &GroundItems {
        &self.ground
    }

    pub fn spawner(&self) -> &EnemySpawner {
        &self.spawner
    }

    pub fn content(&self) -> &ContentBundle {
        &self.content
    }

    /// Seconds of play since the session started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// True once the hero has died. Further ticks do nothing.
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn is_dark(&self) -> bool {
        self.darkness_task.is_some()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    // ===== main loop =====

    /// Advances the session by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if dt <= 0.0 || self.is_over {
            return;
        }
        self.elapsed += f64::from(dt);

        self.difficulty.tick(dt);
        self.spawner.set_level(self.difficulty.level());

        self.light.tick(dt);
        for task in self.scheduler.advance(dt) {
            self.run_task(task);
        }
        self.sync_darkness();

        self.hero.regen(dt);
        self.inventory.tick(dt);
        self.move_hero(dt);
        self.hero.tick_skills(
            dt,
            &mut self.body,
            &mut self.arena,
            self.effects.as_mut(),
        );

        let enemy_events = self.arena.drain_events();
        self.collect_rewards();
        self.check_hero_death();
        self.flush_events(enemy_events);
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::LightDrain => self.light.drain_step(),
            Task::DarknessHit => {
                if !self.light.is_on() {
                    self.hero.take_darkness_hit(self.config.darkness_hit_fraction);
                }
            }
            Task::SpawnEnemy => {
                let spawned = self.spawner.try_spawn(
                    &mut self.arena,
                    self.spawn_points.as_mut(),
                    self.rng.as_mut(),
                    self.difficulty.enemy_damage_multiplier(),
                );
                if let Some(spawned) = spawned {
                    self.announce_spawn(spawned);
                }
                self.scheduler
                    .schedule_after(self.spawner.interval(), Task::SpawnEnemy);
            }
            Task::Revert(revert) => revert.apply(&mut self.hero),
        }
    }

    /// Starts or stops the darkness damage task to match the light state.
    /// The first hit lands as soon as the light goes out.
    fn sync_darkness(&mut self) {
        match (self.light.is_on(), self.darkness_task) {
            (false, None) => {
                let period = self.light.config().darkness_period;
                tracing::info!("light out; darkness closing in");
                self.pending.push(SessionEvent::DarknessStarted);
                self.hero.take_darkness_hit(self.config.darkness_hit_fraction);
                self.darkness_task = Some(self.scheduler.schedule_every(period, Task::DarknessHit));
            }
            (true, Some(id)) => {
                self.scheduler.cancel(id);
                self.darkness_task = None;
                tracing::info!("light restored");
                self.pending.push(SessionEvent::DarknessEnded);
            }
            _ => {}
        }
    }

    fn move_hero(&mut self, dt: f32) {
        if !self.hero.is_movement_blocked() {
            self.body.steer(self.move_input);
            let velocity = self.body.velocity();
            self.body.set_velocity(Vec2::new(
                self.move_input * self.hero.battler().move_speed(),
                velocity.y,
            ));
        }
        self.body.integrate(dt);
    }

    fn collect_rewards(&mut self) {
        for Defeated {
            id,
            position,
            reward,
        } in self.arena.reap_dead()
        {
            let gold = self.inventory.scaled_gold(reward.gold);
            self.hero.add_exp(reward.exp);
            self.hero.add_gold(gold);
            tracing::debug!(%id, exp = reward.exp, gold, "enemy defeated");
            self.pending.push(SessionEvent::EnemyDefeated {
                id,
                exp: reward.exp,
                gold,
            });

            let lucky = self.inventory.has_special_effect(DropConfig::ELITE_DROP_EFFECT);
            if let Some(item) = self.drops.roll(&reward, lucky, self.rng.as_mut()) {
                self.drop_item(item, position);
            }
        }
    }

    fn drop_item(&mut self, item: Arc<ItemData>, position: Vec2) {
        tracing::info!(item = %item.name, rarity = %item.rarity, "item dropped");
        let name = item.name.clone();
        let rarity = item.rarity;
        let drop_id = self.ground.place(item, position);
        self.pending.push(SessionEvent::ItemDropped {
            drop_id,
            name,
            rarity,
            position,
        });
    }

    fn check_hero_death(&mut self) {
        if self.is_over || !self.hero.is_dead() {
            return;
        }
        self.is_over = true;
        self.hero
            .interrupt_skills(&mut self.body, &mut self.arena, self.effects.as_mut());
        self.scheduler.clear();
        self.darkness_task = None;
        tracing::info!(
            elapsed = self.elapsed,
            level = self.hero.level(),
            erosion = self.difficulty.level(),
            "hero died; session over"
        );
        self.pending.push(SessionEvent::HeroDied);
    }

    fn flush_events(&mut self, enemy_events: Vec<(EntityId, game_core::BattlerEvent)>) {
        let difficulty = self.difficulty.drain_events().into_iter().map(Event::Difficulty);
        let light = self.light.drain_events().into_iter().map(Event::Light);
        let hero = self.hero.drain_events().into_iter().map(Event::Hero);
        let inventory = self.inventory.drain_events().into_iter().map(Event::Inventory);
        let skills = self.hero.drain_skill_events().into_iter().map(Event::Skill);
        let enemies = enemy_events
            .into_iter()
            .map(|(id, event)| Event::Enemy { id, event });
        let session = std::mem::take(&mut self.pending)
            .into_iter()
            .map(Event::Session);

        self.bus.publish_all(
            difficulty
                .chain(light)
                .chain(hero)
                .chain(inventory)
                .chain(skills)
                .chain(enemies)
                .chain(session),
        );
    }

    fn announce_spawn(&mut self, spawned: Spawned) {
        let Some(enemy) = self.arena.get(spawned.id) else {
            return;
        };
        tracing::debug!(
            id = %spawned.id,
            enemy = enemy.model.name(),
            elite = enemy.model.is_elite(),
            "enemy spawned"
        );
        self.pending.push(SessionEvent::EnemySpawned {
            id: spawned.id,
            name: enemy.model.name().to_owned(),
            level: enemy.model.level(),
            elite: enemy.model.is_elite(),
            position: spawned.position,
        });
    }

    // ===== player input =====

    /// Horizontal input axis in `[-1, 1]`, applied while movement is free.
    pub fn set_move_input(&mut self, axis: f32) {
        self.move_input = axis.clamp(-1.0, 1.0);
    }

    pub fn use_skill(&mut self, slot: SkillSlot) -> UseOutcome {
        if self.is_over {
            return UseOutcome::Rejected;
        }
        self.hero
            .use_skill(slot, &mut self.body, &mut self.arena, self.effects.as_mut())
    }

    /// Uses a skill by external slot index; unknown indices are rejected.
    pub fn use_skill_index(&mut self, index: usize) -> UseOutcome {
        match SkillSlot::from_index(index) {
            Some(slot) => self.use_skill(slot),
            None => {
                tracing::debug!(index, "unknown skill slot");
                UseOutcome::Rejected
            }
        }
    }

    /// Activates the equipped usable item. Temporary effects are reverted by
    /// a scheduled task.
    pub fn use_item(&mut self) -> ItemOutcome {
        if self.is_over {
            return ItemOutcome::Rejected;
        }
        let mut ctx = ItemContext {
            hero: &mut self.hero,
            position: self.body.position,
            targets: &mut self.arena,
            light: Some(&mut self.light),
        };
        let outcome = self.inventory.use_equipped(&mut ctx);
        if let ItemOutcome::Deferred { delay, revert } = outcome {
            self.scheduler.schedule_after(delay, Task::Revert(revert));
        }
        self.sync_darkness();
        outcome
    }

    pub fn pick_up(&mut self, item: Arc<ItemData>) {
        self.inventory.add_item(item, &mut self.hero);
    }

    /// Picks up a catalog item by name. Returns false for unknown names.
    pub fn pick_up_named(&mut self, name: &str) -> bool {
        match self.content.item(name) {
            Some(item) => {
                self.pick_up(item);
                true
            }
            None => {
                tracing::warn!(item = name, "unknown item");
                false
            }
        }
    }

    /// Picks up a dropped item. Returns false when it is already gone.
    pub fn pick_up_ground(&mut self, drop_id: u32) -> bool {
        if self.is_over {
            return false;
        }
        let Some(GroundItem { item, .. }) = self.ground.take(drop_id) else {
            return false;
        };
        self.pending.push(SessionEvent::ItemPickedUp {
            drop_id,
            name: item.name.clone(),
        });
        self.pick_up(item);
        true
    }

    /// Resolves a melee hit from enemy `id` against the hero. Landed hits
    /// also drain the light gauge.
    pub fn enemy_attack(&mut self, id: EntityId) -> HitOutcome {
        let Some(enemy) = self.arena.get(id) else {
            return HitOutcome::Ignored;
        };
        if self.is_over || enemy.model.is_dead() {
            return HitOutcome::Ignored;
        }
        let outcome = enemy.model.battler().attack(&mut self.hero);
        if matches!(outcome, HitOutcome::Damaged { .. }) {
            self.light.on_hit();
            self.sync_darkness();
        }
        outcome
    }

    /// Spawns one enemy immediately, ignoring the live cap.
    pub fn spawn_enemy_now(&mut self, force_elite: bool) -> Option<EntityId> {
        let spawned = self.spawner.spawn(
            &mut self.arena,
            self.spawn_points.as_mut(),
            self.rng.as_mut(),
            self.difficulty.enemy_damage_multiplier(),
            force_elite,
        )?;
        let id = spawned.id;
        self.announce_spawn(spawned);
        Some(id)
    }

    // ===== difficulty selection =====

    /// Changes the selected difficulty, retunes the light drain and persists
    /// the choice.
    pub fn select_difficulty(&mut self, difficulty: SelectedDifficulty) -> Result<()> {
        self.difficulty.set_selected_difficulty(difficulty);
        self.apply_selection()
    }

    /// Selects by menu index. Unknown indices keep the current selection.
    pub fn select_difficulty_index(&mut self, index: usize) -> Result<()> {
        self.difficulty.select_difficulty_index(index)?;
        self.apply_selection()
    }

    fn apply_selection(&mut self) -> Result<()> {
        self.light
            .set_drain_multiplier(self.difficulty.light_drain_multiplier());
        save_selected_difficulty(self.store.as_ref(), self.difficulty.selected())?;
        Ok(())
    }
}

/// Builder for [`Session`] with flexible configuration.
pub struct SessionBuilder {
    config: SessionConfig,
    content: Option<ContentBundle>,
    store: Option<Box<dyn PreferenceStore>>,
    spawn_points: Option<Box<dyn SpawnPointProvider>>,
    rng: Option<Box<dyn RandomSource>>,
    effects: Option<Box<dyn EffectSink>>,
    bus: Option<EventBus>,
}

impl SessionBuilder {
    /// Default spawn rectangle when no provider is configured.
    pub const DEFAULT_MAP_SIZE: Vec2 = Vec2::new(80.0, 40.0);

    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            content: None,
            store: None,
            spawn_points: None,
            rng: None,
            effects: None,
            bus: None,
        }
    }

    /// Override session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn archetype(mut self, archetype: Archetype) -> Self {
        self.config.archetype = archetype;
        self
    }

    pub fn difficulty(mut self, difficulty: SelectedDifficulty) -> Self {
        self.config.difficulty = Some(difficulty);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Content to play with. Defaults to [`ContentBundle::builtin`].
    pub fn content(mut self, content: ContentBundle) -> Self {
        self.content = Some(content);
        self
    }

    /// Preference store. Defaults to an in-memory store.
    pub fn store(mut self, store: impl PreferenceStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn spawn_points(mut self, points: impl SpawnPointProvider + 'static) -> Self {
        self.spawn_points = Some(Box::new(points));
        self
    }

    pub fn rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn effects(mut self, effects: impl EffectSink + 'static) -> Self {
        self.effects = Some(Box::new(effects));
        self
    }

    /// Share an existing bus instead of creating one.
    pub fn bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Build the session
    pub fn build(self) -> Result<Session> {
        let content = match self.content {
            Some(content) => content,
            None => ContentBundle::builtin().map_err(|e| RuntimeError::Content(format!("{e:#}")))?,
        };
        let store = self
            .store
            .unwrap_or_else(|| Box::new(InMemoryPreferenceStore::new()));
        let selected = self
            .config
            .difficulty
            .unwrap_or_else(|| load_selected_difficulty(store.as_ref()));

        let archetype = self.config.archetype;
        let hero_data = content
            .hero(archetype)
            .cloned()
            .ok_or(RuntimeError::MissingHero(archetype))?;
        let mut hero = HeroModel::new(hero_data);
        hero.init_skills(archetype, &content.loadout(archetype));

        let config = content.config.clone();
        let difficulty = DifficultyManager::new(config.erosion, selected);
        let light = LightGauge::new(config.light, difficulty.light_drain_multiplier());
        let mut spawner = EnemySpawner::new(config.spawn, content.enemies.clone());
        let drops = ItemDropTable::new(config.drops, &content.items);
        spawner.set_level(difficulty.level());

        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(light.config().drain_period, Task::LightDrain);
        scheduler.schedule_after(spawner.interval(), Task::SpawnEnemy);

        let rng = self.rng.unwrap_or_else(|| match self.config.seed {
            Some(seed) => Box::new(StdRandom::seeded(seed)),
            None => Box::new(StdRandom::from_entropy()),
        });
        let spawn_points = self
            .spawn_points
            .unwrap_or_else(|| Box::new(RectSpawnArea::new(Vec2::ZERO, Self::DEFAULT_MAP_SIZE)));

        tracing::info!(
            %archetype,
            difficulty = %selected,
            enemies = content.enemies.len(),
            "session started"
        );

        Ok(Session {
            config,
            hero,
            body: KinematicBody::new(self.config.hero_spawn, CollisionLayer::Hero),
            inventory: PlayerInventory::new(),
            light,
            difficulty,
            arena: Arena::new(),
            spawner,
            drops,
            ground: GroundItems::new(),
            scheduler,
            darkness_task: None,
            spawn_points,
            rng,
            effects: self.effects.unwrap_or_else(|| Box::new(NullEffects)),
            store,
            bus: self
                .bus
                .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size)),
            pending: Vec::new(),
            move_input: 0.0,
            elapsed: 0.0,
            is_over: false,
            content,
        })
    }
}
