use std::sync::Arc;

use game_content::ContentBundle;
use game_core::{
    Archetype, BattlerEvent, EnemyData, ItemOutcome, ItemRarity, RandomSource, SelectedDifficulty,
    SkillSlot, UseOutcome, Vec2,
};
use runtime::{Event, FixedSpawnPoints, Session, SessionEvent, Topic};

/// Built-in content with a single one-hit enemy and no light drain.
fn calm_content() -> ContentBundle {
    let mut content = ContentBundle::builtin().expect("builtin content should parse");
    content.enemies = vec![Arc::new(EnemyData {
        name: "Wisp".into(),
        base_max_hp: 1.0,
        base_damage: 10.0,
        base_exp_reward: 10.0,
        base_gold_reward: 4,
        can_be_elite: false,
        ..EnemyData::default()
    })];
    content.config.light.base_drain = 0.0;
    content
}

fn session_with(content: ContentBundle, difficulty: SelectedDifficulty) -> Session {
    Session::builder()
        .archetype(Archetype::Warrior)
        .difficulty(difficulty)
        .seed(42)
        .content(content)
        .spawn_points(FixedSpawnPoints::new(vec![Vec2::new(1.5, 0.0)]))
        .build()
        .expect("session should build")
}

/// Returns the same roll every time.
struct FixedRoll(f32);

impl RandomSource for FixedRoll {
    fn next_f32(&mut self) -> f32 {
        self.0
    }
}

fn session_rolling(content: ContentBundle, roll: f32) -> Session {
    Session::builder()
        .archetype(Archetype::Warrior)
        .difficulty(SelectedDifficulty::Normal)
        .content(content)
        .rng(FixedRoll(roll))
        .spawn_points(FixedSpawnPoints::new(vec![Vec2::new(1.5, 0.0)]))
        .build()
        .expect("session should build")
}

fn dropped(events: &[Event]) -> Vec<(u32, String, ItemRarity)> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Session(SessionEvent::ItemDropped {
                drop_id,
                name,
                rarity,
                ..
            }) => Some((*drop_id, name.clone(), *rarity)),
            _ => None,
        })
        .collect()
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

#[test]
fn initial_hero_state_is_published_on_first_tick() {
    let mut session = session_with(calm_content(), SelectedDifficulty::Normal);
    let mut battler = session.subscribe(Topic::Battler);

    session.tick(0.016);

    let events = drain(&mut battler);
    assert!(matches!(events.first(), Some(Event::Hero(BattlerEvent::HpChanged { .. }))));
    assert!(events.contains(&Event::Hero(BattlerEvent::LevelChanged { old: 1, new: 1 })));
}

#[test]
fn killing_an_enemy_grants_rewards() {
    let mut session = session_with(calm_content(), SelectedDifficulty::Normal);
    let mut battler = session.subscribe(Topic::Battler);
    let mut lifecycle = session.subscribe(Topic::Session);

    let id = session.spawn_enemy_now(false).expect("spawn point available");
    assert_eq!(session.use_skill(SkillSlot::Skill1), UseOutcome::Used);
    assert_eq!(session.use_skill(SkillSlot::Skill1), UseOutcome::Rejected);
    session.tick(0.016);

    assert!(session.arena().get(id).is_none());
    // Level 1 rewards: 10 × 1.2 exp, 4 × 1.2 gold truncated.
    assert_eq!(session.hero().cur_exp(), 12.0);
    assert_eq!(session.hero().gold(), 4);

    let enemy_died = drain(&mut battler)
        .into_iter()
        .any(|event| event == Event::Enemy { id, event: BattlerEvent::Died });
    assert!(enemy_died);
    assert!(drain(&mut lifecycle).contains(&Event::Session(SessionEvent::EnemyDefeated {
        id,
        exp: 12.0,
        gold: 4,
    })));
}

#[test]
fn easy_erosion_interval_is_stretched() {
    let mut session = session_with(calm_content(), SelectedDifficulty::Easy);

    for _ in 0..99 {
        session.tick(1.0);
    }
    assert_eq!(session.difficulty().level(), 1);

    session.tick(1.0);
    assert_eq!(session.difficulty().level(), 2);
    assert!(!session.is_over());
}

#[test]
fn spawner_fills_the_arena_up_to_the_cap() {
    let mut session = session_with(calm_content(), SelectedDifficulty::Normal);
    let mut lifecycle = session.subscribe(Topic::Session);

    for _ in 0..60 {
        session.tick(1.0);
    }

    let cap = session.spawner().max_enemies() as usize;
    assert_eq!(session.arena().live_count(), cap);
    let spawned = drain(&mut lifecycle)
        .into_iter()
        .filter(|event| matches!(event, Event::Session(SessionEvent::EnemySpawned { .. })))
        .count();
    assert_eq!(spawned, cap);
}

#[test]
fn darkness_wears_the_hero_down_until_relit() {
    let mut content = calm_content();
    content.config.light.max_gauge = 4.0;
    content.config.light.base_drain = 2.0;
    content.config.light.drain_period = 1.0;
    let mut session = session_with(content, SelectedDifficulty::Normal);
    let mut lifecycle = session.subscribe(Topic::Session);

    session.tick(1.0);
    assert!(!session.light().is_on());
    assert!(session.is_dark());

    let full = session.hero().battler().max_hp();
    session.tick(1.0);
    assert!(session.hero().battler().cur_hp() < full);

    assert!(session.pick_up_named("Lamp Oil"));
    assert_eq!(session.use_item(), ItemOutcome::Applied);
    assert!(session.light().is_on());
    assert!(!session.is_dark());

    session.tick(0.016);
    let events = drain(&mut lifecycle);
    assert!(events.contains(&Event::Session(SessionEvent::DarknessStarted)));
    assert!(events.contains(&Event::Session(SessionEvent::DarknessEnded)));
}

#[test]
fn unlit_hero_eventually_dies_and_the_session_stops() {
    let mut content = calm_content();
    content.config.light.max_gauge = 2.0;
    content.config.light.base_drain = 1.0;
    content.config.light.drain_period = 1.0;
    let mut session = session_with(content, SelectedDifficulty::Normal);
    let mut lifecycle = session.subscribe(Topic::Session);

    for _ in 0..60 {
        session.tick(1.0);
    }

    assert!(session.is_over());
    assert!(session.hero().is_dead());
    let elapsed = session.elapsed();
    session.tick(1.0);
    assert_eq!(session.elapsed(), elapsed);
    assert_eq!(session.use_skill(SkillSlot::Skill1), UseOutcome::Rejected);
    assert!(drain(&mut lifecycle).contains(&Event::Session(SessionEvent::HeroDied)));
}

#[test]
fn speed_boost_is_reverted_by_the_scheduler() {
    let mut session = session_with(calm_content(), SelectedDifficulty::Normal);
    let base = session.hero().battler().move_speed();

    assert!(session.pick_up_named("Wind Tonic"));
    let outcome = session.use_item();
    assert!(matches!(outcome, ItemOutcome::Deferred { .. }));
    assert_eq!(session.hero().battler().move_speed(), base + 2.0);

    session.tick(4.0);
    assert_eq!(session.hero().battler().move_speed(), base + 2.0);
    session.tick(1.0);
    assert_eq!(session.hero().battler().move_speed(), base);
}

#[test]
fn enemy_hits_drain_the_light() {
    let mut session = session_with(calm_content(), SelectedDifficulty::Easy);
    let id = session.spawn_enemy_now(false).expect("spawn point available");
    let gauge = session.light().current();
    let hp = session.hero().battler().cur_hp();

    session.enemy_attack(id);

    // Warrior armor 5 against 10 × 1.2 × 0.65 damage.
    let expected = (12.0_f32 * 0.65 - 5.0).max(0.0);
    assert!((hp - session.hero().battler().cur_hp() - expected).abs() < 1e-4);
    assert!(session.light().current() < gauge);
}

#[test]
fn darkness_hits_on_the_tick_the_light_goes_out() {
    let mut content = calm_content();
    content.config.light.max_gauge = 4.0;
    content.config.light.base_drain = 2.0;
    content.config.light.drain_period = 1.0;
    let mut session = session_with(content, SelectedDifficulty::Normal);
    let full = session.hero().battler().max_hp();

    let mut steps = 0;
    while session.light().is_on() {
        assert_eq!(session.hero().battler().cur_hp(), full);
        session.tick(0.05);
        steps += 1;
        assert!(steps < 200, "light never went out");
    }

    assert!(session.hero().battler().cur_hp() < full);
}

#[test]
fn elite_drops_only_with_four_leaf_clover() {
    let mut content = calm_content();
    content.enemies = vec![Arc::new(EnemyData {
        can_be_elite: true,
        ..(*content.enemies[0]).clone()
    })];

    let mut plain = session_rolling(content.clone(), 0.0);
    let mut lifecycle = plain.subscribe(Topic::Session);
    plain.spawn_enemy_now(true).expect("spawn point available");
    assert_eq!(plain.use_skill(SkillSlot::Skill1), UseOutcome::Used);
    plain.tick(0.016);
    assert!(dropped(&drain(&mut lifecycle)).is_empty());
    assert!(plain.ground_items().is_empty());

    let mut lucky = session_rolling(content, 0.0);
    let mut lifecycle = lucky.subscribe(Topic::Session);
    assert!(lucky.pick_up_named("Four Leaf Clover"));
    lucky.spawn_enemy_now(true).expect("spawn point available");
    assert_eq!(lucky.use_skill(SkillSlot::Skill1), UseOutcome::Used);
    lucky.tick(0.016);

    // A zero roll lands in the common band and picks the first common passive.
    let drops = dropped(&drain(&mut lifecycle));
    assert_eq!(drops.len(), 1);
    let (drop_id, name, rarity) = drops[0].clone();
    assert_eq!((name.as_str(), rarity), ("Iron Heart", ItemRarity::Common));
    assert_eq!(lucky.ground_items().len(), 1);

    assert!(lucky.pick_up_ground(drop_id));
    assert!(!lucky.pick_up_ground(drop_id));
    assert_eq!(lucky.inventory().passive_count("Iron Heart"), 1);
    lucky.tick(0.016);
    assert!(drain(&mut lifecycle).contains(&Event::Session(SessionEvent::ItemPickedUp {
        drop_id,
        name: "Iron Heart".into(),
    })));
}

#[test]
fn bosses_drop_from_the_boss_table() {
    let mut content = calm_content();
    content.enemies = vec![Arc::new(EnemyData {
        is_boss: true,
        ..(*content.enemies[0]).clone()
    })];

    let mut session = session_rolling(content.clone(), 0.05);
    let mut lifecycle = session.subscribe(Topic::Session);
    session.spawn_enemy_now(false).expect("spawn point available");
    assert_eq!(session.use_skill(SkillSlot::Skill1), UseOutcome::Used);
    session.tick(0.016);

    let drops = dropped(&drain(&mut lifecycle));
    assert_eq!(drops.len(), 1);
    assert_eq!(drops[0].1, "Ashen Crown");
    assert_eq!(drops[0].2, ItemRarity::BossItem);

    // Rolls at or above the boss chance drop nothing.
    let mut unlucky = session_rolling(content, 0.1);
    unlucky.spawn_enemy_now(false).expect("spawn point available");
    assert_eq!(unlucky.use_skill(SkillSlot::Skill1), UseOutcome::Used);
    unlucky.tick(0.016);
    assert!(unlucky.ground_items().is_empty());
}
