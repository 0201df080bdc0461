//! Scripted player and stand-in enemy AI for headless runs.
//!
//! Enemy movement and attack AI are not part of the session, so the
//! autopilot plays both sides: it walks the hero toward the nearest enemy,
//! fires any skill whose range covers it, grabs drops within reach, and lets
//! every enemy in contact strike the hero on a fixed period.

use std::sync::Arc;

use game_core::{EntityId, ItemData, ItemEffect, SkillSlot, UseOutcome, UsableEffect};
use runtime::Session;

use crate::config::AutopilotConfig;

pub struct Autopilot {
    config: AutopilotConfig,
    attack_timer: f32,
    last_level: u32,
    passives: Vec<Arc<ItemData>>,
    next_passive: usize,
}

impl Autopilot {
    pub fn new(config: AutopilotConfig, session: &Session) -> Self {
        let passives = session
            .content()
            .items
            .iter()
            .filter(|item| matches!(item.effect, ItemEffect::Passive(_)))
            .cloned()
            .collect();
        Self {
            config,
            attack_timer: 0.0,
            last_level: session.difficulty().level(),
            passives,
            next_passive: 0,
        }
    }

    /// Issues this frame's inputs. Call before `Session::tick`.
    pub fn step(&mut self, session: &mut Session, dt: f32) {
        if session.is_over() {
            return;
        }
        self.reward_level_up(session);
        self.manage_items(session);
        self.collect_drops(session);
        self.chase_and_strike(session);
        self.enemies_strike(session, dt);
    }

    /// Grants one passive per erosion level gained, cycling the catalog.
    fn reward_level_up(&mut self, session: &mut Session) {
        let level = session.difficulty().level();
        while self.last_level < level {
            self.last_level += 1;
            if self.passives.is_empty() {
                continue;
            }
            let item = Arc::clone(&self.passives[self.next_passive % self.passives.len()]);
            self.next_passive += 1;
            tracing::info!(item = %item.name, level = self.last_level, "autopilot picked up passive");
            session.pick_up(item);
        }
    }

    fn manage_items(&mut self, session: &mut Session) {
        let battler = session.hero().battler();
        let hurt = battler.cur_hp() < battler.max_hp() * self.config.heal_threshold;
        let wanted = if !session.light().is_on() {
            Some(UsableEffect::LightRecharge)
        } else if hurt {
            Some(UsableEffect::Heal)
        } else {
            None
        };
        let Some(wanted) = wanted else {
            return;
        };

        let equipped_matches = session
            .inventory()
            .equipped()
            .is_some_and(|item| item.effect == ItemEffect::Usable(wanted.clone()));
        if !equipped_matches {
            let Some(item) = session
                .content()
                .items
                .iter()
                .find(|item| item.effect == ItemEffect::Usable(wanted.clone()))
                .cloned()
            else {
                return;
            };
            session.pick_up(item);
        }

        if session.inventory().can_use_item() {
            let outcome = session.use_item();
            tracing::debug!(?outcome, "autopilot used item");
        }
    }

    fn collect_drops(&mut self, session: &mut Session) {
        let hero_position = session.body().position;
        while let Some(drop_id) = session
            .ground_items()
            .nearest_within(hero_position, self.config.contact_range)
            .map(|ground| ground.id)
        {
            if !session.pick_up_ground(drop_id) {
                break;
            }
            tracing::info!(drop_id, "autopilot picked up drop");
        }
    }

    fn chase_and_strike(&mut self, session: &mut Session) {
        let hero_position = session.body().position;
        let Some((target, distance)) = session
            .arena()
            .nearest_live(hero_position)
            .map(|enemy| (enemy.position, enemy.position.distance(hero_position)))
        else {
            session.set_move_input(0.0);
            return;
        };

        // Self-targeted skills (no range) fire once an enemy is in contact.
        for slot in SkillSlot::ALL {
            let in_range = session
                .hero()
                .skills()
                .get_skill(slot)
                .is_some_and(|skill| {
                    let reach = match skill.data().range {
                        range if range > 0.0 => range,
                        _ => self.config.contact_range,
                    };
                    skill.can_use() && reach >= distance
                });
            if in_range && session.use_skill(slot) == UseOutcome::Used {
                tracing::debug!(%slot, distance, "autopilot used skill");
            }
        }

        let axis = if distance > self.config.contact_range {
            (target.x - hero_position.x).signum()
        } else {
            0.0
        };
        session.set_move_input(axis);
    }

    fn enemies_strike(&mut self, session: &mut Session, dt: f32) {
        self.attack_timer += dt;
        if self.attack_timer < self.config.enemy_attack_period {
            return;
        }
        self.attack_timer -= self.config.enemy_attack_period;

        let hero_position = session.body().position;
        let attackers: Vec<EntityId> = session
            .arena()
            .iter()
            .filter(|enemy| !enemy.model.is_dead())
            .filter(|enemy| enemy.position.distance(hero_position) <= self.config.contact_range)
            .map(|enemy| enemy.id)
            .collect();
        for id in attackers {
            let outcome = session.enemy_attack(id);
            tracing::trace!(?id, ?outcome, "enemy strike");
        }
    }
}
