//! Live enemies and the target lookup skills resolve against.

use game_core::{
    BattlerEvent, Damageable, EnemyModel, EntityId, Reward, TargetInfo, TargetQuery, Vec2,
};

#[derive(Debug)]
pub struct ArenaEnemy {
    pub id: EntityId,
    pub position: Vec2,
    pub model: EnemyModel,
}

/// An enemy removed from the arena after dying.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Defeated {
    pub id: EntityId,
    pub position: Vec2,
    pub reward: Reward,
}

/// Enemy registry for one session. Ids start at 1; 0 is the hero.
#[derive(Debug)]
pub struct Arena {
    enemies: Vec<ArenaEnemy>,
    next_id: u32,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            next_id: EntityId::HERO.0 + 1,
        }
    }

    pub fn insert(&mut self, model: EnemyModel, position: Vec2) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.enemies.push(ArenaEnemy {
            id,
            position,
            model,
        });
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&ArenaEnemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut ArenaEnemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArenaEnemy> {
        self.enemies.iter()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.enemies.iter().filter(|enemy| !enemy.model.is_dead()).count()
    }

    pub fn nearest_live(&self, origin: Vec2) -> Option<&ArenaEnemy> {
        self.enemies
            .iter()
            .filter(|enemy| !enemy.model.is_dead())
            .min_by(|a, b| {
                origin
                    .distance(a.position)
                    .total_cmp(&origin.distance(b.position))
            })
    }

    /// Pending battler events of every enemy, tagged by id.
    pub fn drain_events(&mut self) -> Vec<(EntityId, BattlerEvent)> {
        self.enemies
            .iter_mut()
            .flat_map(|enemy| {
                let id = enemy.id;
                enemy
                    .model
                    .drain_events()
                    .into_iter()
                    .map(move |event| (id, event))
            })
            .collect()
    }

    /// Removes dead enemies and returns their rewards in arena order.
    pub fn reap_dead(&mut self) -> Vec<Defeated> {
        let mut defeated = Vec::new();
        self.enemies.retain(|enemy| match enemy.model.reward() {
            Some(reward) => {
                defeated.push(Defeated {
                    id: enemy.id,
                    position: enemy.position,
                    reward,
                });
                false
            }
            None => true,
        });
        defeated
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetQuery for Arena {
    fn candidates_within(&self, origin: Vec2, radius: f32) -> Vec<TargetInfo> {
        self.enemies
            .iter()
            .filter(|enemy| !enemy.model.is_dead() && origin.distance(enemy.position) <= radius)
            .map(|enemy| TargetInfo {
                id: enemy.id,
                position: enemy.position,
            })
            .collect()
    }

    fn target_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable> {
        self.get_mut(id)
            .map(|enemy| &mut enemy.model as &mut dyn Damageable)
    }
}
