//! Items dropped by defeated enemies, waiting to be picked up.
use std::sync::Arc;

use game_core::{ItemData, Vec2};

#[derive(Clone, Debug)]
pub struct GroundItem {
    pub id: u32,
    pub item: Arc<ItemData>,
    pub position: Vec2,
}

/// Ground items of one session. Ids are never reused.
#[derive(Debug, Default)]
pub struct GroundItems {
    items: Vec<GroundItem>,
    next_id: u32,
}

impl GroundItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, item: Arc<ItemData>, position: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(GroundItem { id, item, position });
        id
    }

    pub fn take(&mut self, id: u32) -> Option<GroundItem> {
        let index = self.items.iter().position(|ground| ground.id == id)?;
        Some(self.items.swap_remove(index))
    }

    pub fn get(&self, id: u32) -> Option<&GroundItem> {
        self.items.iter().find(|ground| ground.id == id)
    }

    /// Closest item to `from` within `radius`.
    pub fn nearest_within(&self, from: Vec2, radius: f32) -> Option<&GroundItem> {
        self.items
            .iter()
            .map(|ground| (ground, ground.position.distance(from)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(ground, _)| ground)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroundItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::PassiveEffect;

    fn whetstone() -> Arc<ItemData> {
        Arc::new(ItemData::passive("Whetstone", PassiveEffect::DamageBonus, 1.0))
    }

    #[test]
    fn take_removes_once() {
        let mut ground = GroundItems::new();
        let first = ground.place(whetstone(), Vec2::ZERO);
        let second = ground.place(whetstone(), Vec2::new(3.0, 0.0));
        assert_ne!(first, second);

        assert_eq!(ground.take(first).map(|g| g.id), Some(first));
        assert!(ground.take(first).is_none());
        assert_eq!(ground.len(), 1);
    }

    #[test]
    fn nearest_within_respects_radius() {
        let mut ground = GroundItems::new();
        ground.place(whetstone(), Vec2::new(5.0, 0.0));
        let near = ground.place(whetstone(), Vec2::new(1.0, 0.0));

        assert_eq!(ground.nearest_within(Vec2::ZERO, 2.0).map(|g| g.id), Some(near));
        ground.take(near);
        assert!(ground.nearest_within(Vec2::ZERO, 2.0).is_none());
    }
}
