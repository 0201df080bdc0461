//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use game_core::{
    BattlerEvent, DifficultyEvent, EntityId, InventoryEvent, LightEvent, SkillEvent,
};

use super::types::SessionEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Hero and enemy battler changes
    Battler,
    /// Skill cooldowns
    Skill,
    /// Erosion level and selected difficulty
    Difficulty,
    /// Item pickups and usable cooldown
    Inventory,
    /// Light gauge
    Light,
    /// Spawns, kills and game over
    Session,
}

impl Topic {
    pub const COUNT: usize = 6;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Battler,
        Self::Skill,
        Self::Difficulty,
        Self::Inventory,
        Self::Light,
        Self::Session,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Battler => 0,
            Self::Skill => 1,
            Self::Difficulty => 2,
            Self::Inventory => 3,
            Self::Light => 4,
            Self::Session => 5,
        }
    }
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Hero(BattlerEvent),
    Enemy { id: EntityId, event: BattlerEvent },
    Skill(SkillEvent),
    Difficulty(DifficultyEvent),
    Inventory(InventoryEvent),
    Light(LightEvent),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Hero(_) | Event::Enemy { .. } => Topic::Battler,
            Event::Skill(_) => Topic::Skill,
            Event::Difficulty(_) => Topic::Difficulty,
            Event::Inventory(_) => Topic::Inventory,
            Event::Light(_) => Topic::Light,
            Event::Session(_) => Topic::Session,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are created up front, one per topic.
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; Topic::COUNT]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Topic::ALL.map(|_| broadcast::channel(capacity).0)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels[topic.index()].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    pub fn publish_all(&self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.publish(event);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[topic.index()].subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut light = bus.subscribe(Topic::Light);

        bus.publish(Event::Session(SessionEvent::HeroDied));
        bus.publish(Event::Light(LightEvent::Toggled { on: false }));

        assert_eq!(
            light.try_recv().unwrap(),
            Event::Light(LightEvent::Toggled { on: false })
        );
        assert!(light.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(1);
        bus.publish(Event::Hero(BattlerEvent::Died));
    }
}
