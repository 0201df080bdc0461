//! Topic-based event bus for session events.
//!
//! Core models queue their own notifications; the session drains them once
//! per tick and republishes them here so presentation layers can subscribe to
//! the topics they render.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::SessionEvent;
