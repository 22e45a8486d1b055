//! Runtime event stream.
//!
//! The session publishes battle and progression events onto a topic-based
//! bus; presentation subscribes to the topics it cares about and maps
//! combatant identities to its own visual anchors. The core never queries
//! presentation.

mod bus;

pub use bus::{Event, EventBus, ProgressionEvent, Topic};
