//! Battle session orchestration.
//!
//! `battle-runtime` drives battles built from `battle-core`'s pure engine:
//! it owns the session loop, the opponent controller, the virtual clock for
//! deferred work, the topic-based event bus presentation subscribes to, and
//! the boundary traits (roster, opponent generation, inventory) the host
//! application implements.

pub mod clock;
pub mod error;
pub mod events;
pub mod providers;
pub mod session;

pub use clock::{Schedule, VirtualClock};
pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, ProgressionEvent, Topic};
pub use providers::{
    BasicOpponentProvider, InventorySink, OpponentGenerator, OpponentProvider, PartyWriteback,
    RosterProvider, TemplateOpponentGenerator,
};
pub use session::{ActionId, BattleSession, SessionOutcome};
