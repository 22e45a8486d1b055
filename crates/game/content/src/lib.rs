//! Built-in battle content.
//!
//! This crate houses the static data the engine resolves through its oracle
//! traits:
//! - ability catalog (ids, effects, costs, cooldowns)
//! - loot and consumable catalogs (reward draws)
//! - balance tables (hit tuning, reward parameters)
//! - opponent templates scaled by difficulty level
//!
//! Content is consumed through runtime oracles and never appears in battle
//! state.

pub mod abilities;
pub mod items;
pub mod opponents;
pub mod tables;

pub use abilities::{AbilityCatalog, ability_ids};
pub use items::{CONSUMABLES, LOOT};
pub use opponents::{opponent_party, opponent_template};
pub use tables::BalanceTables;
