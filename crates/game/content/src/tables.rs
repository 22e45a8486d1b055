//! Balance tables backed by the built-in catalogs.

use battle_core::env::{ConsumableDefinition, LootDefinition, TablesOracle};

use crate::items::{CONSUMABLES, LOOT};

/// Default balance tables: hit profiles and reward parameters come from the
/// trait defaults, catalogs from this crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct BalanceTables;

impl TablesOracle for BalanceTables {
    fn loot_catalog(&self) -> &[LootDefinition] {
        LOOT
    }

    fn consumable_catalog(&self) -> &[ConsumableDefinition] {
        CONSUMABLES
    }
}
