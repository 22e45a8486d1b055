//! Reward item definitions served through [`super::TablesOracle`].

use std::fmt;

use strum::EnumIter;

/// Unique identifier for a loot definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootId(pub u16);

impl fmt::Display for LootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "loot:{}", self.0)
    }
}

/// Unique identifier for a consumable item definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableId(pub u16);

impl fmt::Display for ConsumableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

/// Rarity tier of a reward item, ordered from most to least common.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Sampling weight for loot drops.
    pub const fn loot_weight(self) -> u32 {
        match self {
            Rarity::Common => 50,
            Rarity::Uncommon => 25,
            Rarity::Rare => 15,
            Rarity::Epic => 8,
            Rarity::Legendary => 2,
        }
    }

    /// Sampling weight for bonus consumable drops.
    pub const fn consumable_weight(self) -> u32 {
        match self {
            Rarity::Common => 700,
            Rarity::Uncommon => 200,
            Rarity::Rare => 70,
            Rarity::Epic => 25,
            Rarity::Legendary => 5,
        }
    }
}

/// Loot item awarded after a won battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LootDefinition {
    pub id: LootId,
    pub name: &'static str,
    pub rarity: Rarity,
}

/// Consumable item occasionally awarded on top of loot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsumableDefinition {
    pub id: ConsumableId,
    pub name: &'static str,
    pub rarity: Rarity,
}
