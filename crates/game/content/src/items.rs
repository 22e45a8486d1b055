//! Built-in loot and consumable catalogs.

use battle_core::env::{ConsumableDefinition, ConsumableId, LootDefinition, LootId, Rarity};

/// Loot drawn after a won battle, rarity-weighted.
pub const LOOT: &[LootDefinition] = &[
    LootDefinition {
        id: LootId(1),
        name: "scrap plating",
        rarity: Rarity::Common,
    },
    LootDefinition {
        id: LootId(2),
        name: "copper coil",
        rarity: Rarity::Common,
    },
    LootDefinition {
        id: LootId(3),
        name: "gear cluster",
        rarity: Rarity::Common,
    },
    LootDefinition {
        id: LootId(4),
        name: "servo joint",
        rarity: Rarity::Uncommon,
    },
    LootDefinition {
        id: LootId(5),
        name: "capacitor bank",
        rarity: Rarity::Uncommon,
    },
    LootDefinition {
        id: LootId(6),
        name: "alloy frame",
        rarity: Rarity::Rare,
    },
    LootDefinition {
        id: LootId(7),
        name: "optic array",
        rarity: Rarity::Rare,
    },
    LootDefinition {
        id: LootId(8),
        name: "fusion cell",
        rarity: Rarity::Epic,
    },
    LootDefinition {
        id: LootId(9),
        name: "prism core",
        rarity: Rarity::Legendary,
    },
];

/// Bonus consumables, rarity-weighted then uniform within the tier.
pub const CONSUMABLES: &[ConsumableDefinition] = &[
    ConsumableDefinition {
        id: ConsumableId(1),
        name: "repair gel",
        rarity: Rarity::Common,
    },
    ConsumableDefinition {
        id: ConsumableId(2),
        name: "grease ration",
        rarity: Rarity::Common,
    },
    ConsumableDefinition {
        id: ConsumableId(3),
        name: "charge pack",
        rarity: Rarity::Uncommon,
    },
    ConsumableDefinition {
        id: ConsumableId(4),
        name: "coolant flask",
        rarity: Rarity::Uncommon,
    },
    ConsumableDefinition {
        id: ConsumableId(5),
        name: "nanite swarm",
        rarity: Rarity::Rare,
    },
    ConsumableDefinition {
        id: ConsumableId(6),
        name: "overclock chip",
        rarity: Rarity::Epic,
    },
    ConsumableDefinition {
        id: ConsumableId(7),
        name: "phoenix spark",
        rarity: Rarity::Legendary,
    },
];
