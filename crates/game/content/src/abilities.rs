//! Built-in ability catalog.

use battle_core::ability::{Ability, AbilityId, EffectKind, StatKind, StatModifier};
use battle_core::env::AbilityOracle;

use arrayvec::ArrayVec;

/// Stable ids for the built-in abilities.
pub mod ability_ids {
    use battle_core::ability::AbilityId;

    pub const SCRAP_BITE: AbilityId = AbilityId(1);
    pub const VOLT_SURGE: AbilityId = AbilityId(2);
    pub const PATCH_UP: AbilityId = AbilityId(3);
    pub const OVERDRIVE: AbilityId = AbilityId(4);
    pub const CORRODE: AbilityId = AbilityId(5);
    pub const PISTON_SLAM: AbilityId = AbilityId(6);
    pub const STATIC_FIELD: AbilityId = AbilityId(7);
    pub const NANO_SHIELD: AbilityId = AbilityId(8);
}

fn modifier(stats: &[StatKind], magnitude: i32, duration_turns: u8) -> StatModifier {
    let mut picked = ArrayVec::new();
    for stat in stats {
        picked.push(*stat);
    }
    StatModifier {
        stats: picked,
        magnitude,
        duration_turns,
    }
}

fn builtin() -> Vec<Ability> {
    use ability_ids::*;

    vec![
        // Cheap bread-and-butter strike.
        Ability::new(SCRAP_BITE, "scrap bite", EffectKind::Attack, 12).with_cost(5, 0),
        // Magic nuke: accurate (5% miss) and crit-prone (20%).
        Ability::new(VOLT_SURGE, "volt surge", EffectKind::MagicAttack, 18)
            .with_cost(12, 2)
            .with_chances(50, 200),
        Ability::new(PATCH_UP, "patch up", EffectKind::Heal, 15).with_cost(10, 3),
        Ability::new(OVERDRIVE, "overdrive", EffectKind::Buff, 0)
            .with_cost(8, 4)
            .with_modifier(modifier(&[StatKind::Attack, StatKind::Speed], 4, 3)),
        Ability::new(CORRODE, "corrode", EffectKind::Debuff, 0)
            .with_cost(8, 3)
            .with_modifier(modifier(&[StatKind::Defense], 5, 3)),
        // Heavy swing: hits hard but misses more (15%) and rarely crits.
        Ability::new(PISTON_SLAM, "piston slam", EffectKind::Attack, 25)
            .with_cost(15, 3)
            .with_chances(150, 100),
        Ability::new(STATIC_FIELD, "static field", EffectKind::Debuff, 0)
            .with_cost(6, 2)
            .with_modifier(modifier(&[StatKind::Speed, StatKind::Attack], 2, 2)),
        Ability::new(NANO_SHIELD, "nano shield", EffectKind::Buff, 0)
            .with_cost(9, 4)
            .with_modifier(modifier(&[StatKind::Defense], 6, 2)),
    ]
}

/// In-memory ability catalog serving the built-in set.
pub struct AbilityCatalog {
    abilities: Vec<Ability>,
}

impl AbilityCatalog {
    pub fn builtin() -> Self {
        Self {
            abilities: builtin(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter()
    }
}

impl Default for AbilityCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AbilityOracle for AbilityCatalog {
    fn ability(&self, id: AbilityId) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.id == id)
    }
}
