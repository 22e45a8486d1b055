//! Opponent templates scaled by difficulty level.

use battle_core::state::{CombatantSpec, StatBlock};

use crate::abilities::ability_ids;

const NAMES: [&str; 4] = ["rustjaw", "gearback", "sparkmite", "boltcrow"];

/// One opposing combatant at the given level.
///
/// `variant` cycles through the template roster; stats scale linearly with
/// level so a same-level opponent stays a fair fight for a fresh party.
pub fn opponent_template(level: u32, variant: usize) -> CombatantSpec {
    let level = level.max(1);
    let l = level as i32;

    CombatantSpec {
        name: NAMES[variant % NAMES.len()].to_owned(),
        level,
        stats: StatBlock {
            attack: 6 + 2 * l,
            defense: 3 + l,
            speed: 5 + l,
            magic: 4 + l,
            max_health: 20 + 8 * level,
        },
        health: None,
        mana: 10 + 2 * level,
        abilities: vec![ability_ids::SCRAP_BITE],
    }
}

/// An opposing party of `count` combatants at the given level.
pub fn opponent_party(level: u32, count: usize) -> Vec<CombatantSpec> {
    (0..count).map(|v| opponent_template(level, v)).collect()
}
