//! Effective stat computation.

use crate::ability::StatKind;
use crate::state::Combatant;

/// Stats after applying active status-effect deltas.
///
/// Health is never part of this snapshot: statuses cannot touch it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveStats {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub magic: i32,
}

/// Sums base stats with all active status deltas for each stat.
///
/// Attack, speed, and magic floor at 1; defense floors at 0.
pub fn effective_stats(combatant: &Combatant) -> EffectiveStats {
    let base = combatant.stats;
    let statuses = &combatant.statuses;

    EffectiveStats {
        attack: (base.attack + statuses.delta_for(StatKind::Attack)).max(1),
        defense: (base.defense + statuses.delta_for(StatKind::Defense)).max(0),
        speed: (base.speed + statuses.delta_for(StatKind::Speed)).max(1),
        magic: (base.magic + statuses.delta_for(StatKind::Magic)).max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityId;
    use crate::state::{BoardSlot, CombatantId, StatBlock, StatusKey};

    fn combatant() -> Combatant {
        Combatant::new(
            CombatantId(0),
            "gloomtail",
            1,
            StatBlock {
                attack: 4,
                defense: 3,
                speed: 6,
                magic: 2,
                max_health: 25,
            },
            BoardSlot::FrontLeft,
            10,
        )
    }

    #[test]
    fn deltas_are_summed_per_stat() {
        let mut c = combatant();
        c.statuses.apply(
            StatusKey {
                ability: AbilityId(1),
                stat: StatKind::Attack,
            },
            3,
            5,
        );

        let eff = effective_stats(&c);
        assert_eq!(eff.attack, 9);
        assert_eq!(eff.defense, 3);
    }

    #[test]
    fn offensive_stats_floor_at_one_defense_at_zero() {
        let mut c = combatant();
        for (stat, delta) in [
            (StatKind::Attack, -10),
            (StatKind::Defense, -10),
            (StatKind::Speed, -10),
            (StatKind::Magic, -10),
        ] {
            c.statuses.apply(
                StatusKey {
                    ability: AbilityId(2),
                    stat,
                },
                3,
                delta,
            );
        }

        let eff = effective_stats(&c);
        assert_eq!(eff.attack, 1);
        assert_eq!(eff.defense, 0);
        assert_eq!(eff.speed, 1);
        assert_eq!(eff.magic, 1);
    }
}
