//! Target eligibility: the front line protects the back line.

use crate::state::{Combatant, CombatantId};

/// Combatants on a side that may be targeted by offensive effects.
///
/// Non-defeated front-line combatants if any survive; otherwise the
/// non-defeated back line. Order follows the side's fielding order.
pub fn targetable_combatants(side: &[Combatant]) -> Vec<CombatantId> {
    let front: Vec<CombatantId> = side
        .iter()
        .filter(|c| !c.defeated && c.slot.is_front_line())
        .map(|c| c.id)
        .collect();
    if !front.is_empty() {
        return front;
    }

    side.iter()
        .filter(|c| !c.defeated)
        .map(|c| c.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BoardSlot, StatBlock};

    fn combatant(id: u32, slot: BoardSlot) -> Combatant {
        Combatant::new(
            CombatantId(id),
            "krawler",
            1,
            StatBlock {
                attack: 5,
                defense: 5,
                speed: 5,
                magic: 5,
                max_health: 20,
            },
            slot,
            10,
        )
    }

    #[test]
    fn front_line_shields_back_line() {
        let side = vec![
            combatant(0, BoardSlot::FrontLeft),
            combatant(1, BoardSlot::FrontRight),
            combatant(2, BoardSlot::BackLeft),
        ];
        assert_eq!(
            targetable_combatants(&side),
            vec![CombatantId(0), CombatantId(1)]
        );
    }

    #[test]
    fn back_line_exposed_once_front_line_falls() {
        let mut side = vec![
            combatant(0, BoardSlot::FrontLeft),
            combatant(1, BoardSlot::FrontRight),
            combatant(2, BoardSlot::BackLeft),
        ];
        side[0].apply_damage(100);
        side[1].apply_damage(100);

        assert_eq!(targetable_combatants(&side), vec![CombatantId(2)]);
    }

    #[test]
    fn surviving_front_liner_keeps_shielding() {
        let mut side = vec![
            combatant(0, BoardSlot::FrontLeft),
            combatant(1, BoardSlot::FrontRight),
            combatant(2, BoardSlot::BackLeft),
        ];
        side[0].apply_damage(100);

        assert_eq!(targetable_combatants(&side), vec![CombatantId(1)]);
    }
}
