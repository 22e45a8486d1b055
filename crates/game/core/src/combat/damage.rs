//! Damage formulas.

use super::stats::EffectiveStats;

/// Critical hits multiply damage by 1.5, floored.
fn apply_crit(damage: u32, critical: bool) -> u32 {
    if critical { damage * 3 / 2 } else { damage }
}

/// Basic attack damage.
///
/// # Formula
///
/// ```text
/// damage = max(1, attack - floor(defense / 2) + variance)   variance in -1..=1
/// critical: floor(damage * 1.5)
/// ```
pub fn basic_attack_damage(
    attacker: &EffectiveStats,
    target: &EffectiveStats,
    variance: i32,
    critical: bool,
) -> u32 {
    debug_assert!((-1..=1).contains(&variance));
    let raw = attacker.attack - target.defense / 2 + variance;
    apply_crit(raw.max(1) as u32, critical)
}

/// Ability strike damage.
///
/// # Formula
///
/// ```text
/// damage = max(1, power + floor(stat_bonus / 2) - floor(defense / 3))
/// ```
///
/// `stat_bonus` is the attacker's magic for magic attacks, attack otherwise.
pub fn ability_damage(power: u32, stat_bonus: i32, target_defense: i32, critical: bool) -> u32 {
    let raw = power as i32 + stat_bonus / 2 - target_defense / 3;
    apply_crit(raw.max(1) as u32, critical)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eff(attack: i32, defense: i32) -> EffectiveStats {
        EffectiveStats {
            attack,
            defense,
            speed: 5,
            magic: 5,
        }
    }

    #[test]
    fn basic_damage_halves_defense() {
        // 10 - 5/2 + 0 = 8
        assert_eq!(basic_attack_damage(&eff(10, 0), &eff(0, 5), 0, false), 8);
    }

    #[test]
    fn basic_damage_floors_at_one() {
        assert_eq!(basic_attack_damage(&eff(1, 0), &eff(0, 50), -1, false), 1);
    }

    #[test]
    fn crit_multiplies_by_three_halves_floored() {
        // base 9 -> crit 13 (13.5 floored)
        assert_eq!(basic_attack_damage(&eff(10, 0), &eff(0, 2), 0, true), 13);
    }

    #[test]
    fn ability_damage_uses_thirds_of_defense() {
        // 12 + 8/2 - 9/3 = 13
        assert_eq!(ability_damage(12, 8, 9, false), 13);
        assert_eq!(ability_damage(1, 0, 60, false), 1);
    }
}
