//! Miss and crit chance calculations.
//!
//! All chances are expressed in per-mille (1/1000) so resolution is
//! integer-only and reproducible across platforms.

use crate::state::Side;

/// Miss/crit tuning for one controller kind.
///
/// Opponent-controlled attackers are slightly less accurate and crit less
/// often than player-controlled ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitProfile {
    /// Base miss chance before the speed differential.
    pub miss_base: i32,
    pub miss_min: i32,
    pub miss_max: i32,
    /// Crit chance cap.
    pub crit_cap: u32,
    /// Crit chance = min(cap, speed * crit_num / crit_den).
    pub crit_num: u32,
    pub crit_den: u32,
}

impl HitProfile {
    /// Player-controlled attackers: miss in [5%, 25%] around a 10% base,
    /// crit = min(15%, speed/1000).
    pub const PLAYER: Self = Self {
        miss_base: 100,
        miss_min: 50,
        miss_max: 250,
        crit_cap: 150,
        crit_num: 1,
        crit_den: 1,
    };

    /// Opponent-controlled attackers: miss in [6%, 30%] around a 12% base,
    /// crit = min(10%, speed/1200).
    pub const OPPONENT: Self = Self {
        miss_base: 120,
        miss_min: 60,
        miss_max: 300,
        crit_cap: 100,
        crit_num: 5,
        crit_den: 6,
    };

    pub const fn for_side(side: Side) -> Self {
        match side {
            Side::Player => Self::PLAYER,
            Side::Opponent => Self::OPPONENT,
        }
    }
}

/// Miss chance in per-mille.
///
/// # Formula
///
/// ```text
/// miss = clamp(min..=max, base + (target_speed - attacker_speed) * 5)
/// ```
///
/// (a speed deficit of 1 point shifts the probability by 0.5%).
pub fn miss_chance(profile: &HitProfile, attacker_speed: i32, target_speed: i32) -> u32 {
    let raw = profile.miss_base + (target_speed - attacker_speed) * 5;
    raw.clamp(profile.miss_min, profile.miss_max) as u32
}

/// Crit chance in per-mille, scaling with attacker speed up to the cap.
pub fn crit_chance(profile: &HitProfile, attacker_speed: i32) -> u32 {
    let speed = attacker_speed.max(0) as u32;
    (speed * profile.crit_num / profile.crit_den).min(profile.crit_cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_chance_clamps_to_profile_bounds() {
        let p = HitProfile::PLAYER;
        // Massive speed advantage floors at 5%.
        assert_eq!(miss_chance(&p, 100, 1), 50);
        // Massive speed deficit caps at 25%.
        assert_eq!(miss_chance(&p, 1, 100), 250);
        // Equal speed sits at the 10% base.
        assert_eq!(miss_chance(&p, 10, 10), 100);
    }

    #[test]
    fn opponent_profile_is_less_accurate() {
        assert_eq!(miss_chance(&HitProfile::OPPONENT, 10, 10), 120);
        assert_eq!(miss_chance(&HitProfile::OPPONENT, 1, 100), 300);
    }

    #[test]
    fn crit_chance_scales_with_speed_up_to_cap() {
        assert_eq!(crit_chance(&HitProfile::PLAYER, 40), 40);
        assert_eq!(crit_chance(&HitProfile::PLAYER, 500), 150);
        // Opponent: 120 * 5/6 = 100, already at cap.
        assert_eq!(crit_chance(&HitProfile::OPPONENT, 120), 100);
        assert_eq!(crit_chance(&HitProfile::OPPONENT, 60), 50);
    }
}
