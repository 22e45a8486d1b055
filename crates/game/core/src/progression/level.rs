//! Experience curve and level-up arithmetic.
//!
//! Experience is a single monotonically increasing total per combatant; the
//! level is always derived from it, never stored alongside it, so the two can
//! never drift apart.

/// Highest reachable level. Experience past completing it is discarded.
pub const MAX_LEVEL: u32 = 50;

/// Experience required to complete level `level` (go from `level` to
/// `level + 1`).
///
/// # Formula
///
/// `level * 100`
pub const fn xp_to_complete(level: u32) -> u64 {
    level as u64 * 100
}

/// Total experience at which level `level` begins. Levels 0 and 1 both
/// begin at zero.
///
/// # Formula
///
/// `sum(k * 100 for k in 1..level)` = `100 * level * (level - 1) / 2`
pub const fn xp_to_reach(level: u32) -> u64 {
    let level = level as u64;
    100 * level * level.saturating_sub(1) / 2
}

/// The level a combatant with `experience` total experience holds, capped at
/// `max_level`.
pub fn level_for_xp(experience: u64, max_level: u32) -> u32 {
    let mut level = 1;
    while level < max_level && experience >= xp_to_reach(level + 1) {
        level += 1;
    }
    level
}

/// Outcome of granting experience to one combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelProgress {
    pub old_level: u32,
    pub new_level: u32,
    /// Final experience total after clamping at the max-level cap.
    pub experience: u64,
    /// Experience discarded because the cap was reached.
    pub overflow_discarded: u64,
}

impl LevelProgress {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.old_level
    }

    pub fn levels_gained(&self) -> u32 {
        self.new_level - self.old_level
    }
}

/// Grants `delta` experience on top of `current`, clamping the total at the
/// amount needed to complete `max_level` and discarding the rest. Experience
/// inside the max level's own bar is retained.
pub fn add_experience(current: u64, delta: u64, max_level: u32) -> LevelProgress {
    let old_level = level_for_xp(current, max_level);

    let cap = xp_to_reach(max_level) + xp_to_complete(max_level);
    let raw = current.saturating_add(delta);
    let experience = raw.min(cap);
    let overflow_discarded = raw - experience;

    LevelProgress {
        old_level,
        new_level: level_for_xp(experience, max_level),
        experience,
        overflow_discarded,
    }
}
