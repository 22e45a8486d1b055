//! Post-battle progression: experience curve and reward draws.

mod level;
mod rewards;

pub use level::{
    LevelProgress, MAX_LEVEL, add_experience, level_for_xp, xp_to_complete, xp_to_reach,
};
pub use rewards::{RewardBundle, battle_rewards};
