//! Seedable RNG oracle for deterministic rolls.
//!
//! Miss checks, damage variance, crits, and reward draws all flow through
//! this trait so a battle replays identically from its seed. Implementations
//! must be deterministic: the same seed always yields the same value.

/// RNG oracle for deterministic random number generation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll in 1..=1000, for per-mille chance checks.
    fn roll_permille(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 1000) + 1
    }

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }

    /// Damage variance in -1..=1.
    fn variance(&self, seed: u64) -> i32 {
        self.range(seed, 0, 2) as i32 - 1
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Deterministic, fast, small
/// state, and passes the usual statistical batteries, which is all the
/// battle engine needs.
///
/// Reference: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// LCG step: `state' = state * multiplier + increment (mod 2^64)`.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift high bits, then a random rotate
    /// chosen from the top bits.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic seed from battle state components.
///
/// # Arguments
///
/// * `battle_seed` - Base seed fixed at battle setup (for replays)
/// * `nonce` - Action sequence number (increments each action)
/// * `actor_id` - Combatant performing the action
/// * `context` - Distinguishes multiple rolls within one action
///   (0 = miss check, 1 = variance, 2 = crit check, higher values for
///   reward draws)
pub fn compute_seed(battle_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // Mix inputs with SplitMix64/FxHash-style combiners.
    let mut hash = battle_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step.
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
