//! Seedable dice for deterministic combat rolls.
//!
//! All rolls flow through the [`Dice`] trait. [`SeededDice`] derives each roll
//! from `(game_seed, roll_nonce)` so that a replay with the same seed and the
//! same action sequence reproduces every roll. [`ScriptedDice`] replays a fixed
//! queue of forced rolls.

use std::collections::VecDeque;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        (self.next_u32(seed) % sides.max(1)) + 1
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. Stateless: the caller supplies the state as the seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a per-roll seed from the game seed and the roll counter.
///
/// `context` separates independent streams that share a nonce.
pub fn compute_seed(game_seed: u64, nonce: u64, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Source of uniformly distributed die rolls.
pub trait Dice {
    /// Roll a die with `sides` faces; result is in `1..=sides`.
    fn roll(&mut self, sides: u32) -> u32;

    /// Pick a uniformly distributed index into a collection of `len` items.
    fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let sides = u32::try_from(len).unwrap_or(u32::MAX);
        (self.roll(sides) - 1) as usize
    }
}

/// Deterministic dice stream keyed by a game seed.
#[derive(Clone, Debug)]
pub struct SeededDice {
    game_seed: u64,
    nonce: u64,
    rng: PcgRng,
}

impl SeededDice {
    pub fn new(game_seed: u64) -> Self {
        Self {
            game_seed,
            nonce: 0,
            rng: PcgRng,
        }
    }

    /// Number of rolls made so far.
    pub fn rolls_made(&self) -> u64 {
        self.nonce
    }
}

impl Dice for SeededDice {
    fn roll(&mut self, sides: u32) -> u32 {
        let seed = compute_seed(self.game_seed, self.nonce, 0);
        self.nonce += 1;
        let value = self.rng.roll_die(seed, sides);
        tracing::trace!(sides, value, nonce = self.nonce, "dice roll");
        value
    }
}

/// Replays a queue of forced rolls, then continues from a seeded stream.
///
/// Forced values are clamped into `1..=sides` of the die being rolled.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    fallback: SeededDice,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: SeededDice::new(0),
        }
    }

    /// Continue with a seeded stream once the script runs out.
    pub fn with_fallback_seed(mut self, game_seed: u64) -> Self {
        self.fallback = SeededDice::new(game_seed);
        self
    }

    /// Number of forced rolls still queued.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, sides: u32) -> u32 {
        match self.rolls.pop_front() {
            Some(value) => value.clamp(1, sides.max(1)),
            None => self.fallback.roll(sides),
        }
    }
}
