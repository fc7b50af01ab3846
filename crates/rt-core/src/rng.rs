//! Deterministic per-route and generator-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each generated route gets its own independent `SmallRng` seeded by:
//!
//!   seed = batch_seed XOR (route_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive route indices uniformly across the seed space.
//! This means:
//!
//! - Routes never share RNG state, so a batch can be computed on any number
//!   of threads and still produce identical output.
//! - The batch seed is drawn from the generator's `PlannerRng`, so a fixed
//!   config seed reproduces the whole session.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RouteRng ──────────────────────────────────────────────────────────────────

/// RNG stream owned by a single route computation.
///
/// Every random choice made while producing one `RouteResult` (start city,
/// budget slack, edge sampling, score bonus) draws from the same stream.
pub struct RouteRng(SmallRng);

impl RouteRng {
    /// Seed deterministically from a batch seed and the route's index in it.
    pub fn new(batch_seed: u64, route_index: u64) -> Self {
        let seed = batch_seed ^ route_index.wrapping_mul(MIXING_CONSTANT);
        RouteRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── PlannerRng ────────────────────────────────────────────────────────────────

/// Generator-level RNG.  Only hands out seeds; the actual route work runs on
/// [`RouteRng`] streams derived from them.
///
/// If two threads need to drive generators from one root seed, give each its
/// own `PlannerRng` via [`child`](Self::child).
pub struct PlannerRng(SmallRng);

impl PlannerRng {
    pub fn new(seed: u64) -> Self {
        PlannerRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `PlannerRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> PlannerRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        PlannerRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Draw a fresh batch seed for a group of [`RouteRng`] streams.
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.0.r#gen()
    }

    /// Shorthand for a single-route stream (index 0 of a fresh batch).
    pub fn route_rng(&mut self) -> RouteRng {
        RouteRng::new(self.next_seed(), 0)
    }
}
