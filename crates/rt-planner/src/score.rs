//! Route scoring.
//!
//! ```text
//! score = floor( sqrt(euclid(a, b)) / 7 + shortest_cost / 2 + bonus )
//! bonus ∈ 0..=SCORE_BONUS_MAX, uniform
//! ```
//!
//! Every term is non-negative, so the floor is a plain truncation.

use rt_core::{Coord, RouteRng};

/// Largest random bonus added to a score.
pub const SCORE_BONUS_MAX: u32 = 2;

/// Score a route from its endpoints and the cost of its shortest path.
pub fn score(a: Coord, b: Coord, shortest_cost: u64, rng: &mut RouteRng) -> u32 {
    let bonus = rng.gen_range(0..=SCORE_BONUS_MAX);
    score_with_bonus(a, b, shortest_cost, bonus)
}

/// The deterministic part of [`score`] with an explicit bonus.
pub fn score_with_bonus(a: Coord, b: Coord, shortest_cost: u64, bonus: u32) -> u32 {
    let points = a.distance(b).sqrt() / 7.0 + shortest_cost as f64 / 2.0 + f64::from(bonus);
    points.floor() as u32
}
