//! Routing trait and the default uniform-cost search.
//!
//! # Pluggability
//!
//! The planner calls routing through the [`Router`] trait, so an admissible
//! heuristic search or a precomputed table can replace the default
//! [`UniformCostRouter`] without touching the planner.
//!
//! # Search order
//!
//! The frontier is ordered by accumulated distance only; there is no
//! heuristic term.  Entries with equal cost pop in the order they were
//! pushed.  A city is settled the first time it pops and the search stops
//! the first time the target pops, which is optimal because link distances
//! are positive.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rt_core::CityId;

use crate::network::NetworkGraph;
use crate::{NetworkError, NetworkResult};

// ── ShortestPath ──────────────────────────────────────────────────────────────

/// The result of a routing query: the cities visited in order and the summed
/// link distance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortestPath {
    /// Total distance of the path.
    pub cost: u64,
    /// Cities from source to destination, both included.  Never empty.
    pub cities: Vec<CityId>,
}

impl ShortestPath {
    pub fn start(&self) -> CityId {
        self.cities[0]
    }

    pub fn end(&self) -> CityId {
        self.cities[self.cities.len() - 1]
    }

    /// Number of links traversed.
    pub fn hops(&self) -> usize {
        self.cities.len() - 1
    }

    /// `true` if the source and destination are the same city.
    pub fn is_trivial(&self) -> bool {
        self.cities.len() == 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so one router can serve a parallel
/// batch of route computations.
pub trait Router: Send + Sync {
    /// Compute the cheapest path from `from` to `to`.
    ///
    /// `from == to` yields the single-city path with cost 0.  Unreachable
    /// targets yield [`NetworkError::PathNotFound`].
    fn shortest_path(
        &self,
        network: &NetworkGraph,
        from: CityId,
        to: CityId,
    ) -> NetworkResult<ShortestPath>;
}

// ── UniformCostRouter ─────────────────────────────────────────────────────────

/// Best-first search keyed on accumulated link distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCostRouter;

impl Router for UniformCostRouter {
    fn shortest_path(
        &self,
        network: &NetworkGraph,
        from: CityId,
        to: CityId,
    ) -> NetworkResult<ShortestPath> {
        uniform_cost(network, from, to)
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

/// One pushed frontier entry.  The chain of `parent` links is the entry's
/// path so far.
struct Trail {
    city:   CityId,
    parent: Option<usize>,
}

fn uniform_cost(network: &NetworkGraph, from: CityId, to: CityId) -> NetworkResult<ShortestPath> {
    if !network.contains(from) {
        return Err(NetworkError::UnknownNode(from));
    }
    if !network.contains(to) {
        return Err(NetworkError::UnknownNode(to));
    }
    if from == to {
        return Ok(ShortestPath { cost: 0, cities: vec![from] });
    }

    let mut settled = vec![false; network.node_count()];
    let mut trails  = vec![Trail { city: from, parent: None }];

    // Min-heap on (cost, push order).  The trail index grows with every push,
    // so it doubles as the FIFO tie-breaker.
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();
    heap.push(Reverse((0, 0)));

    // Destinations already expanded from the current city; only the first
    // link to each destination counts.
    let mut seen: Vec<CityId> = Vec::new();

    while let Some(Reverse((cost, trail_idx))) = heap.pop() {
        let city = trails[trail_idx].city;
        if city == to {
            return Ok(ShortestPath { cost, cities: reconstruct(&trails, trail_idx) });
        }
        if settled[city.index()] {
            continue;
        }
        settled[city.index()] = true;

        seen.clear();
        for edge in network.out_edges(city)? {
            let neighbor = network.edge_to(edge);
            if settled[neighbor.index()] || seen.contains(&neighbor) {
                continue;
            }
            seen.push(neighbor);

            let new_cost = cost + u64::from(network.edge_distance(edge));
            trails.push(Trail { city: neighbor, parent: Some(trail_idx) });
            heap.push(Reverse((new_cost, trails.len() - 1)));
        }
    }

    Err(NetworkError::PathNotFound { from, to })
}

fn reconstruct(trails: &[Trail], last: usize) -> Vec<CityId> {
    let mut cities = Vec::new();
    let mut cur = Some(last);
    while let Some(i) = cur {
        cities.push(trails[i].city);
        cur = trails[i].parent;
    }
    cities.reverse();
    cities
}
