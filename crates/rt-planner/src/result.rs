//! The record handed to the presentation layer.

use rt_core::{CityId, Coord};
use rt_network::ShortestPath;

use crate::WalkTermination;

/// How a [`RouteResult`] was produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteKind {
    /// A randomized walk; `route` is the walk itself.
    Tour {
        budget:             u64,
        accumulated_weight: u64,
        termination:        WalkTermination,
    },
    /// Endpoints in opposite regions; `route` equals the shortest path.
    LongHaul,
}

/// One generated route with everything needed to draw and score it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    pub kind: RouteKind,
    /// Cities as generated (walk order for tours).
    pub route: Vec<CityId>,
    /// `route` projected onto map coordinates.
    pub route_coords: Vec<Coord>,
    /// Cheapest path between the first and last city of `route`.
    pub shortest: ShortestPath,
    /// `shortest.cities` projected onto map coordinates.
    pub shortest_coords: Vec<Coord>,
    pub score: u32,
}

impl RouteResult {
    pub fn start(&self) -> CityId {
        self.route[0]
    }

    pub fn end(&self) -> CityId {
        self.route[self.route.len() - 1]
    }

    pub fn shortest_cost(&self) -> u64 {
        self.shortest.cost
    }
}
