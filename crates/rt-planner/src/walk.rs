//! Randomized bounded walks ("tours").
//!
//! A walk starts at a uniformly random city and keeps stepping along a
//! randomly sampled outgoing link while budget remains:
//!
//! ```text
//! budget = target_weight + uniform(0..=BUDGET_SLACK)
//! loop:
//!   sample up to MAX_EDGE_SAMPLES links from the last city
//!   accept the first one whose destination is unvisited and whose distance
//!   still fits in budget - accumulated
//! ```
//!
//! There is no backtracking.  Before sampling, each step checks whether any
//! usable link exists at all, so a walk that has simply run out of places to
//! go ends with [`WalkTermination::DeadEnd`] or
//! [`WalkTermination::BudgetExhausted`].  Only when usable links exist and
//! every sample misses them does the walk end as
//! [`WalkTermination::StepLimitExceeded`].

use tracing::debug;

use rt_core::{CityId, EdgeId, RouteRng};
use rt_network::NetworkGraph;

use crate::{PlannerError, PlannerResult};

/// Upper bound on link samples per step before the walk gives up.
pub const MAX_EDGE_SAMPLES: usize = 50;

/// Largest random amount added on top of the requested target weight.
pub const BUDGET_SLACK: u64 = 3;

/// Why a walk stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WalkTermination {
    /// Accumulated weight equals the budget.
    BudgetReached,
    /// Unvisited neighbors remain, but every link to them is longer than the
    /// budget left.
    BudgetExhausted,
    /// Usable links existed, but `MAX_EDGE_SAMPLES` samples missed them all.
    StepLimitExceeded,
    /// No outgoing link of the last city leads to an unvisited city.
    DeadEnd,
}

impl WalkTermination {
    /// `true` if sampling gave up while the walk could still have continued.
    pub fn is_truncated(self) -> bool {
        matches!(self, WalkTermination::StepLimitExceeded)
    }
}

/// Output of [`plan_route`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedWalk {
    /// Visited cities in order.  Never empty, never repeats a city.
    pub cities: Vec<CityId>,
    /// Sum of the distances of the traversed links.
    pub accumulated_weight: u64,
    /// Budget drawn for this walk (`target_weight + slack`).
    pub budget: u64,
    pub termination: WalkTermination,
}

impl PlannedWalk {
    pub fn start(&self) -> CityId {
        self.cities[0]
    }

    pub fn end(&self) -> CityId {
        self.cities[self.cities.len() - 1]
    }
}

/// Generate one randomized walk of at most `target_weight + BUDGET_SLACK`.
///
/// Fails only for an empty network.  A short walk is a valid result.
pub fn plan_route(
    network: &NetworkGraph,
    target_weight: u32,
    rng: &mut RouteRng,
) -> PlannerResult<PlannedWalk> {
    let city_count = network.node_count();
    if city_count == 0 {
        return Err(PlannerError::EmptyNetwork);
    }

    let start  = CityId(rng.gen_range(0..city_count) as u32);
    let budget = u64::from(target_weight) + rng.gen_range(0..=BUDGET_SLACK);

    let mut visited = vec![false; city_count];
    visited[start.index()] = true;
    let mut cities = vec![start];
    let mut accumulated: u64 = 0;
    let mut links: Vec<EdgeId> = Vec::new();

    let termination = loop {
        if accumulated >= budget {
            break WalkTermination::BudgetReached;
        }
        let current = cities[cities.len() - 1];

        links.clear();
        links.extend(network.out_edges(current)?);

        let remaining = budget - accumulated;
        let usable = |edge: EdgeId| {
            !visited[network.edge_to(edge).index()]
                && u64::from(network.edge_distance(edge)) <= remaining
        };
        if !links.iter().any(|&e| !visited[network.edge_to(e).index()]) {
            break WalkTermination::DeadEnd;
        }
        if !links.iter().any(|&e| usable(e)) {
            break WalkTermination::BudgetExhausted;
        }

        let next = (0..MAX_EDGE_SAMPLES)
            .map(|_| links[rng.gen_range(0..links.len())])
            .find(|&edge| usable(edge));

        let Some(edge) = next else {
            break WalkTermination::StepLimitExceeded;
        };
        let to = network.edge_to(edge);
        visited[to.index()] = true;
        cities.push(to);
        accumulated += u64::from(network.edge_distance(edge));
    };

    debug!(
        start = %start,
        stops = cities.len(),
        accumulated,
        budget,
        ?termination,
        "planned walk"
    );

    Ok(PlannedWalk { cities, accumulated_weight: accumulated, budget, termination })
}
