//! The two entry points the presentation layer drives.

use tracing::{debug, info};

use rt_core::{CityId, PlannerConfig, PlannerRng, RouteRng};
use rt_network::{NetworkGraph, Router, UniformCostRouter};

use crate::region::{RegionClassifier, RegionGroups};
use crate::walk::plan_route;
use crate::{score, PlannerError, PlannerResult, RouteKind, RouteResult};

/// Produces tour batches and long-haul routes over one network.
///
/// Holds no route state between calls: every call returns owned
/// [`RouteResult`]s and the caller decides what to keep.  The only thing a
/// call changes is the seed stream, so a fixed config seed replays the same
/// sequence of results.
///
/// # Example
///
/// ```rust,ignore
/// let mut generator = RouteGenerator::new(&network, PlannerConfig::default())?;
/// for route in generator.generate_routes(9, 3)? {
///     println!("{} -> {}: {} points", route.start(), route.end(), route.score);
/// }
/// ```
pub struct RouteGenerator<'n, R: Router = UniformCostRouter> {
    network:    &'n NetworkGraph,
    router:     R,
    config:     PlannerConfig,
    classifier: RegionClassifier,
    groups:     RegionGroups,
    rng:        PlannerRng,
}

impl<'n> RouteGenerator<'n> {
    /// Generator using [`UniformCostRouter`].
    pub fn new(network: &'n NetworkGraph, config: PlannerConfig) -> PlannerResult<Self> {
        Self::with_router(network, config, UniformCostRouter)
    }
}

impl<'n, R: Router> RouteGenerator<'n, R> {
    /// Validate `config`, classify the network once, and seed the generator.
    pub fn with_router(network: &'n NetworkGraph, config: PlannerConfig, router: R) -> PlannerResult<Self> {
        config.validate()?;
        if network.is_empty() {
            return Err(PlannerError::EmptyNetwork);
        }
        let classifier = RegionClassifier::new(config.map);
        let groups = classifier.group_nodes(network)?;
        info!(
            cities = network.node_count(),
            regions = groups.len(),
            seed = config.seed,
            "route generator ready"
        );
        Ok(Self {
            network,
            router,
            rng: PlannerRng::new(config.seed),
            config,
            classifier,
            groups,
        })
    }

    pub fn network(&self) -> &NetworkGraph {
        self.network
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn classifier(&self) -> &RegionClassifier {
        &self.classifier
    }

    pub fn groups(&self) -> &RegionGroups {
        &self.groups
    }

    // ── Entry points ──────────────────────────────────────────────────────

    /// `count` tours, each aiming for `target_weight` of track.
    ///
    /// Fails on the first route that cannot be built.  Use
    /// [`generate_route`](Self::generate_route) to handle routes one by one.
    pub fn generate_routes(&mut self, target_weight: u32, count: usize) -> PlannerResult<Vec<RouteResult>> {
        let batch_seed = self.rng.next_seed();
        debug!(target_weight, count, batch_seed, "generating tour batch");
        self.tour_batch(batch_seed, target_weight, count)
    }

    /// [`generate_routes`](Self::generate_routes) with the config defaults.
    pub fn generate_default_routes(&mut self) -> PlannerResult<Vec<RouteResult>> {
        self.generate_routes(self.config.target_weight, self.config.route_count)
    }

    /// A single tour.
    pub fn generate_route(&mut self, target_weight: u32) -> PlannerResult<RouteResult> {
        let mut rng = self.rng.route_rng();
        tour_route(self.network, &self.router, target_weight, &mut rng)
    }

    /// A shortest path between cities in opposite regions.
    pub fn generate_long_route(&mut self) -> PlannerResult<RouteResult> {
        let mut rng = self.rng.route_rng();
        let (start, end) =
            self.groups
                .pick_distant_pair(self.network, self.config.empty_region_policy, &mut rng)?;
        let shortest = self.router.shortest_path(self.network, start, end)?;
        let coords = self.network.coords_of(&shortest.cities)?;
        let points = score(coords[0], coords[coords.len() - 1], shortest.cost, &mut rng);

        Ok(RouteResult {
            kind:            RouteKind::LongHaul,
            route:           shortest.cities.clone(),
            route_coords:    coords.clone(),
            shortest,
            shortest_coords: coords,
            score:           points,
        })
    }

    // ── Batch internals ───────────────────────────────────────────────────

    #[cfg(not(feature = "parallel"))]
    pub(crate) fn tour_batch(&self, batch_seed: u64, target_weight: u32, count: usize) -> PlannerResult<Vec<RouteResult>> {
        (0..count)
            .map(|i| {
                let mut rng = RouteRng::new(batch_seed, i as u64);
                tour_route(self.network, &self.router, target_weight, &mut rng)
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn tour_batch(&self, batch_seed: u64, target_weight: u32, count: usize) -> PlannerResult<Vec<RouteResult>> {
        use rayon::prelude::*;

        (0..count)
            .into_par_iter()
            .map(|i| {
                let mut rng = RouteRng::new(batch_seed, i as u64);
                tour_route(self.network, &self.router, target_weight, &mut rng)
            })
            .collect()
    }
}

/// Walk, route between the walk's endpoints, score.
pub(crate) fn tour_route<R: Router>(
    network: &NetworkGraph,
    router: &R,
    target_weight: u32,
    rng: &mut RouteRng,
) -> PlannerResult<RouteResult> {
    let walk = plan_route(network, target_weight, rng)?;
    let (start, end): (CityId, CityId) = (walk.start(), walk.end());
    let shortest = router.shortest_path(network, start, end)?;

    let route_coords = network.coords_of(&walk.cities)?;
    let shortest_coords = network.coords_of(&shortest.cities)?;
    let points = score(route_coords[0], route_coords[route_coords.len() - 1], shortest.cost, rng);

    Ok(RouteResult {
        kind: RouteKind::Tour {
            budget:             walk.budget,
            accumulated_weight: walk.accumulated_weight,
            termination:        walk.termination,
        },
        route: walk.cities,
        route_coords,
        shortest,
        shortest_coords,
        score: points,
    })
}
