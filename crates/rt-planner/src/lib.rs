//! `rt-planner`: tour and long-haul route generation over a rail network.
//!
//! # Pipeline
//!
//! ```text
//! generate_routes(target, count):
//!   for each route:  plan_route ─▶ shortest_path(first, last) ─▶ score
//!
//! generate_long_route():
//!   pick_distant_pair ─▶ shortest_path(start, end) ─▶ score
//! ```
//!
//! Every step of one route draws from that route's own `RouteRng`, derived
//! from the generator seed and the route's index in its batch.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Computes route batches on Rayon's thread pool.         |
//! | `serde`    | Derives `Serialize`/`Deserialize` on result types.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rt_core::PlannerConfig;
//! use rt_planner::RouteGenerator;
//!
//! let mut generator = RouteGenerator::new(&network, PlannerConfig::default())?;
//! let tours = generator.generate_routes(9, 3)?;
//! let long = generator.generate_long_route()?;
//! ```

pub mod error;
pub mod generator;
pub mod region;
pub mod result;
pub mod score;
pub mod walk;


pub use error::{PlannerError, PlannerResult};
pub use generator::RouteGenerator;
pub use region::{RegionClassifier, RegionGroups, RegionKey, Side, REGION_TESTS};
pub use result::{RouteKind, RouteResult};
pub use score::{score, score_with_bonus};
pub use walk::{plan_route, PlannedWalk, WalkTermination, BUDGET_SLACK, MAX_EDGE_SAMPLES};
