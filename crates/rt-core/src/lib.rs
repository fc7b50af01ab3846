//! `rt-core`: foundational types for the `rail_tour` route generator.
//!
//! This crate is a dependency of every other `rt-*` crate.  It has no `rt-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `CityId`, `EdgeId`                                     |
//! | [`geo`]    | `Coord`, `MapBounds`                                   |
//! | [`rng`]    | `RouteRng` (per-route), `PlannerRng` (generator-level) |
//! | [`config`] | `PlannerConfig`, `EmptyRegionPolicy`                   |
//! | [`error`]  | `RtError`, `RtResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EmptyRegionPolicy, PlannerConfig};
pub use error::{RtError, RtResult};
pub use geo::{Coord, MapBounds};
pub use ids::{CityId, EdgeId};
pub use rng::{PlannerRng, RouteRng};
