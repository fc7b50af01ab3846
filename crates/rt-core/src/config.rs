//! Route generator configuration.

use crate::{MapBounds, RtError, RtResult};

/// What `pick_distant_pair` does when the region opposite to the chosen one
/// holds no city.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EmptyRegionPolicy {
    /// Report `EmptyRegion` immediately.
    Fail,
    /// Try the remaining populated regions in random order; report
    /// `EmptyRegion` only if none of them has a populated opposite.
    #[default]
    RetryOtherKeys,
    /// Keep the chosen start city and end at the city nearest to the start's
    /// reflection through the map centre.
    MirrorPoint,
}

/// Top-level generator configuration.
///
/// Typically loaded from a JSON file by the application crate (feature
/// `serde`) and passed to `RouteGenerator::new`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Master RNG seed.  The same seed and the same call sequence always
    /// produce identical routes.
    pub seed: u64,

    /// Map area the region lines span.
    pub map: MapBounds,

    /// Walk budget used when the caller does not pass one.
    pub target_weight: u32,

    /// Number of tour routes per batch when the caller does not pass one.
    pub route_count: usize,

    /// Fallback for an empty opposite region.
    pub empty_region_policy: EmptyRegionPolicy,
}

impl PlannerConfig {
    /// Reject configurations the classifier cannot work with.
    pub fn validate(&self) -> RtResult<()> {
        if self.map.width == 0 || self.map.height == 0 {
            return Err(RtError::Config(format!(
                "map bounds must be non-empty, got {}x{}",
                self.map.width, self.map.height
            )));
        }
        if self.map.width > i32::MAX as u32 || self.map.height > i32::MAX as u32 {
            return Err(RtError::Config("map bounds exceed the i32 coordinate range".into()));
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            seed:                42,
            map:                 MapBounds::EUROPE,
            target_weight:       9,
            route_count:         3,
            empty_region_policy: EmptyRegionPolicy::default(),
        }
    }
}
