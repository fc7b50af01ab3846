//! Spatial split of the city set into coarse regions.
//!
//! # Region tests
//!
//! A city's [`RegionKey`] is one [`Side`] per test, in this order:
//!
//! | # | Test                                         | `L` when                 |
//! |---|----------------------------------------------|--------------------------|
//! | 0 | directed line (0, 0) → (W, H)                | cross product < 0        |
//! | 1 | directed line (0, H/2) → (W, H/2)            | cross product < 0        |
//! | 2 | directed line (0, H) → (W, 0)                | cross product < 0        |
//! | 3 | vertical midpoint x = W/2                    | x < W/2                  |
//!
//! where the cross product is `(x2 - x1)(py - y1) - (y2 - y1)(px - x1)`.
//! Points exactly on a line (cross product 0, or x == W/2) are `R`.
//!
//! Flipping every symbol gives the [`opposite`](RegionKey::opposite) region,
//! the pairing used to pick long-haul endpoints.  It is a structural
//! opposite, not a guaranteed maximum distance.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use rt_core::{CityId, Coord, EmptyRegionPolicy, MapBounds, RouteRng};
use rt_network::NetworkGraph;

use crate::{PlannerError, PlannerResult};

/// Number of separating tests, and so the length of every [`RegionKey`].
pub const REGION_TESTS: usize = 4;

// ── Side / RegionKey ──────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    L,
    R,
}

impl Side {
    #[inline]
    pub fn flip(self) -> Side {
        match self {
            Side::L => Side::R,
            Side::R => Side::L,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Side::L => 'L',
            Side::R => 'R',
        }
    }
}

/// Which side of each separating test a coordinate falls on.
///
/// Displays and parses as a four-letter string such as `"RLLL"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionKey(pub [Side; REGION_TESTS]);

impl RegionKey {
    /// Flip every symbol.
    pub fn opposite(self) -> RegionKey {
        RegionKey(self.0.map(Side::flip))
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for side in self.0 {
            write!(f, "{}", side.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for RegionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sides = [Side::L; REGION_TESTS];
        let mut count = 0;
        for ch in s.chars() {
            if count == REGION_TESTS {
                return Err(format!("region key {s:?} longer than {REGION_TESTS}"));
            }
            sides[count] = match ch {
                'L' => Side::L,
                'R' => Side::R,
                other => return Err(format!("invalid side {other:?} in region key {s:?}")),
            };
            count += 1;
        }
        if count != REGION_TESTS {
            return Err(format!("region key {s:?} shorter than {REGION_TESTS}"));
        }
        Ok(RegionKey(sides))
    }
}

// ── RegionClassifier ──────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
struct SeparatingLine {
    start: (f64, f64),
    end:   (f64, f64),
}

impl SeparatingLine {
    fn side_of(&self, p: Coord) -> Side {
        let (x1, y1) = self.start;
        let (x2, y2) = self.end;
        let (px, py) = (p.x as f64, p.y as f64);
        let cross = (x2 - x1) * (py - y1) - (y2 - y1) * (px - x1);
        if cross < 0.0 { Side::L } else { Side::R }
    }
}

/// Assigns coordinates to [`RegionKey`]s for a given map size.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionClassifier {
    bounds: MapBounds,
    lines:  [SeparatingLine; REGION_TESTS - 1],
    mid_x:  f64,
}

impl RegionClassifier {
    pub fn new(bounds: MapBounds) -> Self {
        let w = bounds.width as f64;
        let h = bounds.height as f64;
        Self {
            bounds,
            lines: [
                SeparatingLine { start: (0.0, 0.0), end: (w, h) },
                SeparatingLine { start: (0.0, bounds.mid_y()), end: (w, bounds.mid_y()) },
                SeparatingLine { start: (0.0, h), end: (w, 0.0) },
            ],
            mid_x: bounds.mid_x(),
        }
    }

    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    /// Region of a single coordinate.  Pure: equal inputs give equal keys.
    pub fn classify(&self, pos: Coord) -> RegionKey {
        let mut sides = [Side::R; REGION_TESTS];
        for (side, line) in sides.iter_mut().zip(&self.lines) {
            *side = line.side_of(pos);
        }
        sides[REGION_TESTS - 1] = if (pos.x as f64) < self.mid_x { Side::L } else { Side::R };
        RegionKey(sides)
    }

    /// Partition every city of `network` by region.
    pub fn group_nodes(&self, network: &NetworkGraph) -> PlannerResult<RegionGroups> {
        let mut groups: BTreeMap<RegionKey, Vec<CityId>> = BTreeMap::new();
        for city in network.cities() {
            let key = self.classify(network.coord(city)?);
            groups.entry(key).or_default().push(city);
        }
        Ok(RegionGroups { groups, bounds: self.bounds })
    }

    /// Group the network and pick a long-haul endpoint pair in one call.
    ///
    /// [`RouteGenerator`](crate::RouteGenerator) caches the grouping instead.
    pub fn pick_distant_pair(
        &self,
        network: &NetworkGraph,
        policy: EmptyRegionPolicy,
        rng: &mut RouteRng,
    ) -> PlannerResult<(CityId, CityId)> {
        self.group_nodes(network)?.pick_distant_pair(network, policy, rng)
    }
}

// ── RegionGroups ──────────────────────────────────────────────────────────────

/// Cities grouped by [`RegionKey`].  Only populated keys are present and
/// iteration is in key order, so a seeded pick is reproducible.
#[derive(Clone, Debug, Default)]
pub struct RegionGroups {
    groups: BTreeMap<RegionKey, Vec<CityId>>,
    /// Needed by [`EmptyRegionPolicy::MirrorPoint`].
    bounds: MapBounds,
}

impl RegionGroups {
    pub fn get(&self, key: RegionKey) -> &[CityId] {
        self.groups.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = RegionKey> + '_ {
        self.groups.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn has_opposite(&self, key: RegionKey) -> bool {
        !self.get(key.opposite()).is_empty()
    }

    /// Pick a start in a uniformly chosen populated region and an end in the
    /// opposite region, applying `policy` when the opposite is empty.
    pub fn pick_distant_pair(
        &self,
        network: &NetworkGraph,
        policy: EmptyRegionPolicy,
        rng: &mut RouteRng,
    ) -> PlannerResult<(CityId, CityId)> {
        let keys: Vec<RegionKey> = self.keys().collect();
        let Some(&key) = rng.choose(&keys) else {
            return Err(PlannerError::EmptyNetwork);
        };

        let key = if self.has_opposite(key) {
            key
        } else {
            match policy {
                EmptyRegionPolicy::Fail => {
                    return Err(PlannerError::EmptyRegion { key, opposite: key.opposite() });
                }
                EmptyRegionPolicy::RetryOtherKeys => {
                    let mut rest: Vec<RegionKey> = keys.into_iter().filter(|&k| k != key).collect();
                    rng.shuffle(&mut rest);
                    match rest.into_iter().find(|&k| self.has_opposite(k)) {
                        Some(k) => {
                            warn!(%key, retry = %k, "opposite region empty, retrying with another region");
                            k
                        }
                        None => {
                            return Err(PlannerError::EmptyRegion { key, opposite: key.opposite() });
                        }
                    }
                }
                EmptyRegionPolicy::MirrorPoint => {
                    return self.pick_mirrored(network, key, rng);
                }
            }
        };

        let (Some(&start), Some(&end)) = (
            rng.choose(self.get(key)),
            rng.choose(self.get(key.opposite())),
        ) else {
            return Err(PlannerError::EmptyRegion { key, opposite: key.opposite() });
        };
        debug!(%key, start = %start, end = %end, "picked distant pair");
        Ok((start, end))
    }

    fn pick_mirrored(
        &self,
        network: &NetworkGraph,
        key: RegionKey,
        rng: &mut RouteRng,
    ) -> PlannerResult<(CityId, CityId)> {
        let empty = PlannerError::EmptyRegion { key, opposite: key.opposite() };
        let Some(&start) = rng.choose(self.get(key)) else {
            return Err(empty);
        };
        let target = self.bounds.mirror(network.coord(start)?);
        match network.nearest_city_excluding(target, start) {
            Some(end) => {
                warn!(%key, start = %start, end = %end, "opposite region empty, using mirrored point");
                Ok((start, end))
            }
            None => Err(empty),
        }
    }
}
