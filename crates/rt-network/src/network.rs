//! Rail network representation and builder.
//!
//! # Data layout
//!
//! Outgoing links are stored in **Compressed Sparse Row (CSR)** format.
//! Given a `CityId c`, its outgoing links occupy the `EdgeId` range:
//!
//! ```text
//! node_out_start[c] .. node_out_start[c+1]
//! ```
//!
//! Within that range links keep the order in which they were added for `c`.
//! Several queries depend on this: `neighbors` reports insertion order and
//! `edge_cost` answers with the first matching link.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a map coordinate to the nearest `CityId`.

use std::ops::Range;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;
use tracing::debug;

use rt_core::{CityId, Coord, EdgeId};

use crate::{NetworkError, NetworkResult};

// ── R-tree city entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct CityEntry {
    point: [f64; 2], // [x, y]
    id:    CityId,
}

impl RTreeObject for CityEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CityEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── NetworkGraph ──────────────────────────────────────────────────────────────

/// Directed rail graph in CSR format plus a spatial index over city positions.
///
/// Immutable once built, so a shared `&NetworkGraph` can be read from any
/// number of threads.  Construct with [`NetworkBuilder`] or the CSV loader.
pub struct NetworkGraph {
    // ── City data (indexed by CityId) ─────────────────────────────────────
    city_name:  Vec<String>,
    city_pos:   Vec<Coord>,
    name_index: FxHashMap<String, CityId>,

    // ── CSR link adjacency ────────────────────────────────────────────────
    /// Length = `city_count + 1`.
    node_out_start: Vec<u32>,

    // ── Link data (indexed by EdgeId) ─────────────────────────────────────
    edge_from:     Vec<CityId>,
    edge_to:       Vec<CityId>,
    edge_distance: Vec<u32>,
    /// Secondary weight carried from the input data.  Zero for the shipped
    /// network; never interpreted here.
    edge_reserved: Vec<u32>,

    spatial_idx: RTree<CityEntry>,
}

impl NetworkGraph {
    /// A network with no cities.  Every query against it fails with
    /// [`NetworkError::UnknownNode`].
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Vec::new())
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.city_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.city_pos.is_empty()
    }

    /// All city ids in insertion order.
    pub fn cities(&self) -> impl Iterator<Item = CityId> + '_ {
        (0..self.city_pos.len()).map(|i| CityId(i as u32))
    }

    #[inline]
    pub fn contains(&self, city: CityId) -> bool {
        city.index() < self.city_pos.len()
    }

    #[inline]
    fn check(&self, city: CityId) -> NetworkResult<()> {
        if self.contains(city) { Ok(()) } else { Err(NetworkError::UnknownNode(city)) }
    }

    // ── City lookups ──────────────────────────────────────────────────────

    /// Resolve a city name to its id.
    pub fn city(&self, name: &str) -> NetworkResult<CityId> {
        self.name_index
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::UnknownCity(name.to_owned()))
    }

    pub fn name(&self, city: CityId) -> NetworkResult<&str> {
        self.check(city)?;
        Ok(&self.city_name[city.index()])
    }

    pub fn coord(&self, city: CityId) -> NetworkResult<Coord> {
        self.check(city)?;
        Ok(self.city_pos[city.index()])
    }

    /// Project a sequence of cities onto their coordinates.
    pub fn coords_of(&self, path: &[CityId]) -> NetworkResult<Vec<Coord>> {
        path.iter().map(|&c| self.coord(c)).collect()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// The contiguous `EdgeId` range of `city`'s outgoing links, in insertion
    /// order.
    pub fn out_edges(&self, city: CityId) -> NetworkResult<impl Iterator<Item = EdgeId> + '_> {
        Ok(self.out_range(city)?.map(|i| EdgeId(i as u32)))
    }

    /// Number of outgoing links of `city`.
    pub fn out_degree(&self, city: CityId) -> NetworkResult<usize> {
        Ok(self.out_range(city)?.len())
    }

    /// Destinations of `city`'s outgoing links in insertion order.
    ///
    /// Parallel links to the same destination are reported once per link.
    pub fn neighbors(&self, city: CityId) -> NetworkResult<impl Iterator<Item = CityId> + '_> {
        Ok(self.out_range(city)?.map(|i| self.edge_to[i]))
    }

    /// Distance of the first link (in insertion order) from `from` to `to`.
    pub fn edge_cost(&self, from: CityId, to: CityId) -> NetworkResult<u32> {
        self.check(to)?;
        self.out_range(from)?
            .find(|&i| self.edge_to[i] == to)
            .map(|i| self.edge_distance[i])
            .ok_or(NetworkError::NoEdge { from, to })
    }

    #[inline]
    fn out_range(&self, city: CityId) -> NetworkResult<Range<usize>> {
        self.check(city)?;
        let start = self.node_out_start[city.index()] as usize;
        let end   = self.node_out_start[city.index() + 1] as usize;
        Ok(start..end)
    }

    // ── Link accessors ────────────────────────────────────────────────────
    //
    // `EdgeId`s come from `out_edges` on this same network, so these index
    // directly.

    #[inline]
    pub fn edge_from(&self, edge: EdgeId) -> CityId {
        self.edge_from[edge.index()]
    }

    #[inline]
    pub fn edge_to(&self, edge: EdgeId) -> CityId {
        self.edge_to[edge.index()]
    }

    #[inline]
    pub fn edge_distance(&self, edge: EdgeId) -> u32 {
        self.edge_distance[edge.index()]
    }

    #[inline]
    pub fn edge_reserved(&self, edge: EdgeId) -> u32 {
        self.edge_reserved[edge.index()]
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The city closest to `pos`.  `None` only for an empty network.
    pub fn nearest_city(&self, pos: Coord) -> Option<CityId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x as f64, pos.y as f64])
            .map(|e| e.id)
    }

    /// The city closest to `pos` other than `exclude`.
    pub fn nearest_city_excluding(&self, pos: Coord, exclude: CityId) -> Option<CityId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.x as f64, pos.y as f64])
            .map(|e| e.id)
            .find(|&id| id != exclude)
    }

    // ── Construction ──────────────────────────────────────────────────────

    fn from_parts(names: Vec<String>, positions: Vec<Coord>, links: Vec<ResolvedLink>) -> Self {
        let city_count = positions.len();

        // Stable sort: links of one city keep their insertion order.
        let mut links = links;
        links.sort_by_key(|l| l.from.0);

        let edge_from:     Vec<CityId> = links.iter().map(|l| l.from).collect();
        let edge_to:       Vec<CityId> = links.iter().map(|l| l.to).collect();
        let edge_distance: Vec<u32>    = links.iter().map(|l| l.distance).collect();
        let edge_reserved: Vec<u32>    = links.iter().map(|l| l.reserved).collect();

        let mut node_out_start = vec![0u32; city_count + 1];
        for l in &links {
            node_out_start[l.from.index() + 1] += 1;
        }
        for i in 1..=city_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[city_count] as usize, links.len());

        let entries: Vec<CityEntry> = positions
            .iter()
            .enumerate()
            .map(|(i, pos)| CityEntry {
                point: [pos.x as f64, pos.y as f64],
                id:    CityId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let name_index = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), CityId(i as u32)))
            .collect();

        NetworkGraph {
            city_name: names,
            city_pos: positions,
            name_index,
            node_out_start,
            edge_from,
            edge_to,
            edge_distance,
            edge_reserved,
            spatial_idx,
        }
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`NetworkGraph`] incrementally, then call [`build`](Self::build).
///
/// Links name their destination by city name, so a city may link to one that
/// is added later.  `build()` resolves the names and rejects the network if
/// any link is dangling or has zero distance.
///
/// # Example
///
/// ```
/// use rt_core::Coord;
/// use rt_network::NetworkBuilder;
///
/// let mut b = NetworkBuilder::new();
/// b.add_city("london", Coord::new(254, 213), [("amsterdam", 2, 0)]).unwrap();
/// b.add_city("amsterdam", Coord::new(371, 224), [("london", 2, 0)]).unwrap();
/// let net = b.build().unwrap();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2);
/// ```
pub struct NetworkBuilder {
    names:      Vec<String>,
    positions:  Vec<Coord>,
    name_index: FxHashMap<String, CityId>,
    raw_links:  Vec<RawLink>,
}

struct RawLink {
    from:     CityId,
    to:       String,
    distance: u32,
    reserved: u32,
}

struct ResolvedLink {
    from:     CityId,
    to:       CityId,
    distance: u32,
    reserved: u32,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self {
            names:      Vec::new(),
            positions:  Vec::new(),
            name_index: FxHashMap::default(),
            raw_links:  Vec::new(),
        }
    }

    /// Add a city with its outgoing links `(neighbor, distance, reserved)`
    /// and return its `CityId` (sequential from 0).
    pub fn add_city<S, I>(&mut self, name: &str, pos: Coord, links: I) -> NetworkResult<CityId>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, u32, u32)>,
    {
        if self.name_index.contains_key(name) {
            return Err(NetworkError::DuplicateCity(name.to_owned()));
        }
        let id = CityId(self.positions.len() as u32);
        self.names.push(name.to_owned());
        self.positions.push(pos);
        self.name_index.insert(name.to_owned(), id);

        for (to, distance, reserved) in links {
            self.raw_links.push(RawLink { from: id, to: to.into(), distance, reserved });
        }
        Ok(id)
    }

    /// Add a **directed** link from an existing city.  `to` is resolved at
    /// [`build`](Self::build).
    pub fn add_link(&mut self, from: CityId, to: &str, distance: u32, reserved: u32) -> NetworkResult<()> {
        if from.index() >= self.names.len() {
            return Err(NetworkError::UnknownNode(from));
        }
        self.raw_links.push(RawLink { from, to: to.to_owned(), distance, reserved });
        Ok(())
    }

    /// Convenience: add links in **both directions** with equal distance.
    ///
    /// Both ids must come from this builder, otherwise
    /// [`NetworkError::UnknownNode`].
    pub fn add_rail(&mut self, a: CityId, b: CityId, distance: u32) -> NetworkResult<()> {
        let name_a = self.names.get(a.index()).ok_or(NetworkError::UnknownNode(a))?.clone();
        let name_b = self.names.get(b.index()).ok_or(NetworkError::UnknownNode(b))?.clone();
        self.add_link(a, &name_b, distance, 0)?;
        self.add_link(b, &name_a, distance, 0)
    }

    pub fn node_count(&self) -> usize { self.positions.len() }
    pub fn edge_count(&self) -> usize { self.raw_links.len() }

    /// Validate links and produce a [`NetworkGraph`].
    pub fn build(self) -> NetworkResult<NetworkGraph> {
        let mut links = Vec::with_capacity(self.raw_links.len());
        for raw in self.raw_links {
            let from_name = &self.names[raw.from.index()];
            let Some(&to) = self.name_index.get(&raw.to) else {
                return Err(NetworkError::DanglingEdge { from: from_name.clone(), to: raw.to });
            };
            if raw.distance == 0 {
                return Err(NetworkError::ZeroWeight { from: from_name.clone(), to: raw.to });
            }
            links.push(ResolvedLink {
                from:     raw.from,
                to,
                distance: raw.distance,
                reserved: raw.reserved,
            });
        }

        debug!(cities = self.positions.len(), links = links.len(), "built rail network");
        Ok(NetworkGraph::from_parts(self.names, self.positions, links))
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
