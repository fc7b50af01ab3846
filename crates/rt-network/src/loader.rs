//! CSV network loader.
//!
//! # CSV format
//!
//! One row per directed link.  A city with no outgoing links gets a single
//! row with the three link columns left empty.
//!
//! ```csv
//! city,x,y,neighbor,distance,reserved
//! edinburgh,173,34,london,4,0
//! london,254,213,edinburgh,4,0
//! london,254,213,amsterdam,2,
//! amsterdam,371,224,london,2,0
//! ```
//!
//! Cities get their `CityId` in order of first appearance.  Links of a city
//! keep their row order.  `reserved` defaults to 0 when empty.  All rows of a
//! city must repeat the same coordinates.

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::info;

use rt_core::Coord;

use crate::{NetworkBuilder, NetworkError, NetworkGraph, NetworkResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LinkRecord {
    city:     String,
    x:        i32,
    y:        i32,
    neighbor: Option<String>,
    distance: Option<u32>,
    reserved: Option<u32>,
}

struct PendingCity {
    name:  String,
    pos:   Coord,
    links: Vec<(String, u32, u32)>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`NetworkGraph`] from a CSV file.
pub fn load_network_csv(path: &Path) -> NetworkResult<NetworkGraph> {
    let file = std::fs::File::open(path)?;
    let net = load_network_reader(file)?;
    info!(
        path = %path.display(),
        cities = net.node_count(),
        links = net.edge_count(),
        "loaded rail network"
    );
    Ok(net)
}

/// Like [`load_network_csv`] but accepts any `Read` source.
pub fn load_network_reader<R: Read>(reader: R) -> NetworkResult<NetworkGraph> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut pending: Vec<PendingCity> = Vec::new();
    let mut by_name: FxHashMap<String, usize> = FxHashMap::default();

    for (line, result) in csv_reader.deserialize::<LinkRecord>().enumerate() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        let pos = Coord::new(row.x, row.y);

        let idx = match by_name.get(&row.city) {
            Some(&idx) => {
                if pending[idx].pos != pos {
                    return Err(NetworkError::Parse(format!(
                        "row {}: city {:?} at {pos}, earlier rows put it at {}",
                        line + 1,
                        row.city,
                        pending[idx].pos
                    )));
                }
                idx
            }
            None => {
                by_name.insert(row.city.clone(), pending.len());
                pending.push(PendingCity { name: row.city.clone(), pos, links: Vec::new() });
                pending.len() - 1
            }
        };

        match (row.neighbor.filter(|n| !n.trim().is_empty()), row.distance) {
            (Some(neighbor), Some(distance)) => {
                pending[idx]
                    .links
                    .push((neighbor.trim().to_owned(), distance, row.reserved.unwrap_or(0)));
            }
            (None, None) => {}
            (Some(neighbor), None) => {
                return Err(NetworkError::Parse(format!(
                    "row {}: link {:?} -> {neighbor:?} has no distance",
                    line + 1,
                    row.city
                )));
            }
            (None, Some(_)) => {
                return Err(NetworkError::Parse(format!(
                    "row {}: distance given for {:?} without a neighbor",
                    line + 1,
                    row.city
                )));
            }
        }
    }

    let mut builder = NetworkBuilder::new();
    for city in pending {
        builder.add_city(&city.name, city.pos, city.links)?;
    }
    builder.build()
}
