//! Unit tests for rt-network.
//!
//! All tests use hand-crafted networks so they run without any data file.

#[cfg(test)]
mod helpers {
    use rt_core::{CityId, Coord};
    use crate::{NetworkBuilder, NetworkGraph};

    pub const NO_LINKS: [(&str, u32, u32); 0] = [];

    /// A–B(2)–C(3) chain with symmetric links.
    pub fn chain() -> (NetworkGraph, [CityId; 3]) {
        let mut b = NetworkBuilder::new();
        let a = b.add_city("a", Coord::new(0, 0), [("b", 2, 0)]).unwrap();
        let bb = b.add_city("b", Coord::new(10, 0), [("a", 2, 0), ("c", 3, 0)]).unwrap();
        let c = b.add_city("c", Coord::new(20, 0), [("b", 3, 0)]).unwrap();
        (b.build().unwrap(), [a, bb, c])
    }

    /// Small diamond with a cheap detour:
    ///
    /// ```text
    ///   0 ──1── 1 ──1── 2
    ///   │               │
    ///   5               1
    ///   │               │
    ///   3 ──────1────── 4
    /// ```
    ///
    /// Cheapest 0→4 is 0→1→2→4 (cost 3); 0→3→4 costs 6.
    pub fn diamond() -> (NetworkGraph, [CityId; 5]) {
        let mut b = NetworkBuilder::new();
        let n0 = b.add_city("n0", Coord::new(0, 0), NO_LINKS).unwrap();
        let n1 = b.add_city("n1", Coord::new(10, 0), NO_LINKS).unwrap();
        let n2 = b.add_city("n2", Coord::new(20, 0), NO_LINKS).unwrap();
        let n3 = b.add_city("n3", Coord::new(0, 10), NO_LINKS).unwrap();
        let n4 = b.add_city("n4", Coord::new(20, 10), NO_LINKS).unwrap();
        b.add_rail(n0, n1, 1).unwrap();
        b.add_rail(n1, n2, 1).unwrap();
        b.add_rail(n2, n4, 1).unwrap();
        b.add_rail(n0, n3, 5).unwrap();
        b.add_rail(n3, n4, 1).unwrap();
        (b.build().unwrap(), [n0, n1, n2, n3, n4])
    }

    /// Sum the first-matching link cost along `path`.
    pub fn path_cost(net: &NetworkGraph, path: &[CityId]) -> u64 {
        path.windows(2)
            .map(|w| u64::from(net.edge_cost(w[0], w[1]).unwrap()))
            .sum()
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use rt_core::{CityId, Coord};
    use crate::{NetworkBuilder, NetworkError, NetworkGraph};
    use super::helpers::NO_LINKS;

    #[test]
    fn empty_build() {
        let net = NetworkBuilder::new().build().unwrap();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert!(NetworkGraph::empty().is_empty());
    }

    #[test]
    fn forward_references_resolve() {
        let mut b = NetworkBuilder::new();
        b.add_city("x", Coord::new(0, 0), [("y", 4, 0)]).unwrap();
        b.add_city("y", Coord::new(1, 1), [("x", 4, 0)]).unwrap();
        let net = b.build().unwrap();
        let x = net.city("x").unwrap();
        let y = net.city("y").unwrap();
        assert_eq!(net.edge_cost(x, y).unwrap(), 4);
        assert_eq!(net.edge_cost(y, x).unwrap(), 4);
    }

    #[test]
    fn dangling_link_rejected() {
        let mut b = NetworkBuilder::new();
        b.add_city("x", Coord::new(0, 0), [("nowhere", 1, 0)]).unwrap();
        match b.build() {
            Err(NetworkError::DanglingEdge { from, to }) => {
                assert_eq!(from, "x");
                assert_eq!(to, "nowhere");
            }
            other => panic!("expected DanglingEdge, got {:?}", other.err()),
        }
    }

    #[test]
    fn duplicate_city_rejected() {
        let mut b = NetworkBuilder::new();
        b.add_city("x", Coord::new(0, 0), NO_LINKS).unwrap();
        let dup = b.add_city("x", Coord::new(5, 5), NO_LINKS);
        assert!(matches!(dup, Err(NetworkError::DuplicateCity(_))));
    }

    #[test]
    fn zero_distance_rejected() {
        let mut b = NetworkBuilder::new();
        b.add_city("x", Coord::new(0, 0), [("y", 0, 0)]).unwrap();
        b.add_city("y", Coord::new(1, 0), NO_LINKS).unwrap();
        assert!(matches!(b.build(), Err(NetworkError::ZeroWeight { .. })));
    }

    #[test]
    fn neighbors_keep_insertion_order() {
        let mut b = NetworkBuilder::new();
        let hub = b.add_city("hub", Coord::new(0, 0), [("c", 1, 0), ("a", 1, 0)]).unwrap();
        b.add_city("a", Coord::new(1, 0), NO_LINKS).unwrap();
        b.add_city("c", Coord::new(2, 0), NO_LINKS).unwrap();
        // Added after the other cities; must still come last for `hub`.
        b.add_link(hub, "a", 7, 0).unwrap();
        let net = b.build().unwrap();

        let names: Vec<&str> = net
            .neighbors(hub)
            .unwrap()
            .map(|c| net.name(c).unwrap())
            .collect();
        assert_eq!(names, ["c", "a", "a"]);
        assert_eq!(net.out_degree(hub).unwrap(), 3);
    }

    #[test]
    fn foreign_ids_rejected_by_link_helpers() {
        let mut b = NetworkBuilder::new();
        let x = b.add_city("x", Coord::new(0, 0), NO_LINKS).unwrap();
        let stranger = CityId(5);

        assert!(matches!(b.add_rail(x, stranger, 1), Err(NetworkError::UnknownNode(id)) if id == stranger));
        assert!(matches!(b.add_rail(stranger, x, 1), Err(NetworkError::UnknownNode(id)) if id == stranger));
        assert!(matches!(b.add_link(stranger, "x", 1, 0), Err(NetworkError::UnknownNode(_))));
        // Nothing was recorded by the failed calls.
        assert_eq!(b.edge_count(), 0);

        b.add_rail(x, x, 2).unwrap();
        assert_eq!(b.edge_count(), 2);
        assert_eq!(b.build().unwrap().edge_count(), 2);
    }

    #[test]
    fn edge_cost_uses_first_matching_link() {
        let mut b = NetworkBuilder::new();
        let x = b.add_city("x", Coord::new(0, 0), [("y", 9, 0), ("y", 2, 0)]).unwrap();
        let y = b.add_city("y", Coord::new(1, 0), NO_LINKS).unwrap();
        let net = b.build().unwrap();
        assert_eq!(net.edge_cost(x, y).unwrap(), 9);
    }

    #[test]
    fn missing_link_and_unknown_city() {
        let (net, [a, _, c]) = super::helpers::chain();
        assert!(matches!(net.edge_cost(a, c), Err(NetworkError::NoEdge { .. })));
        assert!(matches!(net.neighbors(CityId(99)).err(), Some(NetworkError::UnknownNode(_))));
        assert!(matches!(net.coord(CityId(99)), Err(NetworkError::UnknownNode(_))));
        assert!(matches!(net.city("atlantis"), Err(NetworkError::UnknownCity(_))));
    }

    #[test]
    fn reserved_weight_carried_through() {
        let mut b = NetworkBuilder::new();
        let x = b.add_city("x", Coord::new(0, 0), [("y", 3, 17)]).unwrap();
        b.add_city("y", Coord::new(1, 0), NO_LINKS).unwrap();
        let net = b.build().unwrap();
        let e = net.out_edges(x).unwrap().next().unwrap();
        assert_eq!(net.edge_from(e), x);
        assert_eq!(net.edge_distance(e), 3);
        assert_eq!(net.edge_reserved(e), 17);
    }

    #[test]
    fn coords_projection() {
        let (net, [a, b, c]) = super::helpers::chain();
        let coords = net.coords_of(&[a, b, c]).unwrap();
        assert_eq!(coords, [Coord::new(0, 0), Coord::new(10, 0), Coord::new(20, 0)]);
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use rt_core::Coord;
    use crate::NetworkGraph;

    #[test]
    fn nearest_exact_and_between() {
        let (net, [n0, n1, ..]) = super::helpers::diamond();
        assert_eq!(net.nearest_city(Coord::new(0, 0)), Some(n0));
        assert_eq!(net.nearest_city(Coord::new(4, 0)), Some(n0));
        assert_eq!(net.nearest_city(Coord::new(6, 0)), Some(n1));
    }

    #[test]
    fn excluding_skips_the_city() {
        let (net, [n0, n1, _, n3, _]) = super::helpers::diamond();
        let next = net.nearest_city_excluding(Coord::new(0, 0), n0).unwrap();
        // n1 and n3 are both 10 away.
        assert!(next == n1 || next == n3);
    }

    #[test]
    fn empty_network_returns_none() {
        assert!(NetworkGraph::empty().nearest_city(Coord::new(0, 0)).is_none());
    }
}

// ── Uniform-cost routing ──────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use rt_core::{CityId, Coord};
    use crate::{NetworkBuilder, NetworkError, Router, UniformCostRouter};
    use super::helpers::{path_cost, NO_LINKS};

    #[test]
    fn chain_scenario() {
        let (net, [a, b, c]) = super::helpers::chain();
        let r = UniformCostRouter.shortest_path(&net, a, c).unwrap();
        assert_eq!(r.cost, 5);
        assert_eq!(r.cities, [a, b, c]);

        let back = UniformCostRouter.shortest_path(&net, c, a).unwrap();
        assert_eq!(back.cost, 5);
        assert_eq!(back.cities, [c, b, a]);
    }

    #[test]
    fn trivial_same_city() {
        let (net, nodes) = super::helpers::diamond();
        for n in nodes {
            let r = UniformCostRouter.shortest_path(&net, n, n).unwrap();
            assert!(r.is_trivial());
            assert_eq!(r.cost, 0);
            assert_eq!(r.cities, [n]);
        }
    }

    #[test]
    fn prefers_cheap_detour() {
        let (net, [n0, n1, n2, _, n4]) = super::helpers::diamond();
        let r = UniformCostRouter.shortest_path(&net, n0, n4).unwrap();
        assert_eq!(r.cost, 3);
        assert_eq!(r.cities, [n0, n1, n2, n4]);
        assert_eq!(r.hops(), 3);
        assert_eq!((r.start(), r.end()), (n0, n4));
    }

    #[test]
    fn reported_cost_matches_links_for_all_pairs() {
        let (net, nodes) = super::helpers::diamond();
        for &from in &nodes {
            for &to in &nodes {
                let r = UniformCostRouter.shortest_path(&net, from, to).unwrap();
                assert_eq!(r.start(), from);
                assert_eq!(r.end(), to);
                assert_eq!(path_cost(&net, &r.cities), r.cost);
            }
        }
    }

    #[test]
    fn optimal_against_brute_force() {
        // Every simple path in the diamond, enumerated by DFS.
        fn simple_paths(
            net: &crate::NetworkGraph,
            cur: CityId,
            to: CityId,
            path: &mut Vec<CityId>,
            out: &mut Vec<Vec<CityId>>,
        ) {
            if cur == to {
                out.push(path.clone());
                return;
            }
            let next: Vec<CityId> = net.neighbors(cur).unwrap().collect();
            for n in next {
                if !path.contains(&n) {
                    path.push(n);
                    simple_paths(net, n, to, path, out);
                    path.pop();
                }
            }
        }

        let (net, nodes) = super::helpers::diamond();
        for &from in &nodes {
            for &to in &nodes {
                let mut all = Vec::new();
                simple_paths(&net, from, to, &mut vec![from], &mut all);
                let best = all.iter().map(|p| path_cost(&net, p)).min().unwrap();
                let r = UniformCostRouter.shortest_path(&net, from, to).unwrap();
                assert_eq!(r.cost, best, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn equal_cost_ties_follow_push_order() {
        // s links to l before r; both reach t at cost 2.
        let mut b = NetworkBuilder::new();
        let s = b.add_city("s", Coord::new(0, 0), [("l", 1, 0), ("r", 1, 0)]).unwrap();
        let l = b.add_city("l", Coord::new(1, 1), [("t", 1, 0)]).unwrap();
        b.add_city("r", Coord::new(1, -1), [("t", 1, 0)]).unwrap();
        let t = b.add_city("t", Coord::new(2, 0), NO_LINKS).unwrap();
        let net = b.build().unwrap();

        let r = UniformCostRouter.shortest_path(&net, s, t).unwrap();
        assert_eq!(r.cities, [s, l, t]);
    }

    #[test]
    fn no_route_disconnected() {
        let mut b = NetworkBuilder::new();
        let a = b.add_city("a", Coord::new(0, 0), [("b", 1, 0)]).unwrap();
        b.add_city("b", Coord::new(1, 0), [("a", 1, 0)]).unwrap();
        let island = b.add_city("island", Coord::new(50, 50), NO_LINKS).unwrap();
        let net = b.build().unwrap();

        let result = UniformCostRouter.shortest_path(&net, a, island);
        assert!(matches!(result, Err(NetworkError::PathNotFound { .. })));
    }

    #[test]
    fn directed_one_way_blocks_return() {
        let mut b = NetworkBuilder::new();
        let a = b.add_city("a", Coord::new(0, 0), [("c", 1, 0)]).unwrap();
        let c = b.add_city("c", Coord::new(1, 0), NO_LINKS).unwrap();
        let net = b.build().unwrap();

        assert!(UniformCostRouter.shortest_path(&net, a, c).is_ok());
        assert!(UniformCostRouter.shortest_path(&net, c, a).is_err());
    }

    #[test]
    fn unknown_endpoint_is_an_error() {
        let (net, [a, ..]) = super::helpers::chain();
        let result = UniformCostRouter.shortest_path(&net, a, CityId(42));
        assert!(matches!(result, Err(NetworkError::UnknownNode(CityId(42)))));
    }
}

// ── CSV loading ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use rt_core::Coord;
    use crate::{load_network_csv, load_network_reader, NetworkError};

    const SMALL_CSV: &str = "\
city,x,y,neighbor,distance,reserved
edinburgh,173,34,london,4,0
london,254,213,amsterdam,2,0
london,254,213,edinburgh,4,
amsterdam,371,224,london,2,0
lonely,10,10,,,
";

    #[test]
    fn reads_cities_links_and_isolated_rows() {
        let net = load_network_reader(Cursor::new(SMALL_CSV)).unwrap();
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.edge_count(), 4);

        let london = net.city("london").unwrap();
        let amsterdam = net.city("amsterdam").unwrap();
        let lonely = net.city("lonely").unwrap();
        assert_eq!(net.coord(london).unwrap(), Coord::new(254, 213));
        assert_eq!(net.edge_cost(london, amsterdam).unwrap(), 2);
        assert_eq!(net.out_degree(lonely).unwrap(), 0);

        let order: Vec<&str> = net
            .neighbors(london)
            .unwrap()
            .map(|c| net.name(c).unwrap())
            .collect();
        assert_eq!(order, ["amsterdam", "edinburgh"]);
    }

    #[test]
    fn conflicting_coordinates_rejected() {
        let csv = "city,x,y,neighbor,distance,reserved\na,0,0,b,1,0\na,1,0,b,1,0\nb,5,5,,,\n";
        assert!(matches!(load_network_reader(Cursor::new(csv)), Err(NetworkError::Parse(_))));
    }

    #[test]
    fn neighbor_without_distance_rejected() {
        let csv = "city,x,y,neighbor,distance,reserved\na,0,0,b,,0\nb,5,5,,,\n";
        assert!(matches!(load_network_reader(Cursor::new(csv)), Err(NetworkError::Parse(_))));
    }

    #[test]
    fn unknown_neighbor_rejected_at_load() {
        let csv = "city,x,y,neighbor,distance,reserved\na,0,0,ghost,1,0\n";
        assert!(matches!(
            load_network_reader(Cursor::new(csv)),
            Err(NetworkError::DanglingEdge { .. })
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL_CSV.as_bytes()).unwrap();
        let net = load_network_csv(file.path()).unwrap();
        assert_eq!(net.node_count(), 4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_network_csv(std::path::Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(NetworkError::Io(_))));
    }
}
