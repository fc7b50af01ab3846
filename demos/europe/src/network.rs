//! The European rail board.
//!
//! 47 cities on a 1200×760 map.  Links are listed per city as
//! `(neighbor, distance, reserved)` and are directed: a few are only listed
//! on one side, and angora carries a link to itself.  `data/europe.csv` holds
//! the same network in loader format.

use rt_core::Coord;
use rt_network::{NetworkBuilder, NetworkGraph, NetworkResult};

/// Build the shipped 47-city network.
pub fn build_network() -> NetworkResult<NetworkGraph> {
    let mut b = NetworkBuilder::new();

    b.add_city("edinburgh",      Coord::new( 173,  34), [("london", 4, 0)])?;
    b.add_city("london",         Coord::new( 254, 213), [("amsterdam", 2, 0), ("dieppe", 2, 0), ("edinburgh", 4, 0)])?;
    b.add_city("amsterdam",      Coord::new( 371, 224), [("london", 2, 0), ("essen", 3, 0), ("bruxelles", 1, 0), ("frankfurt", 2, 0)])?;
    b.add_city("dieppe",         Coord::new( 239, 327), [("london", 2, 0), ("paris", 1, 0), ("brest", 2, 0), ("bruxelles", 2, 0)])?;
    b.add_city("essen",          Coord::new( 472, 232), [("amsterdam", 3, 0), ("frankfurt", 2, 0), ("berlin", 2, 0), ("kobenhavn", 3, 0)])?;
    b.add_city("bruxelles",      Coord::new( 345, 282), [("frankfurt", 2, 0), ("paris", 2, 0), ("dieppe", 2, 0), ("amsterdam", 1, 0)])?;
    b.add_city("frankfurt",      Coord::new( 457, 318), [("munchen", 2, 0), ("paris", 3, 0), ("bruxelles", 2, 0), ("amsterdam", 2, 0), ("essen", 2, 0), ("berlin", 3, 0)])?;
    b.add_city("paris",          Coord::new( 302, 382), [("bruxelles", 2, 0), ("dieppe", 1, 0), ("brest", 3, 0), ("pamplona", 4, 0), ("marseille", 4, 0), ("zurich", 3, 0), ("frankfurt", 3, 0)])?;
    b.add_city("brest",          Coord::new( 135, 362), [("dieppe", 2, 0), ("paris", 3, 0), ("pamplona", 4, 0)])?;
    b.add_city("munchen",        Coord::new( 520, 374), [("frankfurt", 2, 0), ("zurich", 2, 0), ("venezia", 2, 0), ("wien", 3, 0)])?;
    b.add_city("kobenhavn",      Coord::new( 553, 104), [("essen", 3, 0), ("stockholm", 3, 0)])?;
    b.add_city("stockholm",      Coord::new( 681,  14), [("kobenhavn", 3, 0), ("petrograd", 8, 0)])?;
    b.add_city("berlin",         Coord::new( 593, 250), [("danzig", 4, 0), ("essen", 2, 0), ("frankfurt", 3, 0), ("wien", 3, 0), ("warszawa", 4, 0)])?;
    b.add_city("wien",           Coord::new( 660, 393), [("berlin", 3, 0), ("munchen", 3, 0), ("zagrab", 2, 0), ("warszawa", 4, 0), ("budapest", 1, 0)])?;
    b.add_city("zurich",         Coord::new( 441, 448), [("paris", 3, 0), ("marseille", 2, 0), ("venezia", 2, 0), ("munchen", 2, 0)])?;
    b.add_city("marseille",      Coord::new( 409, 566), [("barcelona", 4, 0), ("pamplona", 4, 0), ("paris", 4, 0), ("zurich", 2, 0), ("roma", 4, 0)])?;
    b.add_city("pamplona",       Coord::new( 224, 565), [("madrid", 3, 0), ("barcelona", 2, 0), ("marseille", 4, 0), ("brest", 4, 0), ("paris", 4, 0)])?;
    b.add_city("madrid",         Coord::new( 102, 666), [("lisboa", 3, 0), ("cadiz", 3, 0), ("pamplona", 3, 0), ("barcelona", 2, 0)])?;
    b.add_city("lisboa",         Coord::new(  23, 696), [("madrid", 3, 0), ("cadiz", 2, 0)])?;
    b.add_city("cadiz",          Coord::new( 105, 754), [("lisboa", 2, 0), ("madrid", 3, 0)])?;
    b.add_city("barcelona",      Coord::new( 241, 675), [("madrid", 2, 0), ("pamplona", 2, 0), ("marseille", 4, 0)])?;
    b.add_city("roma",           Coord::new( 550, 600), [("marseille", 4, 0), ("venezia", 2, 0), ("brindisi", 2, 0), ("palermo", 4, 0)])?;
    b.add_city("venezia",        Coord::new( 543, 487), [("roma", 2, 0), ("zurich", 2, 0), ("munchen", 2, 0), ("zagrab", 2, 0)])?;
    b.add_city("danzig",         Coord::new( 728, 158), [("berlin", 4, 0), ("warszawa", 2, 0), ("riga", 3, 0)])?;
    b.add_city("riga",           Coord::new( 829,  47), [("danzig", 3, 0), ("wilno", 4, 0), ("petrograd", 4, 0)])?;
    b.add_city("petrograd",      Coord::new(1033,  42), [("stockholm", 8, 0), ("wilno", 4, 0), ("moskva", 4, 0), ("riga", 4, 0)])?;
    b.add_city("warszawa",       Coord::new( 789, 236), [("danzig", 2, 0), ("berlin", 4, 0), ("wien", 4, 0), ("wilno", 3, 0), ("kyiv", 4, 0)])?;
    b.add_city("wilno",          Coord::new( 926, 205), [("warszawa", 4, 0), ("riga", 4, 0), ("petrograd", 4, 0), ("smolensk", 3, 0), ("kyiv", 2, 0)])?;
    b.add_city("smolensk",       Coord::new(1051, 215), [("wilno", 3, 0), ("moskva", 2, 0), ("kyiv", 3, 0)])?;
    b.add_city("moskva",         Coord::new(1145, 184), [("petrograd", 4, 0), ("smolensk", 2, 0), ("kharkov", 4, 0)])?;
    b.add_city("kyiv",           Coord::new( 977, 301), [("wilno", 2, 0), ("smolensk", 3, 0), ("warszawa", 4, 0), ("budapest", 6, 0), ("bucuresti", 4, 0), ("kharkov", 4, 0)])?;
    b.add_city("kharkov",        Coord::new(1131, 368), [("kyiv", 4, 0), ("moskva", 4, 0), ("rostov", 2, 0)])?;
    b.add_city("rostov",         Coord::new(1186, 430), [("kharkov", 2, 0), ("sevastopol", 4, 0), ("sochi", 2, 0)])?;
    b.add_city("budapest",       Coord::new( 717, 420), [("wien", 1, 0), ("zagrab", 2, 0), ("sarajevo", 3, 0), ("bucuresti", 4, 0), ("kyiv", 6, 0)])?;
    b.add_city("bucuresti",      Coord::new( 897, 502), [("kyiv", 4, 0), ("budapest", 4, 0), ("sofia", 2, 0), ("constantinopel", 3, 0), ("sevastopol", 4, 0)])?;
    b.add_city("sevastopol",     Coord::new(1072, 523), [("bucuresti", 4, 0), ("rostov", 4, 0), ("sochi", 2, 0), ("erzurum", 1, 0), ("constantinopel", 4, 0)])?;
    b.add_city("sochi",          Coord::new(1173, 539), [("rostov", 2, 0), ("sevastopol", 2, 0), ("erzurum", 3, 0)])?;
    b.add_city("erzurum",        Coord::new(1153, 690), [("sevastopol", 4, 0), ("sochi", 3, 0), ("angora", 3, 0)])?;
    b.add_city("constantinopel", Coord::new( 962, 654), [("sevastopol", 4, 0), ("angora", 2, 0), ("smyrna", 2, 0), ("sofia", 3, 0), ("bucuresti", 3, 0)])?;
    b.add_city("angora",         Coord::new(1057, 718), [("smyrna", 3, 0), ("erzurum", 3, 0), ("angora", 2, 0)])?;
    b.add_city("smyrna",         Coord::new( 911, 750), [("constantinopel", 2, 0), ("angora", 2, 0), ("athina", 2, 0), ("palermo", 6, 0)])?;
    b.add_city("sofia",          Coord::new( 827, 579), [("athina", 3, 0), ("sarajevo", 2, 0), ("bucuresti", 2, 0), ("constantinopel", 3, 0)])?;
    b.add_city("sarajevo",       Coord::new( 750, 572), [("zagrab", 3, 0), ("budapest", 3, 0), ("sofia", 2, 0), ("athina", 4, 0)])?;
    b.add_city("zagrab",         Coord::new( 650, 500), [("sarajevo", 3, 0), ("venezia", 2, 0), ("wien", 2, 0), ("budapest", 2, 0)])?;
    b.add_city("brindisi",       Coord::new( 650, 625), [("venezia", 4, 0), ("palermo", 3, 0), ("athina", 4, 0)])?;
    b.add_city("athina",         Coord::new( 804, 720), [("sarajevo", 4, 0), ("sofia", 3, 0), ("smyrna", 2, 0), ("brindisi", 5, 0)])?;
    b.add_city("palermo",        Coord::new( 593, 750), [("roma", 4, 0), ("brindisi", 3, 0), ("smyrna", 6, 0)])?;

    b.build()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rt_core::{Coord, MapBounds, PlannerConfig, RouteRng};
    use rt_network::{load_network_reader, Router, UniformCostRouter};
    use rt_planner::{plan_route, RegionClassifier, RouteGenerator, WalkTermination};

    use super::build_network;

    const EUROPE_CSV: &str = include_str!("../data/europe.csv");

    #[test]
    fn shipped_network_shape() {
        let net = build_network().unwrap();
        assert_eq!(net.node_count(), 47);
        let london = net.city("london").unwrap();
        assert_eq!(net.coord(london).unwrap(), Coord::new(254, 213));
        assert_eq!(net.out_degree(london).unwrap(), 3);

        let angora = net.city("angora").unwrap();
        assert!(net.neighbors(angora).unwrap().any(|n| n == angora));
    }

    #[test]
    fn csv_matches_builder() {
        let built = build_network().unwrap();
        let loaded = load_network_reader(Cursor::new(EUROPE_CSV)).unwrap();
        assert_eq!(loaded.node_count(), built.node_count());
        assert_eq!(loaded.edge_count(), built.edge_count());
        for city in built.cities() {
            let name = built.name(city).unwrap();
            let other = loaded.city(name).unwrap();
            assert_eq!(loaded.coord(other).unwrap(), built.coord(city).unwrap());
            assert_eq!(loaded.out_degree(other).unwrap(), built.out_degree(city).unwrap());
        }
    }

    #[test]
    fn every_region_has_an_opposite() {
        let net = build_network().unwrap();
        let classifier = RegionClassifier::new(MapBounds::EUROPE);
        let groups = classifier.group_nodes(&net).unwrap();
        assert_eq!(groups.len(), 8);
        for key in groups.keys() {
            assert!(!groups.get(key.opposite()).is_empty(), "{key} has no opposite");
        }
        let london = net.city("london").unwrap();
        assert_eq!(classifier.classify(net.coord(london).unwrap()).to_string(), "RLLL");
    }

    #[test]
    fn known_shortest_costs() {
        let net = build_network().unwrap();
        let cost = |a: &str, b: &str| {
            UniformCostRouter
                .shortest_path(&net, net.city(a).unwrap(), net.city(b).unwrap())
                .unwrap()
                .cost
        };
        assert_eq!(cost("london", "sochi"), 20);
        assert_eq!(cost("edinburgh", "erzurum"), 23);
        assert_eq!(cost("lisboa", "moskva"), 28);
        assert_eq!(cost("london", "amsterdam"), 2);
    }

    #[test]
    fn default_session() {
        let net = build_network().unwrap();
        let mut generator = RouteGenerator::new(&net, PlannerConfig::default()).unwrap();
        let routes = generator.generate_routes(9, 3).unwrap();
        assert_eq!(routes.len(), 3);
        for r in &routes {
            assert_eq!(r.shortest.start(), r.start());
            assert_eq!(r.shortest.end(), r.end());
        }
        let long = generator.generate_long_route().unwrap();
        assert!(long.shortest_cost() > 0);
    }

    #[test]
    fn walks_end_for_the_reason_they_report() {
        let net = build_network().unwrap();
        let (mut step_limit, mut walks) = (0, 0);
        for seed in 0..2000 {
            let walk = plan_route(&net, 9, &mut RouteRng::new(seed, 0)).unwrap();
            walks += 1;

            let remaining = walk.budget - walk.accumulated_weight;
            let open: Vec<u32> = net
                .out_edges(walk.end())
                .unwrap()
                .filter(|&e| !walk.cities.contains(&net.edge_to(e)))
                .map(|e| net.edge_distance(e))
                .collect();
            let fits = open.iter().any(|&d| u64::from(d) <= remaining);
            match walk.termination {
                WalkTermination::BudgetReached => assert_eq!(remaining, 0),
                WalkTermination::BudgetExhausted => assert!(!open.is_empty() && !fits),
                WalkTermination::DeadEnd => assert!(open.is_empty()),
                WalkTermination::StepLimitExceeded => {
                    assert!(fits);
                    step_limit += 1;
                }
            }
        }
        // At most seven links per city: 50 samples almost never miss them all.
        assert!(step_limit * 100 <= walks, "{step_limit} of {walks} walks hit the step limit");
    }
}
