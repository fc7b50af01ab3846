//! europe: route cards for the European rail board.
//!
//! Deals a batch of tour cards (and optionally one long-haul card) over the
//! shipped 47-city network, or over any network CSV passed with `--network`.
//!
//! ```text
//! cargo run -p europe -- --seed 7 --target 9 --count 3 --long
//! RUST_LOG=debug cargo run -p europe -- --json
//! ```

mod network;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rt_core::{CityId, EmptyRegionPolicy, PlannerConfig};
use rt_network::{load_network_csv, NetworkGraph};
use rt_planner::{RouteGenerator, RouteKind, RouteResult};

use network::build_network;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Network CSV (`city,x,y,neighbor,distance,reserved`).  Defaults to the
    /// built-in European board.
    #[arg(short, long)]
    network: Option<PathBuf>,

    /// Planner config as JSON.  Flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Target track weight per tour.
    #[arg(short, long)]
    target: Option<u32>,

    /// Number of tours to deal.
    #[arg(short = 'k', long)]
    count: Option<usize>,

    /// Also deal one long-haul card.
    #[arg(short, long)]
    long: bool,

    /// `fail`, `retry_other_keys` or `mirror_point`.
    #[arg(long, value_parser = parse_policy)]
    policy: Option<EmptyRegionPolicy>,

    /// Print the routes as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn parse_policy(s: &str) -> Result<EmptyRegionPolicy, String> {
    match s {
        "fail" => Ok(EmptyRegionPolicy::Fail),
        "retry_other_keys" => Ok(EmptyRegionPolicy::RetryOtherKeys),
        "mirror_point" => Ok(EmptyRegionPolicy::MirrorPoint),
        other => Err(format!("unknown policy {other:?}")),
    }
}

impl Args {
    fn planner_config(&self) -> Result<PlannerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("opening config {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => PlannerConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(target) = self.target {
            config.target_weight = target;
        }
        if let Some(count) = self.count {
            config.route_count = count;
        }
        if let Some(policy) = self.policy {
            config.empty_region_policy = policy;
        }
        Ok(config)
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

fn path_names(network: &NetworkGraph, path: &[CityId]) -> Result<String> {
    let names = path
        .iter()
        .map(|&c| network.name(c))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names.join(" → "))
}

fn print_card(network: &NetworkGraph, index: usize, route: &RouteResult) -> Result<()> {
    let start = network.name(route.start())?;
    let end   = network.name(route.end())?;
    match &route.kind {
        RouteKind::Tour { budget, accumulated_weight, termination } => {
            println!(
                "#{index:<2} {start:>14} → {end:<14} {:>3} pts   walk {accumulated_weight}/{budget} ({termination:?})",
                route.score,
            );
            println!("    walk:     {}", path_names(network, &route.route)?);
        }
        RouteKind::LongHaul => {
            println!("#{index:<2} {start:>14} → {end:<14} {:>3} pts   long haul", route.score);
        }
    }
    println!(
        "    shortest: {} (cost {})",
        path_names(network, &route.shortest.cities)?,
        route.shortest_cost(),
    );
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.planner_config()?;

    let network = match &args.network {
        Some(path) => load_network_csv(path)
            .with_context(|| format!("loading network {}", path.display()))?,
        None => build_network().context("building the European network")?,
    };
    info!(
        cities = network.node_count(),
        links = network.edge_count(),
        seed = config.seed,
        "network ready"
    );

    let mut generator = RouteGenerator::new(&network, config)?;
    let mut routes = generator.generate_default_routes()?;
    if args.long {
        routes.push(generator.generate_long_route()?);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    for (i, route) in routes.iter().enumerate() {
        print_card(&network, i + 1, route)?;
    }
    Ok(())
}
