use std::time::Instant;

use anyhow::{bail, Context};
use graphrt::{ops, register, settings, status, ErrorKind, Graph, Settings};
use tracing::info;

const BENCH_NODES_VAR: &str = "GRAPHRT_BENCH_NODES";
const DEFAULT_NODES: u32 = 2000;
const MIN_NODES: u32 = 16;
const MAX_NODES: u32 = 100_000;

fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("reading GRAPHRT_* settings")?;
    graphrt::init_logging(&settings);
    settings::install(settings.clone());

    let default_nodes = default_node_count(|var| std::env::var(var).ok())?;
    let args: Vec<String> = std::env::args().collect();
    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");

    if mode == "help" || mode == "--help" {
        println!("Usage: graphrt-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all      Run all generators and benchmark each (default)");
        println!("  chain    Path 0 - 1 - ... - n-1 (deepest BFS)");
        println!("  star     Hub 0 joined to every other node (shallowest BFS)");
        println!("  random   Erdos-Renyi uniform random edges");
        println!("  barbell  Two dense clusters joined by a thin bridge");
        println!();
        println!("Default node_count: {} ({})", BENCH_NODES_VAR, default_nodes);
        return Ok(());
    }

    let node_count = match args.get(2) {
        Some(raw) => parse_node_count("node_count", raw)?,
        None => default_nodes,
    };
    let node_count = i32::try_from(node_count).context("node_count exceeds i32")?;

    let generators: Vec<(&str, fn(i32) -> Graph)> = match mode {
        "chain" => vec![("Chain", gen_chain)],
        "star" => vec![("Star", gen_star)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "all" => vec![
            ("Chain", gen_chain as fn(i32) -> Graph),
            ("Star", gen_star),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
        _ => bail!("unknown mode: {mode}. Use --help for options."),
    };

    println!("graphrt-bench");
    println!("=============");
    println!();

    status::reset();
    for (name, generator) in generators {
        run_benchmark(name, generator, node_count)?;
    }

    let snapshot = status::snapshot();
    info!(calls = snapshot.calls, faults = snapshot.total_faults(), "benchmark finished");
    println!("status: {}", snapshot.to_json());
    Ok(())
}

/// Node count to use when none is given on the command line. An unset or
/// blank variable falls back to `DEFAULT_NODES`.
fn default_node_count<F>(lookup: F) -> anyhow::Result<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(BENCH_NODES_VAR).filter(|v| !v.trim().is_empty()) {
        Some(raw) => parse_node_count(BENCH_NODES_VAR, &raw),
        None => Ok(DEFAULT_NODES),
    }
}

fn parse_node_count(what: &str, raw: &str) -> anyhow::Result<u32> {
    let n: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("{what} must be a positive integer, got {raw:?}"))?;
    if !(MIN_NODES..=MAX_NODES).contains(&n) {
        bail!("{what} must be within {MIN_NODES}..={MAX_NODES}, got {n}");
    }
    Ok(n)
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, generator: fn(i32) -> Graph, node_count: i32) -> anyhow::Result<()> {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    println!(
        "Generated in {:.1}ms: {} nodes, {} edges, ~{:.2}MB",
        ms(t),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    println!();
    println!("{:>14} {:>12} {:>10}", "operation", "edges", "time");
    println!("{:->14} {:->12} {:->10}", "", "", "");

    let t = Instant::now();
    let grown = ops::add_nodes(&graph, 8);
    println!("{:>14} {:>12} {:>8.1}ms", "add_nodes(8)", grown.edge_count(), ms(t));

    let t = Instant::now();
    let negated = ops::negation(&graph);
    println!("{:>14} {:>12} {:>8.1}ms", "negation", negated.edge_count(), ms(t));

    let t = Instant::now();
    let joined = ops::union(&graph, &negated);
    check("union")?;
    println!("{:>14} {:>12} {:>8.1}ms", "union", joined.edge_count(), ms(t));

    let t = Instant::now();
    let common = ops::intersection(&graph, &joined);
    check("intersection")?;
    println!("{:>14} {:>12} {:>8.1}ms", "intersection", common.edge_count(), ms(t));

    let t = Instant::now();
    let rest = ops::difference(&joined, &graph);
    check("difference")?;
    println!("{:>14} {:>12} {:>8.1}ms", "difference", rest.edge_count(), ms(t));

    // A tree on every reachable node has exactly reachable - 1 edges.
    let t = Instant::now();
    let tree = ops::shortest_path(&graph, 0);
    check("shortest_path")?;
    println!("{:>14} {:>12} {:>8.1}ms", "bfs tree", tree.edge_count(), ms(t));
    println!("{:>14} {} of {} nodes reached", "", tree.edge_count() + 1, graph.node_count());
    println!();
    Ok(())
}

fn check(op: &str) -> anyhow::Result<()> {
    match register::last_error() {
        ErrorKind::NoError => Ok(()),
        kind => bail!("{op} reported {kind}"),
    }
}

// ---------------------------------------------------------------------------
// Generators: deterministic, built through the runtime entry points
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: i32) -> i32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as i32
    }
}

fn gen_chain(node_count: i32) -> Graph {
    let mut graph = ops::new_graph(node_count);
    for i in 1..node_count {
        ops::add_edge(&mut graph, i - 1, i);
    }
    graph
}

fn gen_star(node_count: i32) -> Graph {
    let mut graph = ops::new_graph(node_count);
    for i in 1..node_count {
        ops::add_edge(&mut graph, 0, i);
    }
    graph
}

/// Erdos-Renyi: ~10 uniform random edges per node, no structure.
fn gen_random(node_count: i32) -> Graph {
    let mut graph = ops::new_graph(node_count);
    let mut rng = FastRng::new(54321);
    for _ in 0..node_count * 10 {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            ops::add_edge(&mut graph, from, to);
        }
    }
    graph
}

/// Barbell: two dense clusters joined by a chain of 10 bridge nodes.
///
/// Worst case for BFS depth through a bottleneck.
fn gen_barbell(node_count: i32) -> Graph {
    let bridge_len = 10;
    let cluster = (node_count - bridge_len) / 2;
    let mut graph = ops::new_graph(node_count);
    let mut rng = FastRng::new(99999);

    let b_start = cluster + bridge_len;
    for offset in [0, b_start] {
        for i in 0..cluster {
            for _ in 0..20.min(cluster - 1) {
                let target = rng.next(cluster);
                if target != i {
                    ops::add_edge(&mut graph, offset + i, offset + target);
                }
            }
        }
    }

    // cluster A tail -> bridge -> cluster B head
    for id in (cluster - 1)..b_start {
        ops::add_edge(&mut graph, id, id + 1);
    }
    graph
}
