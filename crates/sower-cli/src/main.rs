#![forbid(unsafe_code)]
//! `sow` — select seed nodes for a graph according to centrality and
//! influence metrics.

mod output;

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sower_core::AdjacencyGraph;
use sower_select::{SeedSelector, Selection, SelectionRequest};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "sow: select seed nodes from a directed graph",
    long_about = "Select seed nodes for a given graph, according to various \
                  centrality & influence metrics. By default, no seeds are \
                  selected; activate a metric by giving it a quota."
)]
struct Cli {
    /// The graph, stored as a node adjacency list in JSON format.
    #[arg(value_name = "GRAPH")]
    graph: PathBuf,

    /// Number of trials; the seed list is printed once per trial.
    #[arg(value_name = "TRIALS")]
    trials: usize,

    /// Seeds to select using the degree-discount heuristic.
    #[arg(short = 'd', long, default_value_t = 0, help_heading = "Metrics")]
    discount: usize,

    /// Seeds to select by maximum out-degree.
    #[arg(short = 'D', long, default_value_t = 0, help_heading = "Metrics")]
    degree: usize,

    /// Seeds to select by maximum iterated degree.
    #[arg(short = 'i', long, default_value_t = 0, help_heading = "Metrics")]
    iterated: usize,

    /// Seeds to select by closeness centrality.
    #[arg(short = 'c', long, default_value_t = 0, help_heading = "Metrics")]
    close: usize,

    /// Seeds to select by betweenness centrality.
    #[arg(short = 'b', long, default_value_t = 0, help_heading = "Metrics")]
    between: usize,

    /// Traversal depth for the iterated-degree metric.
    #[arg(long, default_value_t = 3)]
    generations: usize,

    /// Randomization slack: sample each metric's quota uniformly from a
    /// candidate pool over-provisioned by (1 + ENTROPY).
    #[arg(long, default_value_t = 0.0)]
    entropy: f64,

    /// Seed for the entropy shuffle; omit for a nondeterministic draw.
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Emit a JSON report instead of newline-delimited seed ids.
    #[arg(long)]
    json: bool,
}

impl Cli {
    const fn request(&self) -> SelectionRequest {
        SelectionRequest {
            between: self.between,
            close: self.close,
            degree: self.degree,
            discount: self.discount,
            iterated: self.iterated,
            generations: self.generations,
            entropy: self.entropy,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SOWER_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "sower=debug,info"
        } else {
            "sower=info,warn"
        })
    });

    let format = env::var("SOWER_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Selection> {
    let raw = fs::read_to_string(&cli.graph)
        .with_context(|| format!("reading graph file {}", cli.graph.display()))?;
    let graph = AdjacencyGraph::from_json_str(&raw).context("parsing graph adjacency list")?;

    let selector =
        SeedSelector::new(&graph, cli.request()).context("invalid selection request")?;
    let selection = match cli.rng_seed {
        Some(seed) => selector.choose_with_rng(&mut StdRng::seed_from_u64(seed)),
        None => selector.choose(),
    };

    info!(
        nodes = graph.node_count(),
        seeds = selection.len(),
        "selection complete"
    );
    Ok(selection)
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let selection = run(&cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        output::render_json(&mut out, &selection, cli.trials)?;
    } else {
        output::render_lines(&mut out, &selection, cli.trials)?;
    }
    out.flush()?;
    Ok(())
}
