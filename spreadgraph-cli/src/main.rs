//! spreadgraph CLI - breadth-first information spread over a social graph.
//!
//! Features:
//! - Networks from spreadgraph.toml, a random generator, or the built-in sample
//! - Plain text dump or JSON output
//! - Graphviz DOT and visualizer JSON export of the spread tree
//! - Step-by-step traversal trace with --debug

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use spreadgraph_core::{
    default_directive, generate_dot, init_structured_logging, load_config, load_config_file,
    print_json, print_plain, sample_community, spread_to_visualizer_json, SocialGraph,
    SpreadConfig, SpreadEngine,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Breadth-first information spread over a social graph")]
pub struct Cli {
    /// Path to a spreadgraph.toml file, or a directory containing one
    #[arg(default_value = ".")]
    path: String,

    /// Person the spread starts from (defaults to the first person listed)
    #[arg(long)]
    start: Option<String>,

    /// Generate a random community of N people instead of loading one
    #[arg(long, value_name = "N")]
    random: Option<usize>,

    /// Connection probability for --random
    #[arg(long, default_value_t = 0.2, requires = "random")]
    edge_prob: f64,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Print Graphviz DOT output of the spread
    #[arg(long)]
    dot: bool,

    /// Write DOT output to a specified file instead of stdout
    #[arg(long, value_name = "FILE")]
    dot_file: Option<String>,

    /// Export visualizer JSON (levels, connections, spread edges) to a file
    #[arg(long, value_name = "FILE")]
    viz_file: Option<String>,

    /// Trace every traversal step to stderr
    #[arg(long)]
    debug: bool,

    /// Emit log lines as JSON objects
    #[arg(long)]
    log_json: bool,
}

/// Loads configuration from a file path, or from spreadgraph.toml inside a directory.
fn resolve_config(path: &Path) -> Result<Option<SpreadConfig>> {
    if path.is_file() {
        let cfg = load_config_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        return Ok(Some(cfg));
    }
    load_config(path).with_context(|| format!("Failed to load config from: {}", path.display()))
}

/// Picks the network to run on.
///
/// Precedence: --random, then people/connections from config, then the
/// config's [random] section, then the built-in sample.
fn build_network(cli: &Cli, cfg: &SpreadConfig) -> Result<SocialGraph> {
    if let Some(nodes) = cli.random {
        return SocialGraph::random_community(nodes, cli.edge_prob, cli.seed)
            .context("Failed to generate random community");
    }

    if let Some(graph) = cfg.explicit_network() {
        return Ok(graph);
    }

    if let Some(random) = &cfg.random {
        return SocialGraph::random_community(random.nodes, random.edge_prob, random.seed)
            .context("Failed to generate random community from config");
    }

    Ok(sample_community())
}

/// Start node: --start, then config. `None` lets the engine pick the first person.
fn choose_start(cli: &Cli, cfg: &SpreadConfig) -> Option<String> {
    cli.start.clone().or_else(|| cfg.start.clone())
}

/// Security: Validates output file paths to prevent path traversal attacks.
///
/// Rejects:
/// - Absolute paths (must be relative to current directory)
/// - Paths containing `..` (parent directory traversal)
/// - Paths with null bytes (injection attacks)
fn validate_output_path(path: &str) -> Result<PathBuf> {
    if path.contains('\0') {
        return Err(anyhow!("Output path contains null bytes"));
    }

    let p = PathBuf::from(path);

    if p.is_absolute() {
        return Err(anyhow!(
            "Output path must be relative, not absolute: {}",
            path
        ));
    }

    for component in p.components() {
        if matches!(component, std::path::Component::ParentDir) {
            return Err(anyhow!(
                "Path traversal (..) not allowed in output paths: {}",
                path
            ));
        }
    }

    // Windows-style separators slip past components() on unix
    let normalized = path.replace('\\', "/");
    if normalized.contains("/../") || normalized.starts_with("../") {
        return Err(anyhow!("Path traversal attempt detected: {}", path));
    }

    Ok(p)
}

fn write_output(path: &str, content: &str, what: &str) -> Result<()> {
    let safe_path = validate_output_path(path)?;
    fs::write(&safe_path, content)
        .with_context(|| format!("Failed to write {} to {}", what, safe_path.display()))?;
    eprintln!("[spreadgraph] {} written → {}", what, safe_path.display());
    Ok(())
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] spreadgraph internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 101.");
    }));

    let cli = Cli::parse();

    let cfg = resolve_config(Path::new(&cli.path))?.unwrap_or_default();
    let debug = cli.debug || cfg.debug.unwrap_or(false);
    init_structured_logging(cli.log_json, default_directive(debug));

    let graph = build_network(&cli, &cfg)?;
    let start = choose_start(&cli, &cfg);

    let result = SpreadEngine::new(&graph)
        .with_debug(debug)
        .try_run(start.as_deref())
        .context("Spread run rejected")?;

    if let Some(ref file) = cli.dot_file {
        write_output(file, &generate_dot(&graph, &result), "DOT graph")?;
    }

    if let Some(ref file) = cli.viz_file {
        let viz = spread_to_visualizer_json(&graph, &result);
        let serialized =
            serde_json::to_string_pretty(&viz).context("Failed to serialize visualizer JSON")?;
        write_output(file, &serialized, "Visualizer graph")?;
    }

    if cli.dot {
        print!("{}", generate_dot(&graph, &result));
    } else if cli.json || cfg.wants_json() {
        print_json(&graph, &result);
    } else {
        print_plain(&graph, &result);
    }

    Ok(())
}
