//! corate CLI - co-rating graph features from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Full sweep with defaults (datasets/ml-100k -> data100k, CSV)
//! corate run
//!
//! # Config file, overriding the output format and alphas
//! corate run --config corate.json --format json --alpha 0.01 --alpha 0.02
//!
//! # Check a config without running it
//! corate validate --config corate.json
//!
//! # Graph sizes per alpha, no metrics
//! corate graph-stats --data-dir datasets/ml-100k
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use corate::pipeline::observer::StageTimingObserver;
use corate::pipeline::runner::{graph_stats, load_dataset, FeaturePipeline};
use corate::pipeline::validation::{Severity, ValidationEngine};
use corate::{OutputFormat, PipelineSpec};

#[derive(Parser)]
#[command(name = "corate")]
#[command(about = "Co-rating graph centrality features", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the alpha sweep and write one feature table per alpha
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Output format (csv or json)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Write a leading user id column in CSV output
        #[arg(long)]
        include_user_id: bool,

        /// Print per-stage timings after the run
        #[arg(long)]
        timings: bool,
    },

    /// Validate a config file and print every diagnostic
    Validate {
        /// Config file (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Print node and edge counts per alpha without computing metrics
    GraphStats {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Options shared by commands that read the dataset.
#[derive(Args)]
struct SourceArgs {
    /// Config file (JSON); flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the ratings and users files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Edge-threshold fraction; repeat for several
    #[arg(long = "alpha")]
    alphas: Vec<f64>,

    /// Catalog size used in the edge threshold
    #[arg(long)]
    item_count: Option<usize>,
}

impl SourceArgs {
    fn spec(&self) -> Result<PipelineSpec> {
        let mut spec = match &self.config {
            Some(path) => PipelineSpec::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => PipelineSpec::default(),
        };
        if let Some(dir) = &self.data_dir {
            spec.data_dir = dir.clone();
        }
        if !self.alphas.is_empty() {
            spec.alphas = self.alphas.clone();
        }
        if let Some(item_count) = self.item_count {
            spec.item_count = item_count;
        }
        Ok(spec)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            source,
            output_dir,
            format,
            include_user_id,
            timings,
        } => {
            let mut spec = source.spec()?;
            if let Some(dir) = output_dir {
                spec.output_dir = dir;
            }
            if let Some(format) = format {
                spec.format = format;
            }
            spec.include_user_id |= include_user_id;
            cmd_run(&spec, timings)
        }
        Commands::Validate { config } => cmd_validate(&config),
        Commands::GraphStats { source } => cmd_graph_stats(&source.spec()?),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_run(spec: &PipelineSpec, timings: bool) -> Result<()> {
    let mut pipeline = FeaturePipeline::from_spec(spec).context("Invalid configuration")?;
    let mut observer = StageTimingObserver::new();
    let dataset = load_dataset(spec, &mut observer)
        .with_context(|| format!("Failed to load dataset from {}", spec.data_dir.display()))?;
    let summary = pipeline
        .run(&dataset, &mut observer)
        .context("Feature extraction failed")?;

    println!(
        "{} users, {} ratings, {} co-rating pairs, {} encoded columns",
        summary.users, summary.ratings, summary.pairs, summary.encoded_columns
    );
    for alpha in &summary.alphas {
        let output = alpha
            .output
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        println!(
            "alpha={:<6} nodes={:<5} edges={:<7} pagerank_iters={:<3}{} {}",
            alpha.alpha,
            alpha.nodes,
            alpha.edges,
            alpha.pagerank_iterations,
            if alpha.pagerank_converged { "" } else { " (not converged)" },
            output
        );
    }

    if timings {
        for (stage, report) in observer.reports() {
            let alpha = report.alpha().map(|a| format!(" alpha={a}")).unwrap_or_default();
            println!("{stage:<8}{alpha} {:.3}s", report.elapsed().as_secs_f64());
        }
        println!("total {:.3}s", observer.total().as_secs_f64());
    }
    Ok(())
}

fn cmd_validate(path: &Path) -> Result<()> {
    let spec = PipelineSpec::from_file(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    let report = ValidationEngine::with_defaults().validate(&spec);

    for diag in &report.diagnostics {
        let label = match diag.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        println!("{label}: {}", diag.error);
        if let Some(hint) = &diag.error.hint {
            println!("  hint: {hint}");
        }
    }

    if report.has_errors() {
        bail!(
            "{} has {} error(s)",
            path.display(),
            report.errors().count()
        );
    }
    println!("{} is valid ({} warning(s))", path.display(), report.warnings().count());
    Ok(())
}

fn cmd_graph_stats(spec: &PipelineSpec) -> Result<()> {
    corate::pipeline::runner::check_spec(spec).context("Invalid configuration")?;
    let dataset = load_dataset(spec, &mut corate::NoopObserver)
        .with_context(|| format!("Failed to load dataset from {}", spec.data_dir.display()))?;

    println!("{:<8} {:>9} {:>6} {:>8} {:>10} {:>8}", "alpha", "threshold", "nodes", "edges", "self_loops", "isolated");
    for stats in graph_stats(&dataset, &spec.alphas, spec.item_count) {
        println!(
            "{:<8} {:>9.2} {:>6} {:>8} {:>10} {:>8}",
            stats.alpha, stats.threshold, stats.nodes, stats.edges, stats.self_loops, stats.isolated_users
        );
    }
    Ok(())
}
