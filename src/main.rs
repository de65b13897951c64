use clap::Parser;
use std::{error::Error, path::PathBuf};
use submax::{
    experiment::{Algorithm, ExperimentRunner, Parameters},
    fs::load_objective,
    objectives::ObjectiveKind,
    oracle::ValueOracle,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Cardinality-constrained submodular maximization experiments
#[derive(Parser, Debug)]
#[command(name = "submax")]
#[command(about = "Runs submodular maximization algorithms and records their trajectories", long_about = None)]
struct Args {
    /// Path to the instance (edge list, or .npy for matrix objectives)
    #[arg(short, long)]
    graph: PathBuf,

    /// Objective to maximize
    #[arg(short, long, value_enum)]
    objective: ObjectiveKind,

    /// Cardinality constraint k
    #[arg(short = 'k', long)]
    constraint: usize,

    /// Algorithms to run (comma-separated list, e.g., "greedy,blits,fantom"). Defaults to all
    #[arg(short, long, value_enum, value_delimiter = ',')]
    algorithms: Vec<Algorithm>,

    /// Directory receiving one trajectory table per trial
    #[arg(long, default_value = "results")]
    output: PathBuf,

    /// Optional JSON file overriding the default parameters
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Also write each trajectory as JSON next to its table
    #[arg(long)]
    json: bool,

    /// Seed making every trial reproducible
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let params = match &args.params {
        Some(path) => Parameters::from_json_file(path)?,
        None => Parameters::default(),
    };
    let objective = load_objective(args.objective, &args.graph)?;
    info!(
        nodes = objective.num_nodes(),
        k = args.constraint,
        params = %serde_json::to_string(&params)?,
        "instance ready"
    );

    let algorithms = if args.algorithms.is_empty() {
        Algorithm::ALL.to_vec()
    } else {
        args.algorithms
    };
    let output = args.output.join(args.objective.name());
    let mut runner =
        ExperimentRunner::new(&objective, args.constraint, params, &output).with_json(args.json);
    if let Some(seed) = args.seed {
        runner = runner.with_seed(seed);
    }

    let results = runner.run_all(&algorithms)?;
    for (algorithm, stats) in &results {
        info!(
            algorithm = algorithm.name(),
            best = stats.best_value().unwrap_or(0.0),
            mean = stats.mean_value(),
            "done"
        );
    }
    info!(output = %output.display(), completed = results.len(), "all algorithms finished");
    Ok(())
}
