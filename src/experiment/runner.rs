use std::{
    fmt::Display,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use rand::{SeedableRng, rngs::StdRng};
use tqdm::tqdm;
use tracing::{info, warn};

use crate::{
    error::MaximizationError,
    experiment::{Algorithm, Parameters},
    fs::{write_json, write_table_to_path},
    oracle::ValueOracle,
    statistics::TrialStats,
};

#[derive(Debug)]
pub enum RunError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Algorithm {
        algorithm: Algorithm,
        source: MaximizationError,
    },
}

impl Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "Could not write trajectory JSON: {e}"),
            Self::Algorithm { algorithm, source } => {
                write!(f, "{} failed: {source}", algorithm.name())
            }
        }
    }
}

impl std::error::Error for RunError {}

impl From<std::io::Error> for RunError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for RunError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Runs algorithms against one objective and writes one table per trial.
pub struct ExperimentRunner<'a, O: ValueOracle + ?Sized> {
    oracle: &'a O,
    k: usize,
    params: Parameters,
    output_dir: PathBuf,
    seed: Option<u64>,
    json: bool,
}

impl<'a, O: ValueOracle + ?Sized> ExperimentRunner<'a, O> {
    pub fn new<P: AsRef<Path>>(oracle: &'a O, k: usize, params: Parameters, output_dir: P) -> Self {
        ExperimentRunner {
            oracle,
            k,
            params,
            output_dir: output_dir.as_ref().to_path_buf(),
            seed: None,
            json: false,
        }
    }

    /// Makes every trial reproducible: trial `t` is seeded with `seed + t`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Also writes each trajectory as a `.json` document next to its table.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    fn trial_rng(&self, trial: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(trial as u64)),
            None => StdRng::from_os_rng(),
        }
    }

    /// Runs every trial of `algorithm`, writing each trajectory to the output
    /// directory. Returns the aggregated statistics.
    pub fn run(&self, algorithm: Algorithm) -> Result<TrialStats, RunError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let trials = algorithm.trials(&self.params);
        if trials == 0 {
            warn!(algorithm = algorithm.name(), "no trials configured, skipping");
            return Ok(TrialStats::new());
        }
        info!(algorithm = algorithm.name(), k = self.k, trials, "starting");

        let mut stats = TrialStats::new();
        for trial in tqdm(0..trials).desc(Some(algorithm.name())) {
            let mut rng = self.trial_rng(trial);
            let trajectory = algorithm
                .run(self.oracle, self.k, &self.params, &mut rng)
                .map_err(|source| RunError::Algorithm { algorithm, source })?;

            let path = self
                .output_dir
                .join(algorithm.file_name(self.k, &self.params, trial));
            write_table_to_path(&trajectory, &path)?;
            if self.json {
                let file = BufWriter::new(File::create(path.with_extension("json"))?);
                write_json(&trajectory, file)?;
            }
            stats.bump(&trajectory);
        }

        stats.dump(algorithm.name());
        Ok(stats)
    }

    /// Runs each algorithm in turn. A failing algorithm is logged and skipped;
    /// output errors abort the sweep.
    pub fn run_all(&self, algorithms: &[Algorithm]) -> Result<Vec<(Algorithm, TrialStats)>, RunError> {
        let mut results = Vec::with_capacity(algorithms.len());
        for &algorithm in algorithms {
            match self.run(algorithm) {
                Ok(stats) => results.push((algorithm, stats)),
                Err(RunError::Algorithm { algorithm, source }) => {
                    warn!(algorithm = algorithm.name(), error = %source, "skipping algorithm");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(results)
    }
}
