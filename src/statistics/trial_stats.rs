use serde::Serialize;
use tracing::info;

use crate::trajectory::Trajectory;

/// Running sums over the trajectories of repeated trials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialStats {
    trials: usize,
    value_sum: f64,
    value_square_sum: f64,
    best_value: f64,
    queries: usize,
    rounds: usize,
}

impl TrialStats {
    pub fn new() -> Self {
        TrialStats {
            trials: 0,
            value_sum: 0.0,
            value_square_sum: 0.0,
            best_value: f64::NEG_INFINITY,
            queries: 0,
            rounds: 0,
        }
    }

    /// Record the outcome of one finished trial
    pub fn bump(&mut self, trajectory: &Trajectory) {
        let value = trajectory.final_value();
        self.trials += 1;
        self.value_sum += value;
        self.value_square_sum += value * value;
        self.best_value = self.best_value.max(value);
        self.queries += trajectory.total_queries();
        self.rounds += trajectory.num_rounds();
    }

    pub fn get_trials(&self) -> usize {
        self.trials
    }

    /// `None` before the first trial.
    pub fn best_value(&self) -> Option<f64> {
        (self.trials > 0).then_some(self.best_value)
    }

    pub fn mean_value(&self) -> f64 {
        self.per_trial(self.value_sum)
    }

    /// Population standard deviation of the final values.
    pub fn std_value(&self) -> f64 {
        let mean = self.mean_value();
        (self.per_trial(self.value_square_sum) - mean * mean)
            .max(0.0)
            .sqrt()
    }

    pub fn mean_queries(&self) -> f64 {
        self.per_trial(self.queries as f64)
    }

    pub fn mean_rounds(&self) -> f64 {
        self.per_trial(self.rounds as f64)
    }

    fn per_trial(&self, total: f64) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            total / self.trials as f64
        }
    }

    /// Log the aggregates of `label` at info level.
    pub fn dump(&self, label: &str) {
        info!(
            algorithm = label,
            trials = self.trials,
            mean_value = self.mean_value(),
            std_value = self.std_value(),
            best_value = self.best_value().unwrap_or(0.0),
            mean_queries = self.mean_queries(),
            mean_rounds = self.mean_rounds(),
            "trial statistics"
        );
    }
}

impl Default for TrialStats {
    fn default() -> Self {
        TrialStats::new()
    }
}
