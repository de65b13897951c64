use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    adaptive::adaptive_nonmonotone_maximization,
    blits::blits,
    error::MaximizationResult,
    experiment::Parameters,
    fantom::fantom,
    greedy::{greedy, random, random_greedy, random_lazy_greedy_improved},
    oracle::ValueOracle,
    trajectory::Trajectory,
};

/// Every maximization routine the experiment driver can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Random,
    RandomPrefix,
    Greedy,
    RandomGreedy,
    RandomLazyGreedyImproved,
    AdaptiveNonmonotone,
    AdaptiveMonotone,
    Blits,
    Fantom,
}

impl Algorithm {
    pub const ALL: [Algorithm; 9] = [
        Algorithm::Random,
        Algorithm::RandomPrefix,
        Algorithm::Greedy,
        Algorithm::RandomGreedy,
        Algorithm::RandomLazyGreedyImproved,
        Algorithm::AdaptiveNonmonotone,
        Algorithm::AdaptiveMonotone,
        Algorithm::Blits,
        Algorithm::Fantom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Random => "random",
            Algorithm::RandomPrefix => "random_prefix",
            Algorithm::Greedy => "greedy",
            Algorithm::RandomGreedy => "random_greedy",
            Algorithm::RandomLazyGreedyImproved => "random_lazy_greedy_improved",
            Algorithm::AdaptiveNonmonotone => "adaptive_nonmonotone_maximization",
            Algorithm::AdaptiveMonotone => "adaptive_maximization",
            Algorithm::Blits => "blits",
            Algorithm::Fantom => "fantom",
        }
    }

    pub fn trials(self, params: &Parameters) -> usize {
        let counts = &params.trials;
        match self {
            Algorithm::Random => counts.random,
            Algorithm::RandomPrefix => counts.random_prefix,
            Algorithm::Greedy => counts.greedy,
            Algorithm::RandomGreedy => counts.random_greedy,
            Algorithm::RandomLazyGreedyImproved => counts.lazy_greedy,
            Algorithm::AdaptiveNonmonotone => counts.adaptive_nonmonotone,
            Algorithm::AdaptiveMonotone => counts.adaptive_monotone,
            Algorithm::Blits => counts.blits,
            Algorithm::Fantom => counts.fantom,
        }
    }

    /// Output file stem, e.g. `constraint_10-epsilon_25-rounds_10-blits`.
    ///
    /// Epsilon is written as a whole percentage.
    pub fn file_stem(self, k: usize, params: &Parameters) -> String {
        let epsilon = (params.epsilon * 100.0).round() as usize;
        match self {
            Algorithm::Random
            | Algorithm::RandomPrefix
            | Algorithm::Greedy
            | Algorithm::RandomGreedy
            | Algorithm::RandomLazyGreedyImproved => format!("constraint_{k}-{}", self.name()),
            Algorithm::AdaptiveNonmonotone | Algorithm::AdaptiveMonotone | Algorithm::Fantom => {
                format!("constraint_{k}-epsilon_{epsilon}-{}", self.name())
            }
            Algorithm::Blits => format!(
                "constraint_{k}-epsilon_{epsilon}-rounds_{}-{}",
                params.blits_rounds,
                self.name()
            ),
        }
    }

    /// File name of one trial. The trial suffix only appears when more than one
    /// trial is run.
    pub fn file_name(self, k: usize, params: &Parameters, trial: usize) -> String {
        let stem = self.file_stem(k, params);
        let total = self.trials(params);
        if total > 1 {
            format!("{stem}-trial_{}_{total}.txt", trial + 1)
        } else {
            format!("{stem}.txt")
        }
    }

    pub fn run<O, R>(
        self,
        oracle: &O,
        k: usize,
        params: &Parameters,
        rng: &mut R,
    ) -> MaximizationResult<Trajectory>
    where
        O: ValueOracle + ?Sized,
        R: Rng + ?Sized,
    {
        match self {
            Algorithm::Random => random(oracle, k, false, rng),
            Algorithm::RandomPrefix => random(oracle, k, true, rng),
            Algorithm::Greedy => greedy(oracle, k, rng),
            Algorithm::RandomGreedy => random_greedy(oracle, k, rng),
            Algorithm::RandomLazyGreedyImproved => {
                random_lazy_greedy_improved(oracle, k, params.lazy_delta, rng)
            }
            Algorithm::AdaptiveNonmonotone => adaptive_nonmonotone_maximization(
                oracle,
                k,
                params.epsilon,
                params.delta,
                params.nonmonotone,
                rng,
            ),
            Algorithm::AdaptiveMonotone => adaptive_nonmonotone_maximization(
                oracle,
                k,
                params.epsilon,
                params.delta,
                params.monotone,
                rng,
            ),
            Algorithm::Blits => blits(oracle, k, params.blits_rounds, params.epsilon, rng),
            Algorithm::Fantom => fantom(oracle, k, params.epsilon, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::{AdditiveOracle, CoverageOracle};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_file_names() {
        let params = Parameters::default();
        assert_eq!(
            Algorithm::Greedy.file_name(5, &params, 0),
            "constraint_5-greedy.txt"
        );
        assert_eq!(
            Algorithm::Random.file_name(5, &params, 2),
            "constraint_5-random-trial_3_10.txt"
        );
        assert_eq!(
            Algorithm::Blits.file_name(10, &params, 0),
            "constraint_10-epsilon_25-rounds_10-blits-trial_1_5.txt"
        );
        assert_eq!(
            Algorithm::AdaptiveMonotone.file_name(10, &params, 0),
            "constraint_10-epsilon_25-adaptive_maximization.txt"
        );
        assert_eq!(
            Algorithm::Fantom.file_name(3, &params, 0),
            "constraint_3-epsilon_25-fantom.txt"
        );
    }

    #[test]
    fn test_value_enum_names_are_unique() {
        let mut names: Vec<_> = Algorithm::ALL.iter().map(|a| a.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Algorithm::ALL.len());
        assert_eq!(
            Algorithm::from_str("random-lazy-greedy-improved", true).unwrap(),
            Algorithm::RandomLazyGreedyImproved
        );
    }

    #[test]
    fn test_every_algorithm_respects_cardinality() {
        let mut rng = StdRng::seed_from_u64(17);
        let params = Parameters::default();
        let oracle = CoverageOracle::sliding(40, 3);
        for algorithm in Algorithm::ALL {
            let trajectory = algorithm.run(&oracle, 10, &params, &mut rng).unwrap();
            assert!(
                trajectory.solution().len() <= 10,
                "{} returned {:?}",
                algorithm.name(),
                trajectory.solution()
            );
            assert!(trajectory.final_value() >= 0.0);
        }
    }

    #[test]
    fn test_invalid_cardinality_is_reported() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = Parameters::default();
        let oracle = AdditiveOracle::new(vec![1.0; 4]);
        for algorithm in Algorithm::ALL {
            assert!(algorithm.run(&oracle, 0, &params, &mut rng).is_err());
            assert!(algorithm.run(&oracle, 5, &params, &mut rng).is_err());
        }
    }
}
