use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    objectives::{SimilarityMatrix, WeightedGraph},
    oracle::ValueOracle,
    sets::ElementSet,
};

/// Which objective to build, and therefore which storage to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    GraphCut,
    ImageSummarization,
    MovieRecommendation,
    Revenue,
}

impl ObjectiveKind {
    /// Graph objectives read an adjacency list; the others a dense matrix.
    pub fn uses_graph(self) -> bool {
        matches!(self, ObjectiveKind::GraphCut | ObjectiveKind::Revenue)
    }

    pub fn name(self) -> &'static str {
        match self {
            ObjectiveKind::GraphCut => "graph_cut",
            ObjectiveKind::ImageSummarization => "image_summarization",
            ObjectiveKind::MovieRecommendation => "movie_recommendation",
            ObjectiveKind::Revenue => "revenue",
        }
    }
}

/// The concrete set functions used in experiments.
///
/// - `GraphCut`: directed cut weight, non-monotone.
/// - `ImageSummarization`: coverage minus `1/n` times pairwise similarity.
/// - `MovieRecommendation`: column mass minus `0.95` times pairwise similarity.
/// - `Revenue`: concave (square-root) influence of `S` on the rest of the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Objective {
    GraphCut(WeightedGraph),
    ImageSummarization(SimilarityMatrix),
    MovieRecommendation(SimilarityMatrix),
    Revenue(WeightedGraph),
}

impl Objective {
    pub fn kind(&self) -> ObjectiveKind {
        match self {
            Objective::GraphCut(_) => ObjectiveKind::GraphCut,
            Objective::ImageSummarization(_) => ObjectiveKind::ImageSummarization,
            Objective::MovieRecommendation(_) => ObjectiveKind::MovieRecommendation,
            Objective::Revenue(_) => ObjectiveKind::Revenue,
        }
    }
}

impl ValueOracle for Objective {
    fn num_nodes(&self) -> usize {
        match self {
            Objective::GraphCut(graph) | Objective::Revenue(graph) => graph.num_nodes(),
            Objective::ImageSummarization(matrix) | Objective::MovieRecommendation(matrix) => {
                matrix.size()
            }
        }
    }

    fn value(&self, set: &ElementSet) -> f64 {
        match self {
            Objective::GraphCut(graph) => graph.cut_value(set),
            Objective::ImageSummarization(matrix) => matrix.summarization_value(set),
            Objective::MovieRecommendation(matrix) => matrix.recommendation_value(set),
            Objective::Revenue(graph) => graph.revenue_value(set),
        }
    }

    fn marginal_value(&self, element: usize, set: &ElementSet) -> f64 {
        if set.contains(&element) {
            return 0.0;
        }
        match self {
            Objective::GraphCut(graph) => graph.cut_marginal(element, set),
            Objective::Revenue(graph) => {
                let mut extended = set.clone();
                extended.insert(element);
                graph.revenue_value(&extended) - graph.revenue_value(set)
            }
            Objective::ImageSummarization(_) | Objective::MovieRecommendation(_) => {
                let addition: ElementSet = [element].into_iter().collect();
                self.marginal_set_value(&addition, set)
            }
        }
    }

    fn marginal_set_value(&self, addition: &ElementSet, set: &ElementSet) -> f64 {
        match self {
            Objective::GraphCut(graph) => graph.cut_set_marginal(addition, set),
            Objective::ImageSummarization(matrix) => matrix.summarization_set_marginal(addition, set),
            Objective::MovieRecommendation(matrix) => {
                matrix.recommendation_set_marginal(addition, set)
            }
            Objective::Revenue(graph) => {
                let mut extended = set.clone();
                extended.extend(addition.iter().copied());
                graph.revenue_value(&extended) - graph.revenue_value(set)
            }
        }
    }
}
