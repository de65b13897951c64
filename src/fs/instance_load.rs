use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{debug, info, warn};

use crate::{
    fs::{LoadError, Scanner},
    objectives::{Objective, ObjectiveKind, SimilarityMatrix, WeightedGraph},
    oracle::ValueOracle,
};

/// A parsed edge list: a header `n m` followed by `m` lines `from to weight`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeList {
    pub num_nodes: usize,
    pub edges: Vec<(usize, usize, f64)>,
}

impl EdgeList {
    pub fn from_bufread<R: BufRead>(rdr: R) -> Result<Self, LoadError> {
        let mut scanner = Scanner::new(rdr);
        let num_nodes: usize = scanner.next()?;
        let num_edges: usize = scanner.next()?;
        if num_nodes == 0 {
            return Err(LoadError::InvalidDimensions(
                "edge list declares 0 nodes".into(),
            ));
        }

        let mut edges = Vec::with_capacity(num_edges);
        for _ in 0..num_edges {
            let from: usize = scanner.next()?;
            let to: usize = scanner.next()?;
            let weight: f64 = scanner.next()?;
            if from >= num_nodes || to >= num_nodes {
                return Err(LoadError::EdgeOutOfRange {
                    from,
                    to,
                    num_nodes,
                });
            }
            edges.push((from, to, weight));
        }
        if !scanner.is_exhausted()? {
            warn!(num_edges, "ignoring tokens after the declared edges");
        }
        Ok(EdgeList { num_nodes, edges })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_bufread(BufReader::new(file))
    }

    pub fn parse_text(text: &str) -> Result<Self, LoadError> {
        Self::from_bufread(text.as_bytes())
    }

    pub fn into_graph(self) -> WeightedGraph {
        WeightedGraph::from_edges(self.num_nodes, self.edges)
    }

    /// Dense matrix with `A[from][to] = weight`; a repeated edge keeps the last weight.
    pub fn into_matrix(self) -> SimilarityMatrix {
        let mut matrix = SimilarityMatrix::zeros(self.num_nodes);
        for (from, to, weight) in self.edges {
            matrix.set(from, to, weight);
        }
        matrix
    }
}

impl SimilarityMatrix {
    /// Loads a square 2-D `.npy` array of `f64`.
    pub fn load_from_npy<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path)?;
        let npy = npyz::NpyFile::new(&bytes[..])?;
        let shape = npy.shape().to_vec();
        if shape.len() != 2 || shape[0] != shape[1] || shape[0] == 0 {
            return Err(LoadError::InvalidDimensions(format!(
                "expected a non-empty square matrix, got shape {shape:?}"
            )));
        }
        let size = shape[0] as usize;
        let entries = npy
            .into_vec::<f64>()
            .map_err(|e| LoadError::Npy(e.to_string()))?;
        SimilarityMatrix::from_entries(size, entries)
            .ok_or_else(|| LoadError::Npy(format!("payload is not {size}x{size}")))
    }
}

/// Builds the objective of `kind` from `path`.
///
/// Matrix objectives accept either an edge list or, for a `.npy` extension, a
/// dense array.
pub fn load_objective<P: AsRef<Path>>(kind: ObjectiveKind, path: P) -> Result<Objective, LoadError> {
    let path = path.as_ref();
    let is_npy = path.extension().is_some_and(|ext| ext == "npy");
    let objective = if kind.uses_graph() {
        let graph = EdgeList::from_path(path)?.into_graph();
        debug!(
            nodes = graph.num_nodes(),
            edges = graph.num_edges(),
            "graph built"
        );
        if kind == ObjectiveKind::GraphCut {
            Objective::GraphCut(graph)
        } else {
            Objective::Revenue(graph)
        }
    } else {
        let matrix = if is_npy {
            SimilarityMatrix::load_from_npy(path)?
        } else {
            EdgeList::from_path(path)?.into_matrix()
        };
        if kind == ObjectiveKind::ImageSummarization {
            Objective::ImageSummarization(matrix)
        } else {
            Objective::MovieRecommendation(matrix)
        }
    };
    info!(
        objective = objective.kind().name(),
        nodes = objective.num_nodes(),
        path = %path.display(),
        "instance loaded"
    );
    Ok(objective)
}
