use crate::sets::ElementSet;

/// Directed weighted multigraph with both adjacency directions materialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedGraph {
    outgoing: Vec<Vec<(usize, f64)>>,
    incoming: Vec<Vec<(usize, f64)>>,
    num_edges: usize,
}

impl WeightedGraph {
    pub fn new(num_nodes: usize) -> Self {
        WeightedGraph {
            outgoing: vec![Vec::new(); num_nodes],
            incoming: vec![Vec::new(); num_nodes],
            num_edges: 0,
        }
    }

    /// Builds a graph from `(from, to, weight)` triples.
    ///
    /// # Panics
    /// Panics if an endpoint is not below `num_nodes`.
    pub fn from_edges<I>(num_nodes: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut graph = WeightedGraph::new(num_nodes);
        for (from, to, weight) in edges {
            graph.add_edge(from, to, weight);
        }
        graph
    }

    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) {
        self.outgoing[from].push((to, weight));
        self.incoming[to].push((from, weight));
        self.num_edges += 1;
    }

    pub fn num_nodes(&self) -> usize {
        self.outgoing.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn outgoing(&self, node: usize) -> &[(usize, f64)] {
        &self.outgoing[node]
    }

    pub fn incoming(&self, node: usize) -> &[(usize, f64)] {
        &self.incoming[node]
    }

    /// Total weight of edges leaving `set`.
    pub fn cut_value(&self, set: &ElementSet) -> f64 {
        set.iter()
            .flat_map(|&u| self.outgoing(u))
            .filter(|(v, _)| !set.contains(v))
            .map(|(_, w)| w)
            .sum()
    }

    /// Self-loops never cross the cut.
    pub fn cut_marginal(&self, node: usize, set: &ElementSet) -> f64 {
        if set.contains(&node) {
            return 0.0;
        }
        let gained: f64 = self
            .outgoing(node)
            .iter()
            .filter(|(v, _)| *v != node && !set.contains(v))
            .map(|(_, w)| w)
            .sum();
        let lost: f64 = self
            .incoming(node)
            .iter()
            .filter(|(u, _)| set.contains(u))
            .map(|(_, w)| w)
            .sum();
        gained - lost
    }

    pub fn cut_set_marginal(&self, addition: &ElementSet, set: &ElementSet) -> f64 {
        let mut total = 0.0;
        for &u in addition.iter().filter(|u| !set.contains(*u)) {
            for &(v, w) in self.outgoing(u) {
                if !set.contains(&v) && !addition.contains(&v) {
                    total += w;
                }
            }
            for &(v, w) in self.incoming(u) {
                if set.contains(&v) {
                    total -= w;
                }
            }
        }
        total
    }

    /// `Σ_{i ∉ S} sqrt(Σ_{(i, j), j ∈ S} w(i, j))`.
    pub fn revenue_value(&self, set: &ElementSet) -> f64 {
        if set.is_empty() {
            return 0.0;
        }
        (0..self.num_nodes())
            .filter(|i| !set.contains(i))
            .map(|i| {
                self.outgoing(i)
                    .iter()
                    .filter(|(j, _)| set.contains(j))
                    .map(|(_, w)| w)
                    .sum::<f64>()
                    .sqrt()
            })
            .sum()
    }
}
