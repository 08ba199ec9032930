//! Random graph instances and the connectivity check.
//!
//! A [`Graph`] is a plain adjacency list over vertices `0..n`. The
//! [`GraphSampler`] fills one with a random G(N, p) instance, and
//! [`Graph::is_connected`] decides whether every vertex is reachable from
//! vertex `0`.
//!
//! ## Sampling models
//!
//! | Model | Draws | Adjacency | Matches G(N, p) |
//! |-------|-------|-----------|-----------------|
//! | [`SamplingModel::Undirected`] | one per unordered pair | symmetric | yes |
//! | [`SamplingModel::Directed`] | one per ordered pair | outgoing arcs only | no |
//!
//! The directed model treats `i -> j` and `j -> i` as independent coins and
//! only follows outgoing arcs from vertex `0`, so it samples a random digraph,
//! not G(N, p), and spends twice as many draws. The probability that vertex `0`
//! reaches every vertex still equals the G(N, p) connectivity probability: the
//! reachable set is exactly `S` iff `0` reaches all of `S` inside `S` and none
//! of the `|S| (N - |S|)` arcs leaving `S` is present, which is the same
//! decomposition as in the undirected case.
//!
//! Every pair consumes exactly one uniform draw whatever the value of `p`, so
//! two samples driven by the same random stream at `p1 <= p2` have nested edge
//! sets.

use std::fmt;

use rand::Rng;

/// How edges are drawn for a random instance.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum SamplingModel {
    /// One draw per unordered pair, symmetric adjacency (standard G(N, p)).
    #[default]
    Undirected,
    /// One draw per ordered pair, arcs followed in their own direction only.
    Directed,
}

impl fmt::Display for SamplingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingModel::Undirected => write!(f, "undirected"),
            SamplingModel::Directed => write!(f, "directed"),
        }
    }
}

/// Adjacency-list graph on vertices `0..n`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Creates a graph with `n` vertices and no edges.
    pub fn new(n: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); n],
        }
    }

    /// Creates the graph with all `n(n-1)` arcs present.
    pub fn complete(n: usize) -> Self {
        let mut graph = Self::new(n);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    graph.add_arc(i, j);
                }
            }
        }
        graph
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of adjacency entries (an undirected edge counts twice).
    pub fn num_arcs(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Adds the arc `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a vertex of the graph.
    pub fn add_arc(&mut self, from: usize, to: usize) {
        let n = self.num_vertices();
        assert!(from < n && to < n, "Arc {} -> {} is out of range for {} vertices", from, to, n);
        self.adjacency[from].push(to);
    }

    /// Adds the undirected edge `{u, v}`.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.add_arc(u, v);
        self.add_arc(v, u);
    }

    /// Vertices adjacent to `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not a vertex of the graph.
    pub fn neighbors(&self, v: usize) -> &[usize] {
        assert!(v < self.num_vertices(), "Vertex {} is out of range for {} vertices", v, self.num_vertices());
        &self.adjacency[v]
    }

    /// Removes all edges and resizes to `n` vertices, keeping allocations.
    pub fn reset(&mut self, n: usize) {
        self.adjacency.resize_with(n, Vec::new);
        for list in &mut self.adjacency {
            list.clear();
        }
    }

    /// Returns `true` iff every vertex is reachable from vertex `0`.
    ///
    /// The empty graph is considered connected.
    pub fn is_connected(&self) -> bool {
        Traversal::default().is_connected(self)
    }
}

/// Reusable scratch space for the reachability check.
#[derive(Debug, Default)]
pub struct Traversal {
    visited: Vec<bool>,
    stack: Vec<usize>,
}

impl Traversal {
    /// Depth-first search from vertex `0`, following adjacency entries.
    pub fn is_connected(&mut self, graph: &Graph) -> bool {
        let n = graph.num_vertices();
        if n == 0 {
            return true;
        }

        self.visited.clear();
        self.visited.resize(n, false);
        self.stack.clear();

        self.visited[0] = true;
        self.stack.push(0);
        let mut reached = 1;

        while let Some(v) = self.stack.pop() {
            for &w in graph.neighbors(v) {
                if !self.visited[w] {
                    self.visited[w] = true;
                    reached += 1;
                    if reached == n {
                        return true;
                    }
                    self.stack.push(w);
                }
            }
        }

        reached == n
    }
}

/// Generator of random G(N, p) instances.
#[derive(Debug, Copy, Clone, Default)]
pub struct GraphSampler {
    model: SamplingModel,
}

impl GraphSampler {
    pub fn new(model: SamplingModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> SamplingModel {
        self.model
    }

    /// Samples a fresh graph on `n` vertices.
    pub fn sample<R: Rng>(&self, n: usize, p: f64, rng: &mut R) -> Graph {
        let mut graph = Graph::new(n);
        self.sample_into(&mut graph, n, p, rng);
        graph
    }

    /// Samples into an existing graph buffer, discarding its previous edges.
    pub fn sample_into<R: Rng>(&self, graph: &mut Graph, n: usize, p: f64, rng: &mut R) {
        graph.reset(n);
        match self.model {
            SamplingModel::Undirected => {
                for i in 0..n {
                    for j in (i + 1)..n {
                        if rng.random::<f64>() < p {
                            graph.add_edge(i, j);
                        }
                    }
                }
            }
            SamplingModel::Directed => {
                for i in 0..n {
                    for j in 0..n {
                        if i != j && rng.random::<f64>() < p {
                            graph.add_arc(i, j);
                        }
                    }
                }
            }
        }
    }
}
