//! Graph oracle: immutable vertex count plus a symmetric edge predicate.
//!
//! The solver consumes this abstraction only; everything downstream
//! (adjacency table, configurations, transitions) is derived from it once.
//! Includes the text adjacency-matrix parser used by the CLI: N lines of N
//! characters, `'0'`/`'1'`, optionally terminated early by a `'-'` line.
//! The diagonal is ignored — "stay" is a movement rule, not an edge.

use crate::constants::MAX_VERTICES;
use crate::error::SolverError;

/// Finite undirected graph on vertices 0..N.
pub struct Graph {
    n: usize,
    edges: Vec<bool>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let edges: Vec<(usize, usize)> = (0..self.n)
            .flat_map(|i| ((i + 1)..self.n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.edge(i, j))
            .collect();
        f.debug_struct("Graph")
            .field("n", &self.n)
            .field("edges", &edges)
            .finish()
    }
}

impl Graph {
    /// Graph with `n` vertices and no edges.
    pub fn empty(n: usize) -> Self {
        Graph {
            n,
            edges: vec![false; n * n],
        }
    }

    /// Build from an undirected edge list. Self-loops are dropped.
    pub fn from_edges(n: usize, edges: &[(u8, u8)]) -> Self {
        let mut g = Graph::empty(n);
        for &(u, v) in edges {
            if u != v {
                g.edges[u as usize * n + v as usize] = true;
                g.edges[v as usize * n + u as usize] = true;
            }
        }
        g
    }

    /// Parse a text adjacency matrix.
    ///
    /// One row per line, cells `'0'`/`'1'`, surrounding whitespace trimmed,
    /// blank lines skipped. A line consisting of `'-'` ends the matrix
    /// early. The matrix must be square and symmetric; diagonal entries are
    /// ignored.
    pub fn from_matrix_text(text: &str) -> Result<Self, SolverError> {
        let mut rows: Vec<&str> = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line == "-" {
                break;
            }
            if !line.is_empty() {
                rows.push(line);
            }
        }

        let n = rows.len();
        if n == 0 {
            return Err(SolverError::EmptyGraph);
        }
        if n > MAX_VERTICES {
            return Err(SolverError::TooManyVertices(n));
        }

        let mut g = Graph::empty(n);
        for (i, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != n {
                return Err(SolverError::RaggedMatrix {
                    row: i,
                    len,
                    expected: n,
                });
            }
            for (j, ch) in row.chars().enumerate() {
                match ch {
                    '0' => {}
                    '1' => {
                        if i != j {
                            g.edges[i * n + j] = true;
                        }
                    }
                    found => {
                        return Err(SolverError::BadMatrixCell {
                            row: i,
                            col: j,
                            found,
                        })
                    }
                }
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if g.edges[i * n + j] != g.edges[j * n + i] {
                    return Err(SolverError::AsymmetricMatrix { i, j });
                }
            }
        }

        Ok(g)
    }

    /// Number of vertices.
    #[inline(always)]
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Symmetric edge predicate. The diagonal is always false.
    #[inline(always)]
    pub fn edge(&self, i: usize, j: usize) -> bool {
        self.edges[i * self.n + j]
    }
}
