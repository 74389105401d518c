//! Error taxonomy for solver construction.
//!
//! The solve itself is a pure computation; every failure here is detected
//! before the state tables are allocated. Diagnostics name the offending
//! quantity so callers can see which limit was hit.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    /// The graph has no vertices. Nothing to solve.
    #[error("graph is empty (no vertices)")]
    EmptyGraph,

    /// Vertices must fit in one byte with the sentinel reserved.
    #[error("graph has {0} vertices; at most 255 are supported")]
    TooManyVertices(usize),

    /// Configurations are stored as k bytes.
    #[error("{0} cops requested; at most 255 are supported")]
    TooManyCops(usize),

    /// C(N+k-1, k) or a derived product exceeds the platform index type.
    #[error("state space overflow: {quantity} = {value} does not fit the platform index type")]
    StateSpaceOverflow {
        quantity: &'static str,
        value: u128,
    },

    /// `max_rounds` needs per-state capture depths to filter the verdict.
    #[error("max_rounds requires depth tracking (enable track_depth)")]
    DepthTrackingRequired,

    /// Adjacency matrix rows must all have length N.
    #[error("malformed adjacency matrix: row {row} has {len} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Only '0' and '1' are valid matrix cells.
    #[error("malformed adjacency matrix: row {row} column {col} holds {found:?}, expected '0' or '1'")]
    BadMatrixCell { row: usize, col: usize, found: char },

    /// The matrix must describe an undirected graph.
    #[error("adjacency matrix is not symmetric: entry ({i},{j}) disagrees with ({j},{i})")]
    AsymmetricMatrix { i: usize, j: usize },
}
