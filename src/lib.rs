//! # copnumber — k-Cops and Robbers pursuit-game solver
//!
//! Decides whether k cops can guarantee capture of a robber on a finite
//! undirected graph (N ≤ 255, k ≤ 255) using **retrograde analysis**
//! (backward induction) over the full (configuration × robber × turn)
//! state space, and extracts a universally-winning cop start plus a
//! minimax-optimal play trace.
//!
//! ## Pipeline
//!
//! | Phase | Module | Description |
//! |-------|--------|-------------|
//! | 0 | [`graph`] | Graph oracle: vertex count + symmetric edge predicate (text matrix parser included) |
//! | 1 | [`adjacency`] | Flat [N × maxdeg] neighbor table, sentinel-padded |
//! | 2 | [`configs`] | All C(N+k-1, k) sorted cop multisets, packed, binary-search indexed |
//! | 3 | [`transitions`] | Team moves: odometer product over {cᵢ} ∪ N(cᵢ), materialized CSR or on-the-fly |
//! | 4 | [`frontier_solver`] / [`scan_solver`] | Retrograde fixed point: frontier BFS (production) or full-table scan (oracle) |
//! | 5 | [`witness`] | Universal-win witness, capture depths, minimax trace |
//! | 6 | [`export`] | Trace / DP-table text dumps, JSON trace |
//!
//! ## State representation
//!
//! A game state is (C, r) with C a sorted k-multiset of vertices and r the
//! robber's vertex; flat id `cId * N + r`. The turn phase indexes which
//! flag applies: `copWin` (cops to move and winning) or `robberWin`
//! (robber to move and trapped). Per-state storage packs `copWin` with the
//! robber's remaining safe-move counter in one atomic byte (u16 fallback
//! for high degrees); the frontier packs the turn phase into the high bit
//! of the state word.
//!
//! The transition relation is its own inverse (cops move independently on
//! undirected edges and may stay), so the backward BFS walks the forward
//! table and never materializes a reverse one.

pub mod adjacency;
pub mod configs;
pub mod constants;
pub mod env_config;
pub mod error;
pub mod export;
pub mod frontier_solver;
pub mod graph;
pub mod scan_solver;
pub mod solver;
pub mod state_table;
pub mod transitions;
pub mod types;
pub mod witness;

pub use error::SolverError;
pub use graph::Graph;
pub use solver::{build_context, make_verdict, run, solve, verify_invariants};
pub use types::{Decision, Engine, SolveOptions, TransitionStrategy, Verdict};
