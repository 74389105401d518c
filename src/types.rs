//! Core data structures: solve options, the shared solver context, solved
//! state tables, and the verdict surface.
//!
//! The central type is [`SolverContext`]: adjacency table, configuration
//! table, and (optionally) the materialized transition table, built once
//! and then shared immutably across rayon workers for the whole solve.

use serde::Serialize;

use crate::adjacency::AdjacencyList;
use crate::configs::ConfigTable;
use crate::state_table::{RobberWinBits, StateTable};
use crate::transitions::{for_each_team_move, CsrTransitions, MoveScratch};

/// Which retrograde engine to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engine {
    /// Frontier-driven backward BFS. The production engine.
    Frontier,
    /// Full-table iterative scan. Orders of magnitude slower; kept as the
    /// correctness oracle for tests and cross-checks.
    Scan,
}

/// How team-move successor sets are obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStrategy {
    /// Build the CSR table once up front. Fastest; memory scales with the
    /// total successor count.
    Materialized,
    /// Re-enumerate per query. Roughly an order of magnitude less memory,
    /// correspondingly slower on dense graphs.
    OnTheFly,
}

/// Solve-time knobs. `Default` gives the standard game: frontier engine,
/// materialized transitions, robber may stay, no depth tracking.
#[derive(Clone, Copy, Debug)]
pub struct SolveOptions {
    pub engine: Engine,
    pub transitions: TransitionStrategy,
    /// Whether the robber may pass its turn. Cops always may.
    pub robber_may_stay: bool,
    /// Record per-state capture depths, enabling the min-depth witness,
    /// play-trace reconstruction, and the DP dump.
    pub track_depth: bool,
    /// Bounded-capture mode: a witness must capture within this many rounds
    /// from every robber start, else the verdict is LOSS. Needs
    /// `track_depth`.
    pub max_rounds: Option<u32>,
    /// Print progress banners and allocation sizes.
    pub verbose: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            engine: Engine::Frontier,
            transitions: TransitionStrategy::Materialized,
            robber_may_stay: true,
            track_depth: false,
            max_rounds: None,
            verbose: false,
        }
    }
}

/// Everything the retrograde engines read: built once, immutable during the
/// solve, shared across workers.
pub struct SolverContext {
    pub n: usize,
    pub k: usize,
    pub adj: AdjacencyList,
    pub configs: ConfigTable,
    /// Present iff the materialized strategy was chosen.
    pub csr: Option<CsrTransitions>,
    /// Closed degree per vertex: |N(v)| plus one for "stay" when the robber
    /// may stay. This is the initial safe-move count.
    pub closed_degrees: Vec<u32>,
    pub opts: SolveOptions,
}

impl SolverContext {
    /// M * N: one state per (configuration, robber vertex).
    #[inline(always)]
    pub fn num_states(&self) -> usize {
        self.configs.count() * self.n
    }

    /// Visit each successor of configuration `cid` as a pre-multiplied
    /// state base (`base + r` is the state id for robber vertex `r`).
    ///
    /// Materialized: deduplicated CSR row. On-the-fly: odometer
    /// re-enumeration, which may repeat a successor; callers must tolerate
    /// duplicates (all uses are idempotent claims or existence checks).
    #[inline]
    pub fn for_each_successor(
        &self,
        cid: usize,
        scratch: &mut MoveScratch,
        mut f: impl FnMut(usize),
    ) {
        match &self.csr {
            Some(csr) => {
                for &base in csr.successors(cid) {
                    f(base);
                }
            }
            None => {
                let n = self.n;
                for_each_team_move(&self.adj, &self.configs, cid, scratch, |next| f(next * n));
            }
        }
    }
}

/// Output of a retrograde engine: the fixed-point tables plus bookkeeping.
pub struct Solved {
    /// Packed copWin flags and safe-move counters.
    pub states: StateTable,
    /// robberWin flags.
    pub robber_wins: RobberWinBits,
    /// Capture depth in whole rounds per cop-turn state; -1 where the cops
    /// cannot force capture. Present iff depth tracking was requested.
    pub steps: Option<Vec<i32>>,
    /// Number of waves (frontier engine) or passes (scan engine) until the
    /// fixed point.
    pub waves: usize,
}

/// Game outcome under perfect play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Decision {
    Win,
    Loss,
}

/// Who is to move in a trace entry, or that the game just ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TurnLabel {
    #[serde(rename = "Cop's Turn")]
    CopsTurn,
    #[serde(rename = "Robber's Turn")]
    RobbersTurn,
    #[serde(rename = "Game Over — Captured")]
    Captured,
}

impl std::fmt::Display for TurnLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TurnLabel::CopsTurn => "Cop's Turn",
            TurnLabel::RobbersTurn => "Robber's Turn",
            TurnLabel::Captured => "Game Over — Captured",
        })
    }
}

/// One half-move of the reconstructed minimax play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    pub cops: Vec<u8>,
    pub robber: u8,
    pub turn: TurnLabel,
}

/// Structured result of a solve.
#[derive(Clone, Debug, Serialize)]
pub struct Verdict {
    pub decision: Decision,
    /// On WIN: the cop start configuration guaranteeing capture from every
    /// robber start (first in lex order, or the min-worst-depth witness
    /// when depth is tracked).
    pub witness: Option<Vec<u8>>,
    /// On WIN with depth tracking: worst-case rounds to capture from the
    /// witness.
    pub capture_rounds: Option<i32>,
    /// On WIN with depth tracking: the minimax play trace.
    pub trace: Option<Vec<TraceStep>>,
}
