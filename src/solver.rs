//! Solve orchestration: validate, size, build, run, extract the verdict.
//!
//! `build_context` performs every fatal check before a single state is
//! allocated; `run` dispatches to the chosen engine; `solve` ties it all
//! together and returns the structured verdict.

use crate::adjacency::AdjacencyList;
use crate::configs::ConfigTable;
use crate::constants::{MAX_COPS, MAX_VERTICES, SENTINEL};
use crate::error::SolverError;
use crate::frontier_solver::solve_frontier;
use crate::graph::Graph;
use crate::scan_solver::solve_scan;
use crate::transitions::{CsrTransitions, MoveScratch};
use crate::types::{
    Decision, Engine, Solved, SolveOptions, SolverContext, TransitionStrategy, Verdict,
};
use crate::witness::{find_witness, reconstruct_trace};

/// Validate the instance and build everything the engines read.
///
/// Rejections (empty graph, too many cops, index overflow) happen here,
/// before any state-table allocation.
pub fn build_context(
    graph: &Graph,
    k: usize,
    opts: SolveOptions,
) -> Result<SolverContext, SolverError> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(SolverError::EmptyGraph);
    }
    if n > MAX_VERTICES {
        return Err(SolverError::TooManyVertices(n));
    }
    if k > MAX_COPS {
        return Err(SolverError::TooManyCops(k));
    }
    if opts.max_rounds.is_some() && !opts.track_depth {
        return Err(SolverError::DepthTrackingRequired);
    }

    let adj = AdjacencyList::new(graph);
    let configs = ConfigTable::generate(n, k)?;
    let m = configs.count();

    // M * N states, and the frontier word keeps its high bit for the turn
    // tag.
    let states = m as u128 * n as u128;
    if states > usize::MAX as u128 || states >= (1u128 << 63) {
        return Err(SolverError::StateSpaceOverflow {
            quantity: "M * N (state count)",
            value: states,
        });
    }

    if opts.verbose {
        println!("Graph loaded: {} nodes.", n);
        println!(
            "Allocating {:.2} MB for {} cop configurations...",
            configs.byte_len() as f64 / (1024.0 * 1024.0),
            m
        );
    }

    let stay = if opts.robber_may_stay { 1 } else { 0 };
    let closed_degrees: Vec<u32> = (0..n).map(|v| adj.degree(v) as u32 + stay).collect();

    let csr = match opts.transitions {
        TransitionStrategy::Materialized => {
            let csr = CsrTransitions::build(&adj, &configs);
            if opts.verbose {
                println!(
                    "Materialized {} team transitions ({:.2} MB).",
                    csr.total_entries(),
                    (csr.total_entries() * std::mem::size_of::<usize>()) as f64 / (1024.0 * 1024.0)
                );
            }
            Some(csr)
        }
        TransitionStrategy::OnTheFly => None,
    };

    Ok(SolverContext {
        n,
        k,
        adj,
        configs,
        csr,
        closed_degrees,
        opts,
    })
}

/// Run the configured engine to the fixed point.
pub fn run(ctx: &SolverContext) -> Solved {
    let solved = match ctx.opts.engine {
        Engine::Frontier => solve_frontier(ctx),
        Engine::Scan => solve_scan(ctx),
    };
    #[cfg(debug_assertions)]
    verify_invariants(ctx, &solved);
    solved
}

/// Extract the verdict from the solved tables.
pub fn make_verdict(ctx: &SolverContext, solved: &Solved) -> Verdict {
    let pick = find_witness(ctx, solved).filter(|p| match ctx.opts.max_rounds {
        Some(bound) => p.worst_rounds >= 0 && p.worst_rounds as u32 <= bound,
        None => true,
    });

    match pick {
        None => Verdict {
            decision: Decision::Loss,
            witness: None,
            capture_rounds: None,
            trace: None,
        },
        Some(pick) => {
            let trace = solved
                .steps
                .as_ref()
                .map(|_| reconstruct_trace(ctx, solved, pick.cid));
            Verdict {
                decision: Decision::Win,
                witness: Some(ctx.configs.config(pick.cid).to_vec()),
                capture_rounds: solved.steps.as_ref().map(|_| pick.worst_rounds),
                trace,
            }
        }
    }
}

/// Decide the game: does `k` cops suffice on `graph`?
pub fn solve(graph: &Graph, k: usize, opts: SolveOptions) -> Result<Verdict, SolverError> {
    let ctx = build_context(graph, k, opts)?;
    let solved = run(&ctx);
    Ok(make_verdict(&ctx, &solved))
}

/// Check the retrograde invariants over every state. Used by debug builds
/// after each solve and by tests against both engines.
///
/// - capture: r ∈ C forces both flags and a zero counter
/// - robberWin holds iff every move in N+(r) is cop-winning
/// - for live robber states the counter equals the number of moves not yet
///   cop-winning
/// - copWin holds iff the robber is caught or some team move reaches a
///   robber-losing state
pub fn verify_invariants(ctx: &SolverContext, solved: &Solved) {
    let n = ctx.n;
    let mut scratch = MoveScratch::new(ctx.k);

    for cid in 0..ctx.configs.count() {
        let base = cid * n;
        for r in 0..n {
            let sid = base + r;
            let cop_win = solved.states.cop_win(sid);
            let robber_win = solved.robber_wins.get(sid);
            let safe = solved.states.safe_count(sid);
            let captured = ctx.configs.contains(cid, r as u8);

            if captured {
                assert!(cop_win && robber_win, "capture state {} not terminal", sid);
                assert_eq!(safe, 0, "capture state {} has safe moves", sid);
                if let Some(steps) = &solved.steps {
                    assert_eq!(steps[sid], 0, "capture state {} has nonzero depth", sid);
                }
                continue;
            }

            let mut unknown = 0u32;
            let mut all_cop_win = true;
            if ctx.opts.robber_may_stay {
                if !solved.states.cop_win(sid) {
                    unknown += 1;
                    all_cop_win = false;
                }
            }
            for &e in ctx.adj.row(r) {
                if e == SENTINEL {
                    break;
                }
                if !solved.states.cop_win(base + e as usize) {
                    unknown += 1;
                    all_cop_win = false;
                }
            }

            assert_eq!(
                robber_win, all_cop_win,
                "robberWin mismatch at state {} (cid {}, r {})",
                sid, cid, r
            );
            if robber_win {
                assert_eq!(safe, 0, "robber-losing state {} has safe moves", sid);
            } else {
                assert_eq!(
                    safe, unknown,
                    "safe count drifted at state {} (cid {}, r {})",
                    sid, cid, r
                );
            }

            let mut any_robber_win = false;
            ctx.for_each_successor(cid, &mut scratch, |succ_base| {
                if solved.robber_wins.get(succ_base + r) {
                    any_robber_win = true;
                }
            });
            assert_eq!(
                cop_win, any_robber_win,
                "copWin mismatch at state {} (cid {}, r {})",
                sid, cid, r
            );
        }
    }
}
