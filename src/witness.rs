//! Verdict extraction: universally-winning start configurations and the
//! minimax play trace.
//!
//! A configuration C* is a witness when `copWin(C*, r)` holds for every
//! robber start r. Without depth tracking the scan returns the first such
//! configuration in lex order; with depth tracking it returns the one
//! minimizing the worst-case capture depth (ties to the earlier
//! configuration), and the trace walks the depth table greedily: cops pick
//! the move minimizing the robber's best response, the robber picks the
//! response maximizing remaining depth.

use crate::constants::{state_index, SENTINEL};
use crate::transitions::MoveScratch;
use crate::types::{Solved, SolverContext, TraceStep, TurnLabel};

/// A universally-winning cop start.
#[derive(Clone, Copy, Debug)]
pub struct WitnessPick {
    pub cid: usize,
    /// Worst-case rounds to capture over all robber starts; -1 when depth
    /// was not tracked.
    pub worst_rounds: i32,
}

/// Scan configurations in lex order for a universal winner.
pub fn find_witness(ctx: &SolverContext, solved: &Solved) -> Option<WitnessPick> {
    let n = ctx.n;
    let mut best: Option<WitnessPick> = None;

    for cid in 0..ctx.configs.count() {
        let base = cid * n;
        let mut universal = true;
        let mut worst = 0i32;
        for r in 0..n {
            let sid = base + r;
            if !solved.states.cop_win(sid) {
                universal = false;
                break;
            }
            if let Some(steps) = &solved.steps {
                if steps[sid] > worst {
                    worst = steps[sid];
                }
            }
        }
        if !universal {
            continue;
        }
        match &solved.steps {
            None => {
                // First in lex order wins outright.
                return Some(WitnessPick {
                    cid,
                    worst_rounds: -1,
                });
            }
            Some(_) => {
                if best.is_none() || worst < best.unwrap().worst_rounds {
                    best = Some(WitnessPick {
                        cid,
                        worst_rounds: worst,
                    });
                }
            }
        }
    }
    best
}

fn step(ctx: &SolverContext, cid: usize, r: usize, turn: TurnLabel) -> TraceStep {
    TraceStep {
        cops: ctx.configs.config(cid).to_vec(),
        robber: r as u8,
        turn,
    }
}

/// Cop move: the successor configuration minimizing the robber's worst
/// response depth. Moving onto the robber counts as an instant catch.
fn best_cop_move(
    ctx: &SolverContext,
    solved: &Solved,
    scratch: &mut MoveScratch,
    cid: usize,
    r: usize,
) -> usize {
    let n = ctx.n;
    let steps = solved.steps.as_ref().expect("trace requires depth tracking");
    let mut best_cid = cid;
    let mut best_worst = i32::MAX;

    ctx.for_each_successor(cid, scratch, |succ_base| {
        let next_cid = succ_base / n;
        let mut worst = -1i32;
        let mut valid = true;

        if ctx.configs.contains(next_cid, r as u8) {
            worst = 0;
        } else {
            if ctx.opts.robber_may_stay {
                let sid = succ_base + r;
                if !solved.states.cop_win(sid) {
                    valid = false;
                } else if steps[sid] > worst {
                    worst = steps[sid];
                }
            }
            if valid {
                for &e in ctx.adj.row(r) {
                    if e == SENTINEL {
                        break;
                    }
                    let sid = succ_base + e as usize;
                    if !solved.states.cop_win(sid) {
                        valid = false;
                        break;
                    }
                    if steps[sid] > worst {
                        worst = steps[sid];
                    }
                }
            }
            if worst < 0 {
                // Robber has no response at all; the position is already
                // lost for it.
                worst = 0;
            }
        }

        if valid && worst < best_worst {
            best_worst = worst;
            best_cid = next_cid;
        }
    });

    best_cid
}

/// Robber move: the response in N+(r) maximizing remaining depth. "Stay" is
/// considered first, so it wins ties.
fn best_robber_move(ctx: &SolverContext, solved: &Solved, cid: usize, r: usize) -> usize {
    let n = ctx.n;
    let steps = solved.steps.as_ref().expect("trace requires depth tracking");
    let base = cid * n;
    let mut best_r = r;
    let mut best_steps = -1i32;

    if ctx.opts.robber_may_stay && solved.states.cop_win(base + r) && steps[base + r] > best_steps {
        best_steps = steps[base + r];
    }
    for &e in ctx.adj.row(r) {
        if e == SENTINEL {
            break;
        }
        let sid = base + e as usize;
        if solved.states.cop_win(sid) && steps[sid] > best_steps {
            best_steps = steps[sid];
            best_r = e as usize;
        }
    }
    best_r
}

/// Reconstruct the minimax play from a universal witness: worst robber
/// start first, then alternating greedy choices until capture.
pub fn reconstruct_trace(ctx: &SolverContext, solved: &Solved, start_cid: usize) -> Vec<TraceStep> {
    let n = ctx.n;
    let steps = solved.steps.as_ref().expect("trace requires depth tracking");
    let mut scratch = MoveScratch::new(ctx.k);

    // The robber starts wherever it survives longest.
    let mut r = 0usize;
    let mut max_steps = -1i32;
    for v in 0..n {
        let s = steps[state_index(start_cid, v, n)];
        if s > max_steps {
            max_steps = s;
            r = v;
        }
    }

    let mut trace = Vec::new();
    let mut cid = start_cid;
    let mut prev_rounds = i32::MAX;

    loop {
        if ctx.configs.contains(cid, r as u8) {
            trace.push(step(ctx, cid, r, TurnLabel::Captured));
            break;
        }
        // Depth strictly decreases each full round along optimal play.
        let here = steps[state_index(cid, r, n)];
        debug_assert!(here < prev_rounds, "minimax depth failed to descend");
        prev_rounds = here;

        trace.push(step(ctx, cid, r, TurnLabel::CopsTurn));
        cid = best_cop_move(ctx, solved, &mut scratch, cid, r);

        if ctx.configs.contains(cid, r as u8) {
            trace.push(step(ctx, cid, r, TurnLabel::Captured));
            break;
        }
        if ctx.closed_degrees[r] == 0 {
            // Stay disabled and nowhere to go: the robber is cornered and
            // the game is over.
            trace.push(step(ctx, cid, r, TurnLabel::Captured));
            break;
        }
        trace.push(step(ctx, cid, r, TurnLabel::RobbersTurn));
        r = best_robber_move(ctx, solved, cid, r);
    }

    trace
}
