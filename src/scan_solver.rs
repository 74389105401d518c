//! Iterative-scan reference solver.
//!
//! Recomputes every state's condition in full passes over the table until a
//! pass changes nothing. Orders of magnitude slower than the frontier
//! engine and kept exactly for that reason: it is the correctness oracle
//! the frontier engine is tested against, with no frontier, no claims, and
//! no concurrency to get wrong.
//!
//! Flag flips are buffered during a pass and applied afterwards, so each
//! pass sees only the previous pass's fixed state. That makes the pass
//! number of a cop-win flip equal to the frontier engine's wave number, and
//! the recorded capture depths identical between the two engines.

use crate::constants::{half_steps_to_rounds, state_index, SENTINEL};
use crate::state_table::{RobberWinBits, StateTable};
use crate::transitions::MoveScratch;
use crate::types::{Solved, SolverContext};

pub fn solve_scan(ctx: &SolverContext) -> Solved {
    let n = ctx.n;
    let count = ctx.configs.count();
    let num_states = ctx.num_states();
    let max_safe = ctx.closed_degrees.iter().copied().max().unwrap_or(0);

    let states = StateTable::allocate(num_states, max_safe);
    let robber_wins = RobberWinBits::allocate(num_states);
    let mut steps = if ctx.opts.track_depth {
        Some(vec![-1i32; num_states])
    } else {
        None
    };

    // Initialization: captures win for both turn phases; everything else
    // starts with its full safe-move budget.
    let mut initial_wins = 0usize;
    for cid in 0..count {
        let cfg = ctx.configs.config(cid);
        for r in 0..n {
            let sid = state_index(cid, r, n);
            if cfg.contains(&(r as u8)) {
                states.init_capture(sid);
                robber_wins.set(sid);
                if let Some(s) = steps.as_mut() {
                    s[sid] = 0;
                }
                initial_wins += 1;
            } else {
                let safe = ctx.closed_degrees[r];
                states.init_free(sid, safe);
                if safe == 0 {
                    // No stay and no neighbors: the robber cannot move at
                    // all and loses the moment it is to move.
                    robber_wins.set(sid);
                }
            }
        }
    }
    if ctx.opts.verbose {
        println!("Initialized {} winning states (Captures).", initial_wins);
        println!("Starting Backward Induction Loop...");
    }

    let mut scratch = MoveScratch::new(ctx.k);
    let mut robber_flips: Vec<usize> = Vec::new();
    let mut cop_flips: Vec<usize> = Vec::new();
    let mut passes = 0usize;

    loop {
        passes += 1;
        robber_flips.clear();
        cop_flips.clear();

        for cid in 0..count {
            let base = cid * n;
            for r in 0..n {
                let sid = base + r;
                if states.cop_win(sid) && robber_wins.get(sid) {
                    continue;
                }

                // Robber's turn: trapped when every move in N+(r) lands on
                // a cop-winning state.
                if !robber_wins.get(sid) {
                    let mut safe = 0u32;
                    if ctx.opts.robber_may_stay && !states.cop_win(sid) {
                        safe += 1;
                    }
                    for &e in ctx.adj.row(r) {
                        if e == SENTINEL {
                            break;
                        }
                        if !states.cop_win(base + e as usize) {
                            safe += 1;
                        }
                    }
                    states.store_safe(sid, safe);
                    if safe == 0 {
                        robber_flips.push(sid);
                    }
                }

                // Cop's turn: won when some team move reaches a state the
                // robber has already lost.
                if !states.cop_win(sid) {
                    let mut can_win = false;
                    ctx.for_each_successor(cid, &mut scratch, |succ_base| {
                        if !can_win && robber_wins.get(succ_base + r) {
                            can_win = true;
                        }
                    });
                    if can_win {
                        cop_flips.push(sid);
                    }
                }
            }
        }

        let mut changed = false;
        for &sid in &robber_flips {
            if !robber_wins.get(sid) {
                robber_wins.set(sid);
                changed = true;
            }
        }
        let rounds = half_steps_to_rounds(passes);
        for &sid in &cop_flips {
            if states.claim_cop_win(sid) {
                if let Some(s) = steps.as_mut() {
                    s[sid] = rounds;
                }
                changed = true;
            }
        }

        if ctx.opts.verbose {
            println!(
                "Pass {}: Found {} new winning states.",
                passes,
                robber_flips.len() + cop_flips.len()
            );
        }
        if !changed {
            break;
        }
    }

    Solved {
        states,
        robber_wins,
        steps,
        waves: passes,
    }
}
