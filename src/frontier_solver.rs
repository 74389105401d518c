//! Frontier-driven retrograde solver — the production engine.
//!
//! A level-synchronous BFS backwards from the capture states. Each wave
//! processes the current frontier in parallel batches and emits the next:
//!
//! - A robber-turn entry (robberWin newly set at (C, r)) makes every
//!   predecessor cop-turn position (C', r) winning via the move C' → C.
//!   Per-cop moves on an undirected graph are reversible, so the
//!   predecessors of C are exactly its successors and the forward table is
//!   walked in both roles.
//! - A cop-turn entry (copWin newly set at (C, r)) removes one safe move
//!   from every robber position (C, r') with r ∈ N+(r'), which by edge
//!   symmetry plus "stay" is r' ∈ N+(r). A counter reaching zero flips
//!   robberWin.
//!
//! Frontier words carry the turn phase in the high bit; the claim
//! primitives in [`StateTable`](crate::state_table::StateTable) guarantee
//! each state is enqueued at most once per phase, so the frontier cannot
//! blow up. The operator is monotone (flags never clear, counters never
//! grow), so the wave loop terminates at the least fixed point.
//!
//! ## Unsafe writes
//!
//! Capture depths are written through a raw pointer from parallel workers.
//! Only the thread that performed a 0→1 claim writes a given state's depth,
//! so no two threads ever write the same location.

use std::sync::atomic::{AtomicPtr, Ordering};

use rayon::prelude::*;

use crate::constants::{
    half_steps_to_rounds, FRONTIER_BATCH, ROBBER_TURN_BIT, SENTINEL, STATE_ID_MASK,
};
use crate::state_table::{RobberWinBits, StateTable};
use crate::transitions::MoveScratch;
use crate::types::{Solved, SolverContext};

/// Configurations initialized per parallel task.
const INIT_CHUNK: usize = 1024;

/// One safe move of the robber position `sid` is gone. Claims the 1→0
/// transition; the claiming batch enqueues the robber-turn entry.
///
/// States already robber-winning are skipped: capture states start at zero
/// and must not be decremented below it.
#[inline(always)]
fn remove_safe_move(
    states: &StateTable,
    robber_wins: &RobberWinBits,
    sid: usize,
    local: &mut Vec<u64>,
) {
    if robber_wins.get(sid) {
        return;
    }
    if states.decrement_safe(sid) {
        robber_wins.set(sid);
        local.push(sid as u64 | ROBBER_TURN_BIT);
    }
}

/// Merge per-batch local frontiers into one vector with exact offsets; the
/// copies land in disjoint regions and run in parallel.
fn merge_frontiers(locals: Vec<Vec<u64>>) -> Vec<u64> {
    let mut offsets = Vec::with_capacity(locals.len());
    let mut total = 0usize;
    for l in &locals {
        offsets.push(total);
        total += l.len();
    }

    let mut merged = vec![0u64; total];
    let merged_ptr = AtomicPtr::new(merged.as_mut_ptr());
    locals
        .par_iter()
        .zip(offsets.par_iter())
        .for_each(|(local, &offset)| {
            let ptr = merged_ptr.load(Ordering::Relaxed);
            unsafe {
                std::ptr::copy_nonoverlapping(local.as_ptr(), ptr.add(offset), local.len());
            }
        });
    merged
}

pub fn solve_frontier(ctx: &SolverContext) -> Solved {
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
    // Depth writes go through this pointer; exclusivity comes from the
    // claim primitives (exactly one 0→1 claimer per state).
    let steps_ptr = steps
        .as_mut()
        .map(|s| AtomicPtr::new(s.as_mut_ptr()));

    if ctx.opts.verbose {
        println!(
            "Allocating {:.2} MB for {} states ({} bytes/state + robber-win bits)...",
            (num_states * states.cell_bytes() + num_states / 8) as f64 / (1024.0 * 1024.0),
            num_states,
            states.cell_bytes()
        );
    }

    // Initialization: capture states seed both turn phases of the frontier.
    let num_init_chunks = count.div_ceil(INIT_CHUNK);
    let locals: Vec<Vec<u64>> = (0..num_init_chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * INIT_CHUNK;
            let end = (start + INIT_CHUNK).min(count);
            let mut local = Vec::new();
            for cid in start..end {
                let cfg = ctx.configs.config(cid);
                let base = cid * n;
                for r in 0..n {
                    let sid = base + r;
                    if cfg.contains(&(r as u8)) {
                        states.init_capture(sid);
                        robber_wins.set(sid);
                        if let Some(p) = &steps_ptr {
                            unsafe {
                                *p.load(Ordering::Relaxed).add(sid) = 0;
                            }
                        }
                        local.push(sid as u64);
                        local.push(sid as u64 | ROBBER_TURN_BIT);
                    } else {
                        let safe = ctx.closed_degrees[r];
                        states.init_free(sid, safe);
                        if safe == 0 {
                            // Stay disabled and no neighbors: robber-to-move
                            // loses immediately.
                            robber_wins.set(sid);
                            local.push(sid as u64 | ROBBER_TURN_BIT);
                        }
                    }
                }
            }
            local
        })
        .collect();
    let mut frontier = merge_frontiers(locals);

    if ctx.opts.verbose {
        println!(
            "Initialized {} frontier entries (Captures).",
            frontier.len()
        );
        println!("Starting Level-Synchronous Retrograde BFS...");
    }

    let mut passes = 0usize;
    while !frontier.is_empty() {
        passes += 1;
        let rounds = half_steps_to_rounds(passes);
        if ctx.opts.verbose {
            println!("Starting Wave {} ({} states)...", passes, frontier.len());
        }

        let locals: Vec<Vec<u64>> = frontier
            .par_chunks(FRONTIER_BATCH)
            .map(|batch| {
                let mut scratch = MoveScratch::new(ctx.k);
                let mut local = Vec::with_capacity(batch.len());
                for &packed in batch {
                    let robber_turn = packed & ROBBER_TURN_BIT != 0;
                    let sid = (packed & STATE_ID_MASK) as usize;
                    let cid = sid / n;
                    let r = sid - cid * n;

                    if robber_turn {
                        // Every predecessor configuration can move onto
                        // this robber-losing position.
                        ctx.for_each_successor(cid, &mut scratch, |succ_base| {
                            let prev = succ_base + r;
                            if states.claim_cop_win(prev) {
                                if let Some(p) = &steps_ptr {
                                    unsafe {
                                        *p.load(Ordering::Relaxed).add(prev) = rounds;
                                    }
                                }
                                local.push(prev as u64);
                            }
                        });
                    } else {
                        // This position is cop-winning; the robber loses
                        // one safe move everywhere it could have come from.
                        let base = cid * n;
                        if ctx.opts.robber_may_stay {
                            remove_safe_move(&states, &robber_wins, base + r, &mut local);
                        }
                        for &e in ctx.adj.row(r) {
                            if e == SENTINEL {
                                break;
                            }
                            remove_safe_move(&states, &robber_wins, base + e as usize, &mut local);
                        }
                    }
                }
                local
            })
            .collect();

        frontier = merge_frontiers(locals);
        if ctx.opts.verbose {
            println!(
                "Wave {} merged. New states to process: {}",
                passes,
                frontier.len()
            );
        }
    }

    Solved {
        states,
        robber_wins,
        steps,
        waves: passes,
    }
}
