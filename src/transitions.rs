//! Team-move transitions: the configurations reachable when every cop
//! independently takes an edge or stays.
//!
//! The enumeration is an odometer over per-cop option sets {cᵢ} ∪ N(cᵢ);
//! each emitted tuple is sorted and looked up to its configuration id.
//! Because every cop can reverse its own move on an undirected graph, the
//! relation is its own inverse — the solver walks the same table forwards
//! (cop moves) and backwards (predecessor discovery) and no reverse table
//! is ever built.
//!
//! Two strategies share the enumerator:
//! - [`CsrTransitions::build`] materializes the deduplicated successor sets
//!   into a flat CSR table once, targets pre-multiplied by N so
//!   `targets[i] + r` is directly a state id.
//! - On-the-fly callers invoke [`for_each_team_move`] per query; duplicates
//!   are visited, which is harmless wherever claims are idempotent.

use rayon::prelude::*;

use crate::adjacency::AdjacencyList;
use crate::configs::ConfigTable;
use crate::constants::{CSR_BUILD_CHUNK, SENTINEL};

/// Reusable per-worker buffers for the odometer enumeration.
///
/// `options` is a flat [k × 256] table: row i holds cop i's own vertex
/// followed by its neighbors. Sized once so the hot loop never allocates.
pub struct MoveScratch {
    options: Vec<u8>,
    counts: Vec<usize>,
    odometer: Vec<usize>,
    tuple: Vec<u8>,
}

impl MoveScratch {
    pub fn new(k: usize) -> Self {
        MoveScratch {
            options: vec![0; k * 256],
            counts: vec![0; k],
            odometer: vec![0; k],
            tuple: vec![0; k],
        }
    }
}

/// Enumerate every team move from configuration `cid`, invoking `f` with
/// each successor configuration id. Tuples that map to the same sorted
/// multiset are visited repeatedly; callers deduplicate or rely on
/// idempotent claims.
///
/// Panics if a sorted move tuple is missing from the configuration table —
/// that breaks the enumeration's totality and is a programmer error.
pub fn for_each_team_move(
    adj: &AdjacencyList,
    configs: &ConfigTable,
    cid: usize,
    scratch: &mut MoveScratch,
    mut f: impl FnMut(usize),
) {
    let k = configs.k();
    if k == 0 {
        // Zero cops: the empty configuration's only move is to itself.
        f(cid);
        return;
    }

    let cops = configs.config(cid);
    for (i, &u) in cops.iter().enumerate() {
        let row = &mut scratch.options[i * 256..(i + 1) * 256];
        row[0] = u;
        let mut count = 1;
        for &e in adj.row(u as usize) {
            if e == SENTINEL {
                break;
            }
            row[count] = e;
            count += 1;
        }
        scratch.counts[i] = count;
        scratch.odometer[i] = 0;
    }

    loop {
        for i in 0..k {
            scratch.tuple[i] = scratch.options[i * 256 + scratch.odometer[i]];
        }
        scratch.tuple.sort_unstable();

        let next = configs.lookup(&scratch.tuple).unwrap_or_else(|| {
            panic!(
                "team move {:?} from configuration {} missing from the configuration table",
                scratch.tuple, cid
            )
        });
        f(next);

        // Advance the odometer.
        let mut p = k as isize - 1;
        loop {
            if p < 0 {
                return;
            }
            let i = p as usize;
            scratch.odometer[i] += 1;
            if scratch.odometer[i] < scratch.counts[i] {
                break;
            }
            scratch.odometer[i] = 0;
            p -= 1;
        }
    }
}

/// Materialized team-move table in compressed sparse row form.
///
/// `targets[heads[cid]..heads[cid+1]]` holds the deduplicated successor ids
/// of `cid`, each pre-multiplied by N.
pub struct CsrTransitions {
    heads: Vec<usize>,
    targets: Vec<usize>,
}

impl CsrTransitions {
    /// Build the full table. Chunks of configurations are enumerated in
    /// parallel, each with its own scratch; per-configuration successor
    /// sets are sorted and deduplicated before being appended.
    pub fn build(adj: &AdjacencyList, configs: &ConfigTable) -> Self {
        let count = configs.count();
        let n = configs.n();
        let k = configs.k();
        let num_chunks = count.div_ceil(CSR_BUILD_CHUNK);

        let partials: Vec<(Vec<usize>, Vec<usize>)> = (0..num_chunks)
            .into_par_iter()
            .map(|chunk| {
                let start = chunk * CSR_BUILD_CHUNK;
                let end = (start + CSR_BUILD_CHUNK).min(count);
                let mut scratch = MoveScratch::new(k);
                let mut moves: Vec<usize> = Vec::with_capacity(64);
                let mut lens = Vec::with_capacity(end - start);
                let mut flat = Vec::new();
                for cid in start..end {
                    moves.clear();
                    for_each_team_move(adj, configs, cid, &mut scratch, |next| {
                        moves.push(next * n);
                    });
                    moves.sort_unstable();
                    moves.dedup();
                    lens.push(moves.len());
                    flat.extend_from_slice(&moves);
                }
                (lens, flat)
            })
            .collect();

        let total: usize = partials.iter().map(|(_, flat)| flat.len()).sum();
        let mut heads = Vec::with_capacity(count + 1);
        let mut targets = Vec::with_capacity(total);
        heads.push(0);
        for (lens, flat) in &partials {
            for &len in lens {
                heads.push(heads.last().unwrap() + len);
            }
            targets.extend_from_slice(flat);
        }
        debug_assert_eq!(heads.len(), count + 1);
        debug_assert_eq!(targets.len(), total);

        CsrTransitions { heads, targets }
    }

    /// Successor configuration ids of `cid`, pre-multiplied by N.
    #[inline(always)]
    pub fn successors(&self, cid: usize) -> &[usize] {
        &self.targets[self.heads[cid]..self.heads[cid + 1]]
    }

    /// Total number of stored transition entries.
    pub fn total_entries(&self) -> usize {
        self.targets.len()
    }
}
