//! Property-based tests for the enumeration and transition layers.

use copnumber::adjacency::AdjacencyList;
use copnumber::configs::{multiset_count, ConfigTable};
use copnumber::constants::SENTINEL;
use copnumber::transitions::{for_each_team_move, CsrTransitions, MoveScratch};
use copnumber::Graph;
use proptest::prelude::*;

/// Strategy: a vertex count and flat upper-triangle edge bits.
fn graph_strategy() -> impl Strategy<Value = Graph> {
    (2usize..=8).prop_flat_map(|n| {
        let pairs = n * (n - 1) / 2;
        prop::collection::vec(any::<bool>(), pairs..=pairs).prop_map(move |bits| {
            let mut edges = Vec::new();
            let mut idx = 0;
            for i in 0..n {
                for j in (i + 1)..n {
                    if bits[idx] {
                        edges.push((i as u8, j as u8));
                    }
                    idx += 1;
                }
            }
            Graph::from_edges(n, &edges)
        })
    })
}

proptest! {
    // 1. The enumerator emits exactly C(N+k-1, k) configurations, sorted
    //    strictly increasing in lexicographic order.
    #[test]
    fn enumeration_count_and_order(n in 1usize..=12, k in 0usize..=4) {
        let table = ConfigTable::generate(n, k).unwrap();
        prop_assert_eq!(table.count(), multiset_count(n, k).unwrap());
        for id in 0..table.count() {
            let c = table.config(id);
            for w in c.windows(2) {
                prop_assert!(w[0] <= w[1], "config {:?} not sorted", c);
            }
            if id > 0 {
                prop_assert!(table.config(id - 1) < c);
            }
        }
    }

    // 2. Binary-search lookup inverts enumeration for every id.
    #[test]
    fn lookup_is_the_inverse_of_enumeration(n in 1usize..=10, k in 0usize..=3) {
        let table = ConfigTable::generate(n, k).unwrap();
        for id in 0..table.count() {
            let tuple = table.config(id).to_vec();
            prop_assert_eq!(table.lookup(&tuple), Some(id));
        }
    }

    // 3. Adjacency rows mirror the oracle exactly: sorted neighbors, then
    //    sentinel padding to the stride.
    #[test]
    fn adjacency_rows_match_the_oracle(g in graph_strategy()) {
        let adj = AdjacencyList::new(&g);
        let n = g.vertex_count();
        prop_assert_eq!(adj.node_count(), n);
        for v in 0..n {
            let expected: Vec<u8> =
                (0..n).filter(|&j| g.edge(v, j)).map(|j| j as u8).collect();
            prop_assert_eq!(adj.neighbors(v), expected.as_slice());
            // Everything after the neighbors is sentinel padding.
            for &cell in &adj.row(v)[expected.len()..] {
                prop_assert_eq!(cell, SENTINEL);
            }
        }
    }

    // 4. Every enumerated team move resolves to a known configuration
    //    (totality), and the transition relation is its own inverse.
    #[test]
    fn transitions_are_total_and_self_inverse(g in graph_strategy(), k in 1usize..=2) {
        let n = g.vertex_count();
        let adj = AdjacencyList::new(&g);
        let configs = ConfigTable::generate(n, k).unwrap();
        // Build would panic on any unresolvable move tuple.
        let csr = CsrTransitions::build(&adj, &configs);
        for cid in 0..configs.count() {
            for &base in csr.successors(cid) {
                let next = base / n;
                prop_assert!(next < configs.count());
                prop_assert!(
                    csr.successors(next).contains(&(cid * n)),
                    "transition {} -> {} has no reverse",
                    cid, next
                );
            }
        }
    }

    // 5. On-the-fly enumeration visits exactly the CSR successor set
    //    (after dedup), regardless of graph shape.
    #[test]
    fn on_the_fly_matches_csr(g in graph_strategy(), k in 1usize..=2) {
        let n = g.vertex_count();
        let adj = AdjacencyList::new(&g);
        let configs = ConfigTable::generate(n, k).unwrap();
        let csr = CsrTransitions::build(&adj, &configs);
        let mut scratch = MoveScratch::new(k);
        for cid in 0..configs.count() {
            let mut seen = Vec::new();
            for_each_team_move(&adj, &configs, cid, &mut scratch, |next| seen.push(next * n));
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.as_slice(), csr.successors(cid));
        }
    }

    // 6. Every successor configuration stays within each cop's closed
    //    neighborhood: no cop teleports.
    #[test]
    fn successors_respect_cop_moves(g in graph_strategy(), k in 1usize..=2) {
        let n = g.vertex_count();
        let adj = AdjacencyList::new(&g);
        let configs = ConfigTable::generate(n, k).unwrap();
        let csr = CsrTransitions::build(&adj, &configs);
        for cid in 0..configs.count() {
            let from = configs.config(cid);
            for &base in csr.successors(cid) {
                let to = configs.config(base / n);
                // A legal team move is a perfect matching of cops to
                // targets in their closed neighborhoods; check the cheap
                // necessary direction (every target is in some cop's
                // closed neighborhood).
                for &t in to {
                    let reachable = from.iter().any(|&c| {
                        c == t || g.edge(c as usize, t as usize)
                    });
                    prop_assert!(reachable, "target {} unreachable from {:?}", t, from);
                }
            }
        }
    }
}
