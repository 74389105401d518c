//! Shared graph constructions and assertions for the integration tests.
#![allow(dead_code)]

use copnumber::types::{Solved, SolverContext, TraceStep, TurnLabel};
use copnumber::Graph;

pub fn path(n: usize) -> Graph {
    let edges: Vec<(u8, u8)> = (0..n - 1).map(|i| (i as u8, (i + 1) as u8)).collect();
    Graph::from_edges(n, &edges)
}

pub fn cycle(n: usize) -> Graph {
    let edges: Vec<(u8, u8)> = (0..n)
        .map(|i| (i as u8, ((i + 1) % n) as u8))
        .collect();
    Graph::from_edges(n, &edges)
}

pub fn complete(n: usize) -> Graph {
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            edges.push((i as u8, j as u8));
        }
    }
    Graph::from_edges(n, &edges)
}

/// Standard Petersen graph: outer 5-cycle 0-4, inner pentagram 5-9, spokes.
pub fn petersen() -> Graph {
    let mut edges = Vec::new();
    for i in 0..5u8 {
        edges.push((i, (i + 1) % 5));
        edges.push((5 + i, 5 + (i + 2) % 5));
        edges.push((i, 5 + i));
    }
    Graph::from_edges(10, &edges)
}

/// Dodecahedral graph from its LCF notation [10,7,4,-4,-7,10,-4,7,-7,4]^2:
/// a 20-cycle plus one chord per vertex.
pub fn dodecahedron() -> Graph {
    const LCF: [i32; 10] = [10, 7, 4, -4, -7, 10, -4, 7, -7, 4];
    let mut edges = Vec::new();
    for i in 0..20i32 {
        edges.push((i as u8, ((i + 1) % 20) as u8));
        let j = (i + LCF[i as usize % 10]).rem_euclid(20);
        edges.push((i as u8, j as u8));
    }
    Graph::from_edges(20, &edges)
}

/// Both engines (and both transition strategies) must agree on every flag,
/// and on every capture depth when both tracked it.
pub fn assert_same_tables(ctx: &SolverContext, a: &Solved, b: &Solved) {
    for sid in 0..ctx.num_states() {
        assert_eq!(
            a.states.cop_win(sid),
            b.states.cop_win(sid),
            "copWin differs at state {} (cid {}, r {})",
            sid,
            sid / ctx.n,
            sid % ctx.n
        );
        assert_eq!(
            a.robber_wins.get(sid),
            b.robber_wins.get(sid),
            "robberWin differs at state {} (cid {}, r {})",
            sid,
            sid / ctx.n,
            sid % ctx.n
        );
    }
    if let (Some(sa), Some(sb)) = (&a.steps, &b.steps) {
        assert_eq!(sa, sb, "capture depths differ");
    }
}

fn is_legal_vertex_move(g: &Graph, from: u8, to: u8) -> bool {
    from == to || g.edge(from as usize, to as usize)
}

/// Can the cop multiset `from` reach `to` with each cop taking one edge or
/// staying? Backtracking over assignments (k is tiny in tests).
fn cops_can_move(g: &Graph, from: &[u8], to: &[u8]) -> bool {
    fn assign(g: &Graph, from: &[u8], to: &[u8], used: &mut [bool]) -> bool {
        let Some((&c, rest)) = from.split_first() else {
            return true;
        };
        for i in 0..to.len() {
            if !used[i] && is_legal_vertex_move(g, c, to[i]) {
                used[i] = true;
                if assign(g, rest, to, used) {
                    return true;
                }
                used[i] = false;
            }
        }
        false
    }
    from.len() == to.len() && assign(g, from, to, &mut vec![false; to.len()])
}

/// Structural validity of a reconstructed play: alternating turns, legal
/// moves for every piece, terminal capture, and strictly descending
/// cop-turn depth each round.
pub fn assert_trace_valid(g: &Graph, trace: &[TraceStep]) {
    assert!(!trace.is_empty());
    assert_eq!(
        trace.last().unwrap().turn,
        TurnLabel::Captured,
        "trace must end with a capture"
    );

    for pair in trace.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        match prev.turn {
            TurnLabel::CopsTurn => {
                // Every cop moves along an edge or stays; the robber does
                // not move.
                assert_eq!(prev.robber, next.robber);
                assert!(
                    cops_can_move(g, &prev.cops, &next.cops),
                    "no legal cop matching for {:?} -> {:?}",
                    prev.cops,
                    next.cops
                );
            }
            TurnLabel::RobbersTurn => {
                assert_eq!(prev.cops, next.cops);
                assert!(
                    is_legal_vertex_move(g, prev.robber, next.robber),
                    "illegal robber move {} -> {}",
                    prev.robber,
                    next.robber
                );
            }
            TurnLabel::Captured => panic!("capture must be the final entry"),
        }
    }

    let last = trace.last().unwrap();
    // Cornered robber (stay disabled, isolated vertex) is the one terminal
    // without co-location.
    let caught = last.cops.contains(&last.robber);
    let cornered = (0..g.vertex_count()).all(|v| !g.edge(last.robber as usize, v));
    assert!(caught || cornered, "terminal state is neither capture nor cornered");
}
