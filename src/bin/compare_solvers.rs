//! Cross-check harness: run the frontier and scan engines (and both
//! transition strategies) on one instance and diff every state flag.
//!
//! Usage:
//!   compare_solvers <graph_file.txt> <num_cops>
//!
//! The engines must agree bit-for-bit on copWin and robberWin; any
//! disagreement is printed with its state coordinates and the process
//! exits non-zero.

use std::process::exit;
use std::time::Instant;

use copnumber::env_config::init_rayon_threads;
use copnumber::types::{Engine, Solved, SolveOptions, SolverContext, TransitionStrategy};
use copnumber::{build_context, run, Graph};

fn solve_with(graph: &Graph, k: usize, opts: SolveOptions) -> (SolverContext, Solved, f64) {
    let ctx = build_context(graph, k, opts).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        exit(1);
    });
    let start = Instant::now();
    let solved = run(&ctx);
    (ctx, solved, start.elapsed().as_secs_f64())
}

fn diff(label: &str, ctx: &SolverContext, a: &Solved, b: &Solved) -> usize {
    let n = ctx.n;
    let mut mismatches = 0;
    for sid in 0..ctx.num_states() {
        let cop = a.states.cop_win(sid) == b.states.cop_win(sid);
        let robber = a.robber_wins.get(sid) == b.robber_wins.get(sid);
        if !cop || !robber {
            mismatches += 1;
            if mismatches <= 10 {
                println!(
                    "  MISMATCH [{}] state {} (cid {}, r {}): copWin {}/{} robberWin {}/{}",
                    label,
                    sid,
                    sid / n,
                    sid % n,
                    a.states.cop_win(sid),
                    b.states.cop_win(sid),
                    a.robber_wins.get(sid),
                    b.robber_wins.get(sid),
                );
            }
        }
    }
    mismatches
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    if argv.len() != 3 {
        println!("Usage: {} <graph_file.txt> <num_cops>", argv[0]);
        exit(1);
    }
    let k: usize = argv[2].parse().unwrap_or_else(|_| {
        eprintln!("Invalid cop count: {}", argv[2]);
        exit(1);
    });

    init_rayon_threads();

    let text = std::fs::read_to_string(&argv[1]).unwrap_or_else(|e| {
        eprintln!("Error: cannot read {}: {}", argv[1], e);
        exit(1);
    });
    let graph = Graph::from_matrix_text(&text).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        exit(1);
    });

    let base = SolveOptions {
        track_depth: true,
        ..SolveOptions::default()
    };

    let variants = [
        ("frontier/csr", Engine::Frontier, TransitionStrategy::Materialized),
        ("frontier/otf", Engine::Frontier, TransitionStrategy::OnTheFly),
        ("scan/csr", Engine::Scan, TransitionStrategy::Materialized),
    ];

    let mut results = Vec::new();
    for (name, engine, transitions) in variants {
        let opts = SolveOptions {
            engine,
            transitions,
            ..base
        };
        let (ctx, solved, secs) = solve_with(&graph, k, opts);
        println!(
            "{:<14} {:>8.3}s  {} waves",
            name, secs, solved.waves
        );
        results.push((name, ctx, solved));
    }

    let (ref_name, ref_ctx, ref_solved) = &results[0];
    let mut total = 0;
    for (name, _, solved) in &results[1..] {
        let mismatches = diff(name, ref_ctx, ref_solved, solved);
        if mismatches > 0 {
            println!("{} vs {}: {} mismatching states", ref_name, name, mismatches);
        }
        total += mismatches;
    }

    if total == 0 {
        println!("All engines agree on every state flag.");
    } else {
        exit(2);
    }
}
