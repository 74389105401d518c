//! Cross-validation of the two engines, the two transition strategies, and
//! thread-count determinism on seeded random graphs.

mod common;

use common::{assert_same_tables, petersen};
use copnumber::types::{Engine, SolveOptions, TransitionStrategy};
use copnumber::{build_context, make_verdict, run, Decision, Graph};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_graph(rng: &mut SmallRng, n: usize, p: f64) -> Graph {
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.random_bool(p) {
                edges.push((i as u8, j as u8));
            }
        }
    }
    Graph::from_edges(n, &edges)
}

fn solve_with(graph: &Graph, k: usize, opts: SolveOptions) -> (Decision, copnumber::types::Solved) {
    let ctx = build_context(graph, k, opts).unwrap();
    let solved = run(&ctx);
    let decision = make_verdict(&ctx, &solved).decision;
    (decision, solved)
}

#[test]
fn scan_and_frontier_agree_on_random_graphs() {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    for case in 0..40 {
        let n = rng.random_range(2..=8);
        let k = rng.random_range(1..=2);
        let p = rng.random_range(0.15..0.75);
        let graph = random_graph(&mut rng, n, p);

        let opts = SolveOptions {
            track_depth: true,
            ..SolveOptions::default()
        };
        let ctx = build_context(&graph, k, opts).unwrap();
        let frontier = run(&ctx);
        let scan = run(&build_context(
            &graph,
            k,
            SolveOptions {
                engine: Engine::Scan,
                ..opts
            },
        )
        .unwrap());

        assert_same_tables(&ctx, &frontier, &scan);
        assert_eq!(
            make_verdict(&ctx, &frontier).decision,
            make_verdict(&ctx, &scan).decision,
            "verdicts diverge on case {}",
            case
        );
    }
}

#[test]
fn csr_and_on_the_fly_agree() {
    let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
    for _ in 0..25 {
        let n = rng.random_range(2..=7);
        let k = rng.random_range(0..=2);
        let graph = random_graph(&mut rng, n, 0.4);

        let opts = SolveOptions {
            track_depth: true,
            ..SolveOptions::default()
        };
        let ctx = build_context(&graph, k, opts).unwrap();
        let csr = run(&ctx);
        let otf = run(&build_context(
            &graph,
            k,
            SolveOptions {
                transitions: TransitionStrategy::OnTheFly,
                ..opts
            },
        )
        .unwrap());
        assert_same_tables(&ctx, &csr, &otf);
    }
}

#[test]
fn engines_agree_without_robber_stay() {
    let mut rng = SmallRng::seed_from_u64(0xABBA);
    for _ in 0..25 {
        let n = rng.random_range(2..=7);
        let k = rng.random_range(1..=2);
        // Low density on purpose: isolated vertices exercise the
        // cannot-move-loses rule.
        let graph = random_graph(&mut rng, n, 0.25);

        let opts = SolveOptions {
            robber_may_stay: false,
            ..SolveOptions::default()
        };
        let ctx = build_context(&graph, k, opts).unwrap();
        let frontier = run(&ctx);
        let scan = run(&build_context(
            &graph,
            k,
            SolveOptions {
                engine: Engine::Scan,
                ..opts
            },
        )
        .unwrap());
        assert_same_tables(&ctx, &frontier, &scan);
    }
}

#[test]
fn zero_cops_never_win() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..10 {
        let n = rng.random_range(1..=6);
        let graph = random_graph(&mut rng, n, 0.5);
        let (decision, _) = solve_with(&graph, 0, SolveOptions::default());
        assert_eq!(decision, Decision::Loss);
    }
}

#[test]
fn thread_count_does_not_change_the_tables() {
    let graph = petersen();
    let opts = SolveOptions {
        track_depth: true,
        ..SolveOptions::default()
    };
    let ctx = build_context(&graph, 3, opts).unwrap();

    let reference = run(&ctx);
    for threads in [1, 2, 8] {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();
        let solved = pool.install(|| run(&ctx));
        assert_same_tables(&ctx, &reference, &solved);
        assert_eq!(solved.waves, reference.waves);
    }
}
