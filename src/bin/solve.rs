//! Solve a cops-and-robbers instance from an adjacency-matrix file.
//!
//! Usage:
//!   solve <graph_file.txt> <num_cops> [options]
//!
//! Options:
//!   --rounds          Track capture depths; print capture time, write the
//!                     play trace, DP table, and JSON trace next to the
//!                     graph file
//!   --max-rounds N    Bounded-capture mode: LOSS unless the witness
//!                     captures within N rounds (implies --rounds)
//!   --scan            Use the iterative-scan engine instead of the
//!                     frontier engine
//!   --on-the-fly      Re-enumerate team moves per query instead of
//!                     materializing the CSR table
//!   --no-stay         Forbid the robber from passing its turn
//!   --quiet           Suppress progress output

use std::path::{Path, PathBuf};
use std::process::exit;

use copnumber::env_config::{init_base_path, init_rayon_threads};
use copnumber::export::{write_dp_file, write_trace_file, write_trace_json};
use copnumber::types::{Engine, SolveOptions, TransitionStrategy};
use copnumber::{build_context, make_verdict, run, Decision, Graph};

struct Args {
    graph_file: String,
    k: usize,
    opts: SolveOptions,
}

fn usage(program: &str) -> ! {
    println!("Usage: {} <graph_file.txt> <num_cops> [options]", program);
    println!("Example: {} graph3.txt 4", program);
    println!();
    println!("Options:");
    println!("  --rounds          Track capture depths and write trace/DP artifacts");
    println!("  --max-rounds N    LOSS unless capture happens within N rounds");
    println!("  --scan            Iterative-scan engine (reference, slow)");
    println!("  --on-the-fly      Do not materialize the transition table");
    println!("  --no-stay         Robber may not pass its turn");
    println!("  --quiet           Suppress progress output");
    exit(1);
}

fn parse_args() -> Args {
    let argv: Vec<String> = std::env::args().collect();
    let program = argv[0].clone();

    let mut positional: Vec<&str> = Vec::new();
    let mut opts = SolveOptions {
        verbose: true,
        ..SolveOptions::default()
    };

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--rounds" => opts.track_depth = true,
            "--max-rounds" => {
                i += 1;
                let bound = argv.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("Invalid --max-rounds value");
                    usage(&program);
                });
                opts.max_rounds = Some(bound);
                opts.track_depth = true;
            }
            "--scan" => opts.engine = Engine::Scan,
            "--on-the-fly" => opts.transitions = TransitionStrategy::OnTheFly,
            "--no-stay" => opts.robber_may_stay = false,
            "--quiet" => opts.verbose = false,
            "--help" | "-h" => usage(&program),
            other => positional.push(other),
        }
        i += 1;
    }

    if positional.len() != 2 {
        usage(&program);
    }
    let k = positional[1].parse().unwrap_or_else(|_| {
        eprintln!("Invalid cop count: {}", positional[1]);
        usage(&program);
    });

    Args {
        graph_file: positional[0].to_string(),
        k,
        opts,
    }
}

/// `graph.txt` + k=3 -> `graph_3cops_path.txt` etc., next to the graph.
fn artifact_path(graph_file: &str, k: usize, suffix: &str) -> PathBuf {
    let path = Path::new(graph_file);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());
    let name = format!("{}_{}cops_{}", stem, k, suffix);
    path.with_file_name(name)
}

fn main() {
    let args = parse_args();
    init_base_path();
    init_rayon_threads();

    let text = match std::fs::read_to_string(&args.graph_file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", args.graph_file, e);
            exit(1);
        }
    };
    let graph = match Graph::from_matrix_text(&text) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    let ctx = match build_context(&graph, args.k, args.opts) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    let start = std::time::Instant::now();
    let solved = run(&ctx);
    let verdict = make_verdict(&ctx, &solved);
    let elapsed = start.elapsed().as_secs_f64();

    println!("\n--- FINAL VERDICT ---");
    match verdict.decision {
        Decision::Win => {
            println!("RESULT: WIN. {} Cop(s) CAN win this graph.", args.k);
            let witness = verdict.witness.as_deref().unwrap_or(&[]);
            let positions: Vec<String> = witness.iter().map(|c| c.to_string()).collect();
            println!("Optimal Cop Start Positions: ({})", positions.join(", "));
            if let Some(rounds) = verdict.capture_rounds {
                println!("Capture Time: {} rounds.", rounds);
            }
        }
        Decision::Loss => {
            println!("RESULT: LOSS. {} Cop(s) CANNOT guarantee a win.", args.k);
            println!("(The Robber has a strategy to survive indefinitely against any start).");
        }
    }
    println!("Solved in {:.2} seconds ({} waves).", elapsed, solved.waves);

    if let Some(trace) = &verdict.trace {
        let path = artifact_path(&args.graph_file, args.k, "path.txt");
        match write_trace_file(&path, trace) {
            Ok(()) => println!("Perfect game written to {}", path.display()),
            Err(e) => eprintln!("Error writing {}: {}", path.display(), e),
        }
        let json = artifact_path(&args.graph_file, args.k, "perfect_game.json");
        match write_trace_json(&json, trace) {
            Ok(()) => println!("Perfect game cached to {}", json.display()),
            Err(e) => eprintln!("Error writing {}: {}", json.display(), e),
        }
    }
    if args.opts.track_depth {
        let path = artifact_path(&args.graph_file, args.k, "dp.txt");
        match write_dp_file(&path, &ctx, &solved) {
            Ok(()) => println!("DP table written to {}", path.display()),
            Err(e) => eprintln!("Error writing {}: {}", path.display(), e),
        }
    }
}
