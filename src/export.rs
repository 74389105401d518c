//! Text and JSON artifacts produced when depth tracking is on.
//!
//! Three writers:
//! - trace dump: one line per half-move, `c1,c2,…,ck|r|label`
//! - DP table dump: one line per (C, r), `c1,…,ck|r|rounds` with -1 where
//!   the cops cannot force capture
//! - JSON trace: the same play as an array of `{cops, robber, turn}`
//!   objects for downstream consumers
//!
//! The dumps are plain text by design; anything fancier (compressed
//! archives, visualizer inputs) is downstream's problem.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use crate::types::{Solved, SolverContext, TraceStep};

fn join_cops(cops: &[u8]) -> String {
    cops.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Write the play trace, one `c1,…,ck|r|label` line per half-move.
pub fn write_trace_file(path: &Path, trace: &[TraceStep]) -> std::io::Result<()> {
    let mut f = BufWriter::new(File::create(path)?);
    for step in trace {
        writeln!(f, "{}|{}|{}", join_cops(&step.cops), step.robber, step.turn)?;
    }
    f.flush()
}

/// Dump the full DP table, one `c1,…,ck|r|rounds` line per state.
pub fn write_dp_file(path: &Path, ctx: &SolverContext, solved: &Solved) -> std::io::Result<()> {
    let steps = solved
        .steps
        .as_ref()
        .expect("DP dump requires depth tracking");
    let start = Instant::now();
    let mut f = BufWriter::new(File::create(path)?);
    let n = ctx.n;
    for cid in 0..ctx.configs.count() {
        let cops = join_cops(ctx.configs.config(cid));
        let base = cid * n;
        for r in 0..n {
            writeln!(f, "{}|{}|{}", cops, r, steps[base + r])?;
        }
    }
    f.flush()?;
    if ctx.opts.verbose {
        println!(
            "Dumped DP table ({} states) in {:.2} ms",
            ctx.num_states(),
            start.elapsed().as_secs_f64() * 1000.0
        );
    }
    Ok(())
}

/// Write the play trace as JSON.
pub fn write_trace_json(path: &Path, trace: &[TraceStep]) -> std::io::Result<()> {
    let f = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(f, trace).map_err(std::io::Error::from)
}
