//! Shared environment configuration for the solver binaries.
//!
//! Consolidates the `COPNUMBER_BASE_PATH` and `RAYON_NUM_THREADS` reads
//! used by every binary.

use std::path::PathBuf;

/// Read `COPNUMBER_BASE_PATH` (default `"."`), chdir, print path. Exits on
/// failure. Artifacts (trace/DP dumps) land relative to this directory.
pub fn init_base_path() -> PathBuf {
    let base_path = std::env::var("COPNUMBER_BASE_PATH").unwrap_or_else(|_| ".".to_string());
    let path = PathBuf::from(&base_path);
    if std::env::set_current_dir(&base_path).is_err() {
        eprintln!("Failed to change directory to {}", base_path);
        std::process::exit(1);
    }
    path
}

/// Read `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`, then the
/// machine's available parallelism, then 8). Builds the rayon global
/// thread pool, tolerating an already-initialized pool. Returns the
/// thread count.
pub fn init_rayon_threads() -> usize {
    let num_threads = std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(8)
        });
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();
    println!("Rayon threads: {}", num_threads);
    num_threads
}
