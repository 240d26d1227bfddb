//! Wall-clock measurement helpers for the preprocessing and query phases.

use super::*;
use std::time::{Duration, Instant};

/// Runs the given closure, prints how long it took to stderr, reports the
/// time under `running_time_ms` and returns the closure's result.
pub fn report_time<Out, F: FnOnce() -> Out>(name: &str, f: F) -> Out {
    report_time_with_key(name, "running_time_ms", f)
}

/// Like `report_time` with an explicit report key.
pub fn report_time_with_key<Out, F: FnOnce() -> Out>(name: &str, key: &'static str, f: F) -> Out {
    let start = Instant::now();
    let result = f();
    let passed_ms = start.elapsed().as_secs_f64() * 1000.0;
    eprintln!("{}: {}ms", name, passed_ms);
    report!(key, passed_ms);
    result
}

/// Runs the given closure and returns its result together with the elapsed
/// wall-clock time.
pub fn measure<Out, F: FnOnce() -> Out>(f: F) -> (Out, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}
