#![allow(dead_code)]

pub use wfsim_test_utils::builders::{reference_simulation, GraphBuilder, SimConfigBuilder};
pub use wfsim_test_utils::{init_tracing, run_to_completion};

use wfsim::engine::FrameReport;
use wfsim::types::Algorithm;

/// Float comparison with an absolute tolerance.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Cost series of one algorithm across frames.
pub fn costs_of(reports: &[FrameReport], algorithm: Algorithm) -> Vec<f64> {
    reports
        .iter()
        .filter_map(|r| r.algorithms.iter().find(|a| a.algorithm == algorithm))
        .map(|a| a.cost)
        .collect()
}
