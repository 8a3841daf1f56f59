pub mod builders;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

use wfsim::engine::{FrameReport, Simulation};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Run a future with a 5-second timeout.
#[allow(dead_code)]
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// Advance `sim` by `dt` per frame until it completes, collecting every
/// frame report. Panics after `max_frames`.
pub fn run_to_completion(sim: &mut Simulation, dt: f64, max_frames: usize) -> Vec<FrameReport> {
    sim.start();
    let mut reports = Vec::new();
    for _ in 0..max_frames {
        let report = sim.advance(dt);
        let done = report.is_complete;
        reports.push(report);
        if done {
            return reports;
        }
    }
    panic!("simulation did not complete within {max_frames} frames");
}
