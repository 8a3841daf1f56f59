// tests/realtime_driver.rs

mod common;

use common::{init_tracing, SimConfigBuilder};
use wfsim::engine::FrameDriver;
use wfsim_test_utils::with_timeout;

#[tokio::test]
async fn frame_driver_runs_reference_workflow_to_completion() {
    init_tracing();

    // 500 simulated seconds per wall second.
    let sim = SimConfigBuilder::new()
        .speed(50.0)
        .fast_forward(true)
        .build_simulation();

    let sim = with_timeout(FrameDriver::new(sim, 60).run()).await.unwrap();

    assert!(sim.is_complete());
    assert!(!sim.clock().is_running());
    assert_eq!(sim.finalize().len(), 3);
    assert!(sim.runs().iter().all(|r| r.completion_time.is_some()));
}
