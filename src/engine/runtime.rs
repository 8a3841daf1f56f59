// src/engine/runtime.rs

//! Drivers that feed wall-clock deltas into the [`Simulation`] core.

use std::time::Duration;

use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::errors::{Result, SimError};

use super::core::{FrameReport, Simulation};

/// Default real-time frame rate, standing in for a display refresh signal.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Drives a [`Simulation`] in real time.
///
/// Every interval tick measures the wall time since the previous tick and
/// advances the core by that amount. Stops when every algorithm has finished
/// or on Ctrl-C.
#[derive(Debug)]
pub struct FrameDriver {
    simulation: Simulation,
    frame_rate: u32,
}

impl FrameDriver {
    pub fn new(simulation: Simulation, frame_rate: u32) -> Self {
        Self {
            simulation,
            frame_rate: frame_rate.max(1),
        }
    }

    /// Main frame loop. Returns the simulation in whatever state it stopped.
    pub async fn run(mut self) -> Result<Simulation> {
        info!(frame_rate = self.frame_rate, "frame driver started");

        let period = Duration::from_secs_f64(1.0 / f64::from(self.frame_rate));
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.simulation.start();
        let mut last = Instant::now();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Instant::now();
                    let wall_delta = now.duration_since(last).as_secs_f64();
                    last = now;

                    let report = self.simulation.advance(wall_delta);
                    debug!(
                        time = report.time,
                        progress = report.average_progress(),
                        "frame"
                    );

                    if report.is_complete {
                        info!(time = report.time, "all algorithms finished; stopping frame driver");
                        break;
                    }
                }
                res = tokio::signal::ctrl_c() => {
                    if let Err(err) = res {
                        return Err(SimError::IoError(err));
                    }
                    info!(time = self.simulation.now(), "ctrl-c received; stopping simulation");
                    break;
                }
            }
        }

        self.simulation.stop();
        info!("frame driver exiting");
        Ok(self.simulation)
    }
}

/// Advance `simulation` with a fixed wall delta per frame until every
/// algorithm has finished.
///
/// The failsafe bounds the number of frames; exceeding that bound means the
/// clock is not moving and is reported as an error.
pub fn run_headless(simulation: &mut Simulation, frame_dt: f64) -> Result<FrameReport> {
    if !frame_dt.is_finite() || frame_dt <= 0.0 {
        return Err(SimError::ConfigError(format!(
            "frame delta must be a positive number of seconds, got {frame_dt}"
        )));
    }

    let max_frames = headless_frame_limit(simulation, frame_dt);
    simulation.start();

    let mut frames = 0usize;
    loop {
        let report = simulation.advance(frame_dt);
        frames += 1;

        if report.is_complete {
            info!(frames, time = report.time, "headless run finished");
            return Ok(report);
        }
        if frames >= max_frames {
            simulation.stop();
            return Err(SimError::Other(anyhow::anyhow!(
                "simulation did not finish within {max_frames} frames"
            )));
        }
    }
}

/// Frames needed to pass the failsafe ceiling, plus slack.
fn headless_frame_limit(simulation: &Simulation, frame_dt: f64) -> usize {
    let per_frame = frame_dt * simulation.clock().multiplier();
    let frames = (simulation.failsafe_ceiling() / per_frame).ceil();
    if frames.is_finite() && frames >= 0.0 {
        (frames as usize).saturating_add(2)
    } else {
        usize::MAX
    }
}
