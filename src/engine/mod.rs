// src/engine/mod.rs

//! Simulation engine.
//!
//! This module ties together:
//! - run setup (graph generation, provisioning and assignment per algorithm)
//! - the simulated clock
//! - dependency-gated completion, cost and progress
//! - the finished-run recorder
//!
//! The pure core state machine lives in [`core`]; the drivers that feed it
//! wall-clock time are in [`runtime`].

pub mod clock;
pub mod core;
pub mod cost;
pub mod progress;
pub mod recorder;
pub mod resolver;
pub mod runtime;
pub mod setup;

pub use clock::{ClockState, SimulationClock};
pub use self::core::{AlgorithmFrame, AlgorithmRun, FrameReport, Simulation, FAILSAFE_FACTOR};
pub use progress::DeadlineStatus;
pub use recorder::{ResultStore, SimulationRun};
pub use runtime::{run_headless, FrameDriver, DEFAULT_FRAME_RATE};
pub use setup::{initialize_run, RunParams, RunSetup};
