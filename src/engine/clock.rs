// src/engine/clock.rs

//! Simulated time.

use serde::Serialize;
use tracing::{debug, warn};

/// Speed multiplier applied on top of the base speed in fast-forward mode.
pub const FAST_FORWARD_MULTIPLIER: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClockState {
    Idle,
    Running,
}

/// Accumulates simulated seconds from wall-clock deltas.
///
/// Time only advances while running and never runs backward.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    state: ClockState,
    elapsed: f64,
    speed: f64,
    fast_forward: bool,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0, false)
    }
}

impl SimulationClock {
    pub fn new(speed: f64, fast_forward: bool) -> Self {
        let mut clock = Self {
            state: ClockState::Idle,
            elapsed: 0.0,
            speed: 1.0,
            fast_forward,
        };
        clock.set_speed(speed);
        clock
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Simulated seconds since the last reset.
    pub fn now(&self) -> f64 {
        self.elapsed
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn fast_forward(&self) -> bool {
        self.fast_forward
    }

    /// Simulated seconds per wall-clock second.
    pub fn multiplier(&self) -> f64 {
        if self.fast_forward {
            self.speed * FAST_FORWARD_MULTIPLIER
        } else {
            self.speed
        }
    }

    pub fn start(&mut self) {
        if self.state != ClockState::Running {
            debug!(at = self.elapsed, "clock started");
            self.state = ClockState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.state != ClockState::Idle {
            debug!(at = self.elapsed, "clock stopped");
            self.state = ClockState::Idle;
        }
    }

    /// Back to idle at time zero.
    pub fn reset(&mut self) {
        self.state = ClockState::Idle;
        self.elapsed = 0.0;
    }

    pub fn set_fast_forward(&mut self, enabled: bool) {
        self.fast_forward = enabled;
    }

    /// Change the base speed; non-positive or non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        } else {
            warn!(speed, kept = self.speed, "ignoring invalid clock speed");
        }
    }

    /// Advance by `wall_delta` wall-clock seconds and return the simulated
    /// seconds added.
    pub fn tick(&mut self, wall_delta: f64) -> f64 {
        if !self.is_running() || !wall_delta.is_finite() || wall_delta <= 0.0 {
            return 0.0;
        }

        let delta = wall_delta * self.multiplier();
        self.elapsed += delta;
        delta
    }
}
