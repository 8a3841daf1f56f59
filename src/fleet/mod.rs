// src/fleet/mod.rs

//! VM fleets: the per-algorithm set of provisioned virtual machines.

pub mod provisioner;
pub mod vm;

pub use provisioner::{fleet_size, provision};
pub use vm::Vm;
