// src/config/mod.rs

//! Configuration loading and validation for wfsim.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and merge CLI overrides (`loader.rs`).
//! - Validate value ranges (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, resolve_config};
pub use model::{
    AlgorithmsSection, ClockSection, ConfigOverrides, RawConfigFile, SimConfig, SimulationSection,
};
