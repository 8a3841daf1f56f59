// src/catalog/mod.rs

//! Static reference data shared by every stage of a run.
//!
//! - [`workflow`] holds the named workflow profiles.
//! - [`vm_tier`] holds the ordered VM tier table.

pub mod vm_tier;
pub mod workflow;

pub use vm_tier::{VmTier, VM_TIERS};
pub use workflow::{WorkflowProfile, REFERENCE_WORKFLOW, WORKFLOWS};
