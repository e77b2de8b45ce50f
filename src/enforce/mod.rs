//! Enforcement: the decision pipeline over classification, scoring,
//! controls, and penalty lookup.

mod controls;
mod engine;
mod recommend;
mod types;

pub use controls::{apply_controls, control_for, round2, Control};
pub use engine::{
    EnforcementEngine, BLOCK_THRESHOLD, CONDITIONAL_THRESHOLD, ESCALATE_THRESHOLD,
};
pub use types::{Decision, Outcome, RegulatoryImpact, RiskClass, Sector, SystemProfile, Task};
