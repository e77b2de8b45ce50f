//! TaskGuard — threat classification and enforcement decisions for AI task
//! governance.
//!
//! Evaluates free-text task descriptions against a fixed taxonomy of
//! AI-risk threats, scores the result, applies mitigating controls,
//! estimates regulatory exposure, and resolves an approve / condition /
//! escalate / block outcome. Deterministic keyword and regex matching, not
//! learned inference: a heuristic triage layer, not a proof of compliance.

pub mod classify;
pub mod config;
pub mod enforce;
pub mod logging;
pub mod penalty;
pub mod taxonomy;

pub use classify::{ThreatClassification, ThreatClassifier};
pub use enforce::{Decision, EnforcementEngine, Outcome, SystemProfile, Task};
pub use penalty::PenaltySchedule;
pub use taxonomy::{LossCategory, SubThreat, ThreatDomain};
