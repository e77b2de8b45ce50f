//! Threat vector classification: text to weighted threat profile.

mod classifier;
mod result;

pub use classifier::{ThreatClassifier, FALLBACK_CONFIDENCE, SATURATION_K};
pub use result::{DomainFinding, Evidence, ThreatClassification};
