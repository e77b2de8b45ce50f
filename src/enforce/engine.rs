//! The enforcement engine: classifier, risk scoring, controls, penalty
//! lookup, outcome resolution, and recommendation generation in one
//! strictly sequential pipeline.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::classify::{ThreatClassification, ThreatClassifier};
use crate::config::settings::Config;
use crate::penalty::{PenaltySchedule, Severity};
use crate::taxonomy::TaxonomyError;

use super::controls::{apply_controls, round2};
use super::recommend::recommendations;
use super::types::{Decision, Outcome, RegulatoryImpact, SystemProfile, Task};

/// Residual-risk thresholds for the outcome state machine.
pub const BLOCK_THRESHOLD: f64 = 9.0;
pub const ESCALATE_THRESHOLD: f64 = 7.0;
pub const CONDITIONAL_THRESHOLD: f64 = 4.0;

/// Turns a task and its owning system into a governance decision.
///
/// Holds no per-call mutable state, so a single engine is safe for
/// unbounded concurrent callers. The penalty schedule sits behind a
/// swappable `Arc`: a hot-reload replaces the whole reference and
/// in-flight calls keep the snapshot they started with.
pub struct EnforcementEngine {
    classifier: ThreatClassifier,
    schedule: RwLock<Arc<PenaltySchedule>>,
}

impl EnforcementEngine {
    /// Engine over the built-in taxonomy and the embedded fallback
    /// schedule.
    pub fn new() -> Result<Self, TaxonomyError> {
        Self::with_schedule(PenaltySchedule::embedded_fallback())
    }

    /// Engine with an explicit penalty schedule.
    pub fn with_schedule(schedule: PenaltySchedule) -> Result<Self, TaxonomyError> {
        Ok(Self {
            classifier: ThreatClassifier::builtin()?,
            schedule: RwLock::new(Arc::new(schedule)),
        })
    }

    /// Engine configured from a [`Config`]: loads the penalty schedule
    /// from the configured path, degrading to the embedded fallback.
    pub fn from_config(config: &Config) -> Result<Self, TaxonomyError> {
        Self::with_schedule(PenaltySchedule::load(config.schedule.path.as_deref()))
    }

    /// Atomically replace the penalty schedule. Never fails; a bad path
    /// swaps in the embedded fallback.
    pub fn reload_schedule(&self, path: Option<&Path>) {
        let fresh = Arc::new(PenaltySchedule::load(path));
        *self.schedule.write() = fresh;
        info!("penalty schedule reloaded");
    }

    /// The schedule snapshot current calls would use.
    pub fn schedule_snapshot(&self) -> Arc<PenaltySchedule> {
        self.schedule.read().clone()
    }

    /// Classify task text without running the full pipeline.
    pub fn classify_task(&self, task: &Task) -> ThreatClassification {
        self.classifier.classify(
            &task.issues,
            Some(task.title.as_str()),
            Some(task.description.as_str()),
        )
    }

    /// Run the full enforcement pipeline. Infallible by contract: empty
    /// or malformed text approves at low risk, schedule problems were
    /// already degraded to fallback data at load time.
    pub fn enforce(&self, task: &Task, system: &SystemProfile) -> Decision {
        let schedule = self.schedule_snapshot();

        let classification = self.classify_task(task);
        let baseline_risk = baseline_risk(&classification);
        let (risk_score, controls_applied) =
            apply_controls(baseline_risk, &classification.detected_domains());

        let penalties = schedule.applicable_penalties(&classification);
        let regulatory_impact = if penalties.is_empty() {
            None
        } else {
            let total_exposure = schedule.total_exposure(&penalties);
            let executive_summary = schedule.executive_summary(&penalties, &total_exposure);
            Some(RegulatoryImpact {
                penalties,
                total_exposure,
                executive_summary,
            })
        };

        let outcome = resolve_outcome(&classification, regulatory_impact.as_ref(), risk_score);
        let reason = build_reason(&classification, outcome, baseline_risk, risk_score);
        let recommendations = recommendations(&classification, outcome, system);

        info!(
            %outcome,
            risk_score,
            baseline_risk,
            primary = classification.primary_threat.map(|d| d.as_str()).unwrap_or("none"),
            "enforcement decision"
        );

        Decision {
            outcome,
            risk_score,
            baseline_risk,
            controls_applied,
            regulatory_impact,
            sub_threat_type: classification.sub_threat,
            loss_categories: classification.loss_categories.clone(),
            reason,
            recommendations,
            classification,
        }
    }
}

/// The risk-score contract: `(base + boost) * category_multiplier`,
/// capped at 10 and rounded to two decimals.
///
/// `base` is the weighted score scaled to 0-10, `boost` comes from the
/// sub-threat severity tier table, and the multiplier adds 10% per loss
/// category in scope.
fn baseline_risk(classification: &ThreatClassification) -> f64 {
    let base = classification.weighted_score * 10.0;
    let boost = classification
        .sub_threat
        .map(|s| s.severity_boost())
        .unwrap_or(0.0);
    let multiplier = 1.0 + 0.1 * classification.loss_categories.len() as f64;
    round2(((base + boost) * multiplier).min(10.0))
}

/// The outcome state machine, evaluated in strict priority order.
fn resolve_outcome(
    classification: &ThreatClassification,
    impact: Option<&RegulatoryImpact>,
    residual_risk: f64,
) -> Outcome {
    // Shadow-AI credential exposure is a forced block regardless of score.
    if classification
        .sub_threat
        .is_some_and(|s| s.as_str().contains("shadow_ai"))
    {
        return Outcome::Blocked;
    }
    if impact.is_some_and(|i| {
        i.penalties
            .iter()
            .any(|p| p.severity == Severity::Critical)
    }) {
        return Outcome::Blocked;
    }
    if residual_risk >= BLOCK_THRESHOLD {
        return Outcome::Blocked;
    }
    if residual_risk >= ESCALATE_THRESHOLD {
        return Outcome::Escalate;
    }
    if residual_risk >= CONDITIONAL_THRESHOLD {
        return Outcome::Conditional;
    }
    Outcome::Approved
}

fn build_reason(
    classification: &ThreatClassification,
    outcome: Outcome,
    baseline_risk: f64,
    residual_risk: f64,
) -> String {
    match classification.primary_threat {
        None => format!("{}: no task text provided; nothing to classify", outcome),
        Some(_) if classification.is_fallback() => format!(
            "{}: no threat keywords matched; statistical misuse prior applied (risk {:.2} -> {:.2} after controls)",
            outcome, baseline_risk, residual_risk
        ),
        Some(primary) => {
            let sub = classification
                .sub_threat
                .map(|s| format!(", sub-threat {}", s))
                .unwrap_or_default();
            format!(
                "{}: primary threat {} at weighted score {:.2}{}; risk {:.2} -> {:.2} after controls",
                outcome,
                primary,
                classification.weighted_score,
                sub,
                baseline_risk,
                residual_risk
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{DomainFinding, Evidence};
    use crate::taxonomy::{SubThreat, ThreatDomain};

    fn classification_with(
        sub_threat: Option<SubThreat>,
        weighted_score: f64,
        categories: usize,
    ) -> ThreatClassification {
        let mut c = ThreatClassification::empty();
        c.findings.push(DomainFinding {
            domain: ThreatDomain::Misuse,
            evidence: vec![Evidence::Keyword {
                term: "malware".to_string(),
                weight: 9.0,
            }],
            raw_confidence: weighted_score,
            weighted_confidence: weighted_score,
        });
        c.primary_threat = Some(ThreatDomain::Misuse);
        c.sub_threat = sub_threat;
        c.weighted_score = weighted_score;
        c.loss_categories = crate::taxonomy::LossCategory::ALL[..categories].to_vec();
        c
    }

    #[test]
    fn baseline_formula_is_base_plus_boost_times_multiplier() {
        // (0.5 * 10 + 1.0) * (1 + 0.1 * 2) = 7.2
        let c = classification_with(Some(SubThreat::PiiLeakage), 0.5, 2);
        assert_eq!(baseline_risk(&c), 7.2);
    }

    #[test]
    fn baseline_caps_at_ten() {
        let c = classification_with(Some(SubThreat::ProhibitedBiometricPractice), 1.0, 5);
        assert_eq!(baseline_risk(&c), 10.0);
    }

    #[test]
    fn shadow_ai_sub_threat_forces_block_at_any_score() {
        let c = classification_with(Some(SubThreat::ShadowAiCredentialExposure), 0.01, 1);
        assert_eq!(resolve_outcome(&c, None, 0.1), Outcome::Blocked);
    }

    #[test]
    fn threshold_ladder() {
        let c = classification_with(None, 0.5, 1);
        assert_eq!(resolve_outcome(&c, None, 9.0), Outcome::Blocked);
        assert_eq!(resolve_outcome(&c, None, 8.99), Outcome::Escalate);
        assert_eq!(resolve_outcome(&c, None, 7.0), Outcome::Escalate);
        assert_eq!(resolve_outcome(&c, None, 6.99), Outcome::Conditional);
        assert_eq!(resolve_outcome(&c, None, 4.0), Outcome::Conditional);
        assert_eq!(resolve_outcome(&c, None, 3.99), Outcome::Approved);
        assert_eq!(resolve_outcome(&c, None, 0.0), Outcome::Approved);
    }
}
